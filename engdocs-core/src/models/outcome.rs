//! Per-program outcomes and run summaries.

use serde::Serialize;

/// What happened to one program during collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    /// At least one page produced rows.
    Collected,
    /// The first page was readable but held no rows.
    NoData,
    /// The first page could not be fetched, decoded or recognized.
    Failed,
}

/// Tally for one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramOutcome {
    /// Program identifier.
    pub program_id: String,
    /// Rows collected across all pages.
    pub record_count: usize,
    /// Final status.
    pub status: ProgramStatus,
}

impl ProgramOutcome {
    /// True when the program returned data.
    pub fn succeeded(&self) -> bool {
        self.status == ProgramStatus::Collected
    }
}

/// Counters for one collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    /// Outcomes in program order.
    pub outcomes: Vec<ProgramOutcome>,
}

impl CollectionSummary {
    /// Records an outcome.
    pub fn record(&mut self, outcome: ProgramOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of programs processed.
    pub fn total_programs(&self) -> usize {
        self.outcomes.len()
    }

    /// Programs that returned data.
    pub fn successful_programs(&self) -> usize {
        self.count(ProgramStatus::Collected)
    }

    /// Programs that failed.
    pub fn failed_programs(&self) -> usize {
        self.count(ProgramStatus::Failed)
    }

    /// Programs with no rows.
    pub fn empty_programs(&self) -> usize {
        self.count(ProgramStatus::NoData)
    }

    /// Rows across all programs.
    pub fn total_records(&self) -> usize {
        self.outcomes.iter().map(|o| o.record_count).sum()
    }

    fn count(&self, status: ProgramStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
