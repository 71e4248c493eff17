//! The extraction pipeline shared by `gtp`, `dtr` and `sar`.
//!
//! ```text
//! banner -> config -> mapping check -> overwrite check -> probe -> programs
//!   -> (command-specific collection and transforms)
//!   -> CSV -> reorder -> workbook -> summary
//! ```

use anyhow::Result;
use chrono::{DateTime, Local};
use engdocs_core::{
    CollectionSummary, ConfirmOverwrite, Environment, FatalError, Program, ResultTable, Schema,
};
use engdocs_feeds::FeedRegistry;
use engdocs_store::{
    export_csv, prepare_output, reorder, AutoConfirm, ProgramMapping, StdinConfirm, WorkbookExport,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use super::Session;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Job
// ============================================================================

/// Static description of one extraction command.
#[derive(Debug, Clone, Copy)]
pub struct Job {
    /// Banner title.
    pub title: &'static str,
    /// System produced.
    pub schema: Schema,
    /// Output file stem.
    pub stem: &'static str,
    /// Whether the program-group mapping is applied.
    pub uses_mapping: bool,
}

/// A job whose checks passed and whose program catalogue is loaded.
pub struct Prepared {
    session: Session,
    programs: Vec<Program>,
    csv: PathBuf,
    workbook: PathBuf,
    started: Instant,
    started_at: DateTime<Local>,
}

impl Job {
    /// Runs every step up to and including the program catalogue.
    pub async fn prepare(&self, cli: &Cli) -> Result<Prepared> {
        let started = Instant::now();
        let started_at = Local::now();

        info!(
            "========= {} DATA EXTRACTION (Ver {}) ==========",
            self.title, VERSION
        );
        info!("This tool only works on-site or with a VPN connection to the corporate network");
        info!("{}", "=".repeat(74));

        let session = Session::open(cli, forced_environment(self.schema))?;

        if self.uses_mapping {
            ProgramMapping::require(&cli.mapping).map_err(FatalError::from)?;
        }

        let csv = cli.output_dir.join(format!("{}.csv", self.stem));
        let workbook = cli.output_dir.join(format!("{}.xlsm", self.stem));
        let confirm: &dyn ConfirmOverwrite = if cli.yes { &AutoConfirm } else { &StdinConfirm };
        prepare_output(&workbook, confirm).map_err(FatalError::from)?;

        if session.debug() {
            info!("{} DEBUG MODE {}", ">".repeat(30), "<".repeat(30));
            info!("{}", "=".repeat(73));
        }

        session.config.log_summary();
        info!("Processing may take several minutes. Please wait...");

        session.probe().await;
        let programs = session.programs().await?;

        Ok(Prepared {
            session,
            programs,
            csv,
            workbook,
            started,
            started_at,
        })
    }
}

impl Prepared {
    /// Collects every feed of `schema` for every program, in registry order,
    /// and stacks the results into one table.
    pub async fn collect(&self, schema: Schema) -> (ResultTable, Vec<FeedTotals>) {
        let mut table = ResultTable::default();
        let mut totals = Vec::new();
        for descriptor in FeedRegistry::for_schema(schema) {
            let (feed, summary) = self.session.collect(descriptor, &self.programs).await;
            totals.push(FeedTotals::new(descriptor.data_type(), &feed, &summary));
            table = table.concat(&feed);
        }
        (table, totals)
    }

    /// Writes both exports and reports the run.
    pub fn finish(
        self,
        cli: &Cli,
        job: &Job,
        mut table: ResultTable,
        feeds: Vec<FeedTotals>,
    ) -> Result<()> {
        export_csv(&table, &self.csv).map_err(FatalError::from)?;

        reorder(&mut table, job.schema);
        WorkbookExport::new(
            &cli.template,
            &self.session.config.api_key,
            job.schema,
            self.session.config.environment,
        )
        .export(&table, &self.workbook)
        .map_err(FatalError::from)?;

        let report = RunReport {
            system: job.schema,
            environment: self.session.config.environment,
            started_at: self.started_at,
            elapsed: self.started.elapsed(),
            total_records: table.len(),
            feeds,
            csv: self.csv,
            workbook: self.workbook,
        };

        for line in TextFormatter::new(false).format_report(&report) {
            info!("{}", line);
        }
        if cli.format == OutputFormat::Json {
            println!("{}", JsonFormatter::new(cli.pretty).format(&report)?);
        }
        Ok(())
    }
}

/// Environment a schema is pinned to, if any of its feeds is Production-only.
fn forced_environment(schema: Schema) -> Option<Environment> {
    FeedRegistry::production_only(schema).then_some(Environment::Production)
}

/// Applies the program-group mapping from `cli.mapping`.
pub fn apply_mapping(cli: &Cli, table: &mut ResultTable) -> Result<()> {
    info!("Applying program group mapping...");
    let mapping = ProgramMapping::load(&cli.mapping).map_err(FatalError::from)?;
    mapping.apply(table);
    Ok(())
}

// ============================================================================
// Reports
// ============================================================================

/// Counters of one feed in a finished run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedTotals {
    pub data_type: &'static str,
    pub records: usize,
    pub successful_programs: usize,
    pub failed_programs: usize,
    pub empty_programs: usize,
    pub total_programs: usize,
}

impl FeedTotals {
    pub fn new(data_type: &'static str, table: &ResultTable, summary: &CollectionSummary) -> Self {
        Self {
            data_type,
            records: table.len(),
            successful_programs: summary.successful_programs(),
            failed_programs: summary.failed_programs(),
            empty_programs: summary.empty_programs(),
            total_programs: summary.total_programs(),
        }
    }
}

/// Summary of a finished extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub system: Schema,
    pub environment: Environment,
    pub started_at: DateTime<Local>,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub total_records: usize,
    pub feeds: Vec<FeedTotals>,
    pub csv: PathBuf,
    pub workbook: PathBuf,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}
