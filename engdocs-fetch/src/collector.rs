//! Paginated collection across programs.
//!
//! For each program the collector walks `page=1, 2, ...` until a page comes
//! back short, turning every page into a [`RecordBatch`] and appending it to
//! one [`ResultTable`]. A failing program is counted and skipped; nothing
//! here aborts the run.

use engdocs_core::{
    CollectionSummary, Program, ProgramOutcome, ProgramStatus, RecordBatch, ResultTable,
};
use tracing::{debug, info, instrument, warn};

use crate::decode::{decode, is_falsy};
use crate::dump::{page_stem, DebugDump};
use crate::shape::extract;
use crate::source::{FetchSettings, PageSource};

/// Rows per full page. A page with exactly this many rows means more follow.
pub const PAGE_SIZE: usize = 200;

// ============================================================================
// Feed Query
// ============================================================================

/// Everything the collector needs to know about one feed.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    /// Label for logs and debug directories ("GTP", "BDI", ...).
    pub data_type: String,
    /// URL up to and including the `"programID":"` prefix of the filter.
    pub url_base: String,
    /// Filter suffix following the program ID.
    pub date_filter: String,
    /// Envelope keys tried by the shape extractor.
    pub envelope_keys: &'static [&'static str],
}

impl FeedQuery {
    /// URL of `page` for `program_id`.
    pub fn page_url(&self, program_id: &str, page: u32) -> String {
        format!("{}{}{}&page={}", self.url_base, program_id, self.date_filter, page)
    }
}

// ============================================================================
// Collector
// ============================================================================

enum PageResult {
    Rows(RecordBatch),
    FetchFailed,
    Unparsed,
    Unrecognized,
}

/// Walks every program and page of one feed.
pub struct Collector<'a, S: PageSource + ?Sized> {
    source: &'a S,
    settings: FetchSettings,
    dump: &'a DebugDump,
}

impl<'a, S: PageSource + ?Sized> Collector<'a, S> {
    /// Creates a collector.
    pub fn new(source: &'a S, settings: FetchSettings, dump: &'a DebugDump) -> Self {
        Self {
            source,
            settings,
            dump,
        }
    }

    /// Collects all pages of `query` for every program, in catalogue order.
    #[instrument(skip_all, fields(data_type = %query.data_type))]
    pub async fn collect(
        &self,
        query: &FeedQuery,
        programs: &[Program],
    ) -> (ResultTable, CollectionSummary) {
        info!("Fetching {} data...", query.data_type);

        let total = programs.len();
        let mut table = ResultTable::new();
        let mut summary = CollectionSummary::default();

        for (idx, program) in programs.iter().enumerate() {
            info!(
                "[{:02}/{:02}] {} - {} - {}",
                idx + 1,
                total,
                program.label(),
                program.program_code,
                program.program
            );
            let outcome = self.collect_program(query, idx, total, program, &mut table).await;
            summary.record(outcome);
        }

        info!("{} data retrieval complete:", query.data_type);
        info!(
            "  Successful: {}/{} programs",
            summary.successful_programs(),
            total
        );
        info!("  Failed: {}/{} programs", summary.failed_programs(), total);
        info!("  Total records: {}", table.len());

        (table, summary)
    }

    async fn collect_program(
        &self,
        query: &FeedQuery,
        idx: usize,
        total: usize,
        program: &Program,
        table: &mut ResultTable,
    ) -> ProgramOutcome {
        let tag = format!("[{:02}/{:02}]", idx + 1, total);
        let label = program.label();

        let mut batch = match self.fetch_page(query, idx, program, 1, false).await {
            PageResult::Rows(batch) => batch,
            PageResult::FetchFailed => {
                warn!("{} Failed to retrieve data for {}", tag, label);
                return failed(program);
            }
            PageResult::Unparsed => {
                warn!("{} Failed to parse JSON for {}", tag, label);
                return failed(program);
            }
            PageResult::Unrecognized => {
                warn!("{} Unexpected JSON structure for {}", tag, label);
                return failed(program);
            }
        };

        if batch.is_empty() {
            debug!("{} No data found for {}", tag, label);
            return ProgramOutcome {
                program_id: program.program_id.clone(),
                record_count: 0,
                status: ProgramStatus::NoData,
            };
        }

        let mut record_count = batch.len();
        table.append_batch(&batch);

        let mut page = 1;
        while batch.len() == PAGE_SIZE {
            page += 1;
            info!("{} Fetching page {}", tag, page);

            batch = match self.fetch_page(query, idx, program, page, true).await {
                PageResult::Rows(next) if !next.is_empty() => next,
                PageResult::Rows(_) => break,
                PageResult::FetchFailed => {
                    warn!("Failed to retrieve page {} for {}", page, label);
                    break;
                }
                PageResult::Unparsed => {
                    warn!("Failed to parse JSON for page {} of {}", page, label);
                    break;
                }
                PageResult::Unrecognized => {
                    warn!("Unexpected structure for page {} of {}", page, label);
                    break;
                }
            };

            record_count += batch.len();
            table.append_batch(&batch);
        }

        info!(
            "Program {} ({}): {} records found",
            program.program_id, program.program_code, record_count
        );

        ProgramOutcome {
            program_id: program.program_id.clone(),
            record_count,
            status: ProgramStatus::Collected,
        }
    }

    async fn fetch_page(
        &self,
        query: &FeedQuery,
        idx: usize,
        program: &Program,
        page: u32,
        silent: bool,
    ) -> PageResult {
        let url = query.page_url(&program.program_id, page);
        let stem = page_stem(idx, page, &query.data_type);
        let dir = &query.data_type;
        self.dump.text(&format!("{dir}/url_{stem}.txt"), &url);

        let Ok(response) = self.source.fetch(&url, &self.settings, silent).await else {
            return PageResult::FetchFailed;
        };
        self.dump.text(&format!("{dir}/response_{stem}.json"), &response.text());

        let payload = match decode(Some(&response)) {
            Some(payload) if !is_falsy(&payload) => payload,
            _ => return PageResult::Unparsed,
        };
        self.dump.json(&format!("{dir}/parsed_{stem}.json"), &payload);

        let Some(found) = extract(&payload, query.envelope_keys) else {
            return PageResult::Unrecognized;
        };
        let batch = RecordBatch::from_value(found.records);

        if !batch.is_empty() && self.dump.is_enabled() {
            let page_table = engdocs_core::assemble([&batch]);
            self.dump.table(&format!("{dir}/dataframe_{stem}.csv"), &page_table);
        }

        PageResult::Rows(batch)
    }
}

fn failed(program: &Program) -> ProgramOutcome {
    ProgramOutcome {
        program_id: program.program_id.clone(),
        record_count: 0,
        status: ProgramStatus::Failed,
    }
}

/// Collects one feed with a fresh [`Collector`].
pub async fn collect<S: PageSource + ?Sized>(
    source: &S,
    query: &FeedQuery,
    programs: &[Program],
    settings: FetchSettings,
    dump: &DebugDump,
) -> (ResultTable, CollectionSummary) {
    Collector::new(source, settings, dump).collect(query, programs).await
}
