//! Domain models for engdocs.
//!
//! ## Submodules
//!
//! - [`program`] - Program catalogue entries
//! - [`table`] - Record batches and the assembled result table
//! - [`feed`] - Feed, schema and environment kinds
//! - [`outcome`] - Per-program outcomes and run summaries

mod feed;
mod outcome;
mod program;
mod table;

// Re-export everything at the models level
pub use feed::{Environment, FeedKind, Schema, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use outcome::{CollectionSummary, ProgramOutcome, ProgramStatus};
pub use program::Program;
pub use table::{
    assemble, cell_text, is_blank, Record, RecordBatch, ResultTable, SCALAR_COLUMN,
};
