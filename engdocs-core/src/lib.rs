// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `engdocs` Core
//!
//! Core types shared by every `engdocs` crate:
//!
//! - Domain models (programs, record batches, the result table)
//! - Feed, schema and environment kinds
//! - Error types, including the run-ending [`FatalError`]
//! - The [`ConfirmOverwrite`] capability
//!
//! ## Key Types
//!
//! - [`Program`] - One account/project of the upstream catalogue
//! - [`RecordBatch`] - Rows extracted from one page
//! - [`ResultTable`] - Union of batches with column drift tolerated
//! - [`CollectionSummary`] - Per-program outcomes of a collection run

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{CoreError, ExitCategory, FatalError};

// Re-export all model types
pub use models::{
    // Programs
    Program,
    // Tables
    Record,
    RecordBatch,
    ResultTable,
    SCALAR_COLUMN,
    assemble,
    cell_text,
    is_blank,
    // Kinds
    Environment,
    FeedKind,
    Schema,
    DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT_SECS,
    // Outcomes
    CollectionSummary,
    ProgramOutcome,
    ProgramStatus,
};

// Re-export traits
pub use traits::ConfirmOverwrite;
