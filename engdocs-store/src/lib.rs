// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `engdocs` Store
//!
//! Everything that happens before and after collection: environment
//! configuration, the program-group mapping, validation, column order and
//! the CSV and workbook exports.
//!
//! ## Transform chain
//!
//! ```text
//! collected table
//!   -> ProgramMapping::apply   (GTP, DTR)
//!   -> validate                (GTP, DTR)
//!   -> export_csv
//!   -> reorder
//!   -> WorkbookExport::export
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod mapping;
pub mod overwrite;
pub mod reorder;
pub mod validate;

pub use config::{base_url, Config, DATE_FORMAT, PROD_BASE_URL, QAS_BASE_URL};
pub use error::StoreError;
pub use export::{export_csv, WorkbookExport, DEFAULT_TEMPLATE};
pub use mapping::{MappingStats, ProgramMapping, MAPPING_FILE, PROGRAM_COLUMN};
pub use overwrite::{prepare_output, AutoConfirm, StdinConfirm};
pub use reorder::reorder;
pub use validate::{validate, ERROR_COLUMN, STATUS_COLUMN};
