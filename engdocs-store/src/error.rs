//! Store error types.

use engdocs_core::{CoreError, FatalError};
use thiserror::Error;

/// Errors that can occur while configuring, transforming or exporting.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required file is missing.
    #[error("{path} not found: {purpose}")]
    MissingFile {
        /// Path that was looked up.
        path: String,
        /// What the file is needed for.
        purpose: String,
    },

    /// The output filename is not acceptable.
    #[error("Invalid output file: {0}")]
    InvalidOutput(String),

    /// The user declined to continue.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Table error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Workbook writer error.
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Template archive error.
    #[error("Template archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for FatalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Config(msg) => FatalError::Config(msg),
            StoreError::MissingFile { path, purpose } => FatalError::MissingFile { path, purpose },
            StoreError::Cancelled => FatalError::Cancelled,
            other => FatalError::Export(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engdocs_core::ExitCategory;

    #[test]
    fn test_fatal_conversion() {
        let fatal: FatalError = StoreError::Cancelled.into();
        assert_eq!(fatal.category(), ExitCategory::Cancelled);

        let fatal: FatalError = StoreError::InvalidOutput("out.xlsx".into()).into();
        assert_eq!(fatal.category(), ExitCategory::General);
        assert!(fatal.to_string().contains("out.xlsx"));
    }
}
