//! Core error types for `engdocs`.

use thiserror::Error;

/// Core error type for `engdocs` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Fatal Errors
// ============================================================================

/// How a fatal error terminates the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCategory {
    /// The user declined to continue. Not an error.
    Cancelled,
    /// Configuration, IO or otherwise unclassified failure.
    General,
    /// An HTML page came back instead of API data (login or VPN redirect).
    Authentication,
    /// The API rejected the key for this environment.
    ApiKey,
}

impl ExitCategory {
    /// Process exit code for this category.
    pub fn code(self) -> i32 {
        match self {
            Self::Cancelled => 0,
            Self::General => 1,
            Self::Authentication => 2,
            Self::ApiKey => 3,
        }
    }
}

/// A condition that ends the run.
///
/// Library code never exits the process; the CLI converts these into an
/// exit code via [`FatalError::category`].
#[derive(Debug, Error)]
pub enum FatalError {
    /// The program catalogue could not be fetched after all retries.
    #[error("Unable to retrieve program list data")]
    ProgramListUnavailable,

    /// The server answered with an HTML page.
    #[error("Received HTML response instead of JSON")]
    HtmlResponse,

    /// The API answered with an error message.
    #[error("API returned an error message: {0}")]
    ApiRejected(String),

    /// The program catalogue had an unknown shape.
    #[error("Could not parse program list from API response: {0}")]
    UnexpectedProgramList(String),

    /// Invalid or missing configuration.
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

    /// Export failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// The user cancelled the run.
    #[error("Operation cancelled by user")]
    Cancelled,
}

impl FatalError {
    /// Returns the exit category for this error.
    pub fn category(&self) -> ExitCategory {
        match self {
            Self::HtmlResponse => ExitCategory::Authentication,
            Self::ApiRejected(_) => ExitCategory::ApiKey,
            Self::Cancelled => ExitCategory::Cancelled,
            Self::ProgramListUnavailable
            | Self::UnexpectedProgramList(_)
            | Self::Config(_)
            | Self::MissingFile { .. }
            | Self::Export(_) => ExitCategory::General,
        }
    }
}
