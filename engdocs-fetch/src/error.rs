//! Fetch error types.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Failure Kind
// ============================================================================

/// Category of a failed attempt, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server dropped the connection.
    ConnectionReset,
    /// Connect or read timed out.
    Timeout,
    /// Could not connect at all.
    Connection,
    /// The server answered with an error status.
    Status(u16),
    /// Anything else.
    Other,
}

impl FailureKind {
    /// Classifies a reqwest error.
    pub fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        if let Some(status) = error.status() {
            return Self::Status(status.as_u16());
        }
        if is_connection_reset(error) {
            return Self::ConnectionReset;
        }
        if error.is_connect() || error.is_request() {
            return Self::Connection;
        }
        Self::Other
    }

    /// Remediation lines logged for this kind.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::ConnectionReset => &[
                "Connection was interrupted by the server.",
                "Possible causes: network instability, server overload, or insufficient timeout.",
            ],
            Self::Timeout => &[
                "Request timed out. The server is taking too long to respond.",
                "Consider increasing API_TIMEOUT in .env file.",
            ],
            Self::Connection => &["Connection error. Check network connectivity and VPN status."],
            Self::Status(_) | Self::Other => &[],
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionReset => f.write_str("connection reset"),
            Self::Timeout => f.write_str("timeout"),
            Self::Connection => f.write_str("connection error"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Other => f.write_str("request error"),
        }
    }
}

fn is_connection_reset(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        let text = err.to_string().to_lowercase();
        if text.contains("connection reset") || text.contains("connection closed") {
            return true;
        }
        source = err.source();
    }
    false
}

// ============================================================================
// Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt failed.
    #[error("Failed to retrieve data after {attempts} attempts ({kind}): {message}")]
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// Category of the last failure.
        kind: FailureKind,
        /// Last error message.
        message: String,
    },

    /// The retry budget was zero, so nothing was requested.
    #[error("No attempts allowed (max retries is 0)")]
    NoAttempts,

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
