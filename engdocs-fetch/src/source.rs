//! The fetch seam used by the enumerator and the collector.

use async_trait::async_trait;
use std::time::Duration;

use crate::client::RawResponse;
use crate::error::FetchError;
use crate::retry::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Timeout and retry budget for one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    /// Timeout of the first attempt.
    pub timeout: Duration,
    /// Total number of attempts.
    pub max_retries: u32,
}

impl FetchSettings {
    /// Creates settings.
    pub fn new(timeout: Duration, max_retries: u32) -> Self {
        Self {
            timeout,
            max_retries,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_MAX_RETRIES)
    }
}

/// Something that can perform one logical GET with its own retry budget.
///
/// [`crate::HttpClient`] is the network implementation; tests script pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url`. `silent` suppresses per-attempt diagnostics, never the
    /// final failure.
    async fn fetch(
        &self,
        url: &str,
        settings: &FetchSettings,
        silent: bool,
    ) -> Result<RawResponse, FetchError>;
}
