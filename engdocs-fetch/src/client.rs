//! HTTP fetch-with-retry.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

use crate::error::{FailureKind, FetchError};
use crate::retry::RetryPolicy;
use crate::source::{FetchSettings, PageSource};

/// User agent string for engdocs.
const USER_AGENT: &str = concat!("engdocs/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Raw Response
// ============================================================================

/// A successful response, body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body bytes.
    pub body: Vec<u8>,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Time spent on the successful attempt.
    pub elapsed: Duration,
}

impl RawResponse {
    /// Creates a 200 response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_type: Some("application/json".to_string()),
            elapsed: Duration::ZERO,
        }
    }

    /// Body as text, invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client with bounded retry, backoff and jittered timeouts.
///
/// Requests are issued one at a time; every pause is a real wait.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Creates a new HTTP client with the standard retry policy.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_policy(RetryPolicy::default())
    }

    /// Creates a new HTTP client with a custom retry policy.
    pub fn with_policy(policy: RetryPolicy) -> Result<Self, FetchError> {
        let inner = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { inner, policy })
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Performs one logical GET.
    ///
    /// `settings.max_retries` is the total number of attempts. Network
    /// errors, timeouts and 4xx/5xx statuses all take the retry path.
    #[instrument(skip(self, settings), fields(url = %url))]
    pub async fn get(
        &self,
        url: &str,
        settings: &FetchSettings,
        silent: bool,
    ) -> Result<RawResponse, FetchError> {
        let max = settings.max_retries;
        if max == 0 {
            if !silent {
                error!(url = %url, "Max retries is 0, request not attempted");
            }
            return Err(FetchError::NoAttempts);
        }

        let mut retry: u32 = 0;
        let mut last: Option<(FailureKind, String)> = None;

        while retry < max {
            let timeout = if retry == 0 {
                settings.timeout
            } else {
                let timeout = self.policy.timeout_for_retry(settings.timeout, retry);
                let delay = self.policy.delay_for_retry(retry);
                if silent {
                    debug!(retry, max, timeout_secs = timeout.as_secs_f64(), "Retrying");
                } else {
                    info!(
                        "Retry attempt {}/{} with timeout {:.1}s...",
                        retry,
                        max,
                        timeout.as_secs_f64()
                    );
                }
                tokio::time::sleep(delay).await;
                timeout
            };

            match self.attempt(url, timeout).await {
                Ok(response) => {
                    if retry > 0 {
                        info!("Successfully retrieved data after {} attempts", retry + 1);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    retry += 1;
                    let kind = FailureKind::classify(&e);

                    if !silent && (retry == 1 || retry == max) {
                        error!("Error accessing URL: {}", url);
                        error!("Error details: {} ({})", e, kind);
                        for hint in kind.hints() {
                            error!("{}", hint);
                        }
                    }

                    if retry < max && !silent {
                        info!(
                            "Will retry in {} seconds... ({}/{})",
                            self.policy.delay_for_retry(retry).as_secs(),
                            retry,
                            max
                        );
                    }

                    last = Some((kind, e.to_string()));
                }
            }
        }

        let (kind, message) = last.unwrap_or((FailureKind::Other, String::new()));
        if !silent {
            error!("Failed to retrieve data after {} attempts", max);
            error!("Last error: {}", message);
        }
        Err(FetchError::Exhausted {
            attempts: max,
            kind,
            message,
        })
    }

    async fn attempt(&self, url: &str, timeout: Duration) -> Result<RawResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self
            .inner
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "Response received");

        Ok(RawResponse {
            status,
            body,
            content_type,
            elapsed: start.elapsed(),
        })
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch(
        &self,
        url: &str,
        settings: &FetchSettings,
        silent: bool,
    ) -> Result<RawResponse, FetchError> {
        self.get(url, settings, silent).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.policy().max_delay, Duration::from_secs(30));
    }

    #[test]
    fn test_raw_response_text_is_lossy() {
        let response = RawResponse::ok(vec![b'{', 0xFF, b'}']);
        assert_eq!(response.text(), "{\u{FFFD}}");
    }

    #[tokio::test]
    async fn test_zero_retries_makes_no_request() {
        let client = HttpClient::new().unwrap();
        let settings = FetchSettings::new(Duration::from_secs(1), 0);
        let result = client.get("http://127.0.0.1:9/never", &settings, true).await;
        assert!(matches!(result, Err(FetchError::NoAttempts)));
    }
}
