//! Connectivity probe run before every collection.

use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::client::RawResponse;
use crate::programs::program_list_url;
use crate::source::{FetchSettings, PageSource};

/// Timeout of the quick test.
pub const QUICK_TEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Attempts of the quick test.
pub const QUICK_TEST_RETRIES: u32 = 1;

/// Which stage answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    /// The quick test succeeded.
    Quick,
    /// Only the full-settings test succeeded.
    Full,
    /// Neither test succeeded.
    Unreachable,
}

/// Result of a probe.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Stage that answered.
    pub stage: ProbeStage,
    /// HTTP status of the answering request.
    pub status_code: Option<u16>,
    /// Time of the answering request.
    pub elapsed: Option<Duration>,
    /// Content type of the answer.
    pub content_type: Option<String>,
}

impl ProbeResult {
    /// Whether the API answered at all.
    pub fn success(&self) -> bool {
        self.stage != ProbeStage::Unreachable
    }

    fn answered(stage: ProbeStage, response: &RawResponse) -> Self {
        Self {
            stage,
            status_code: Some(response.status),
            elapsed: Some(response.elapsed),
            content_type: response.content_type.clone(),
        }
    }
}

/// Checks that the program catalogue endpoint answers.
///
/// Runs a quick test first, then one with the configured settings. A failing
/// probe is reported, never fatal.
#[derive(Debug, Clone)]
pub struct Probe {
    base_url: String,
    api_key: String,
    environment: String,
    debug: bool,
}

impl Probe {
    /// Creates a probe for `base_url`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            environment: "Unknown".to_string(),
            debug: false,
        }
    }

    /// Sets the environment label shown in diagnostics.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Sets the debug flag shown in diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Host part of the base URL.
    pub fn domain(&self) -> String {
        Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Executes the probe.
    #[instrument(skip_all)]
    pub async fn check<S: PageSource + ?Sized>(
        &self,
        source: &S,
        settings: &FetchSettings,
    ) -> ProbeResult {
        info!("Testing API connectivity...");
        let url = program_list_url(&self.base_url, &self.api_key);
        let domain = self.domain();

        info!("Performing quick connectivity test to {}...", domain);
        let quick = FetchSettings::new(QUICK_TEST_TIMEOUT, QUICK_TEST_RETRIES);
        if let Ok(response) = source.fetch(&url, &quick, true).await {
            info!("Connection test successful (quick response)");
            info!("  Server responded within {} seconds", QUICK_TEST_TIMEOUT.as_secs());
            log_response(&response);
            return ProbeResult::answered(ProbeStage::Quick, &response);
        }

        info!("Quick test failed. Trying with full timeout settings...");
        info!("  Timeout: {} seconds", settings.timeout.as_secs());
        info!("  Max retries: {}", settings.max_retries);
        if let Ok(response) = source.fetch(&url, settings, true).await {
            info!("Connection test successful with extended timeout");
            info!("  Network is functional but may be experiencing delays");
            info!("  Server load, network latency or a slow VPN link are likely causes");
            log_response(&response);
            return ProbeResult::answered(ProbeStage::Full, &response);
        }

        warn!("Connection test failed");
        self.diagnostics(&domain, settings);
        ProbeResult {
            stage: ProbeStage::Unreachable,
            status_code: None,
            elapsed: None,
            content_type: None,
        }
    }

    fn diagnostics(&self, domain: &str, settings: &FetchSettings) {
        info!("Diagnostic Information:");
        info!("Connection Details:");
        info!("  API Domain: {}", domain);
        info!("  Environment: {}", self.environment);
        info!("  Base URL: {}", self.base_url);
        info!("Configuration:");
        info!("  Timeout: {} seconds", settings.timeout.as_secs());
        info!("  Max retries: {}", settings.max_retries);
        info!(
            "  Debug mode: {}",
            if self.debug { "Enabled" } else { "Disabled" }
        );
        info!("Possible Issues:");
        info!("  1. VPN connection is down or unstable");
        info!("  2. Server under maintenance or heavy load");
        info!("  3. Firewall or proxy configuration");
        info!("  4. API_KEY does not match the environment (QAS vs Production)");
        info!("Recommended Actions:");
        info!("  1. Verify VPN connection is active");
        info!("  2. Increase timeout in .env file: API_TIMEOUT=300");
        info!("  3. Increase retry attempts: MAX_RETRIES=10");
        info!("  4. Try again during off-peak hours");
    }
}

fn log_response(response: &RawResponse) {
    info!("  HTTP Status: {}", response.status);
    info!("  Response time: {:.2} seconds", response.elapsed.as_secs_f64());
    info!(
        "  Content-Type: {}",
        response.content_type.as_deref().unwrap_or("Unknown")
    );
    debug!(bytes = response.body.len(), "Probe response size");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSource;

    #[test]
    fn test_domain() {
        let probe = Probe::new("https://ft-qas.example.com/components/systemTest/gtp", "k");
        assert_eq!(probe.domain(), "ft-qas.example.com");
        assert_eq!(Probe::new("not a url", "k").domain(), "");
    }

    #[tokio::test]
    async fn test_quick_stage() {
        let source = ScriptedSource::new().body("[]");
        let result = Probe::new("https://h/gtp", "k")
            .check(&source, &FetchSettings::default())
            .await;
        assert_eq!(result.stage, ProbeStage::Quick);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_full_stage_then_unreachable() {
        let source = ScriptedSource::new().failure().body("[]");
        let result = Probe::new("https://h/gtp", "k")
            .check(&source, &FetchSettings::default())
            .await;
        assert_eq!(result.stage, ProbeStage::Full);

        let source = ScriptedSource::new().failure().failure();
        let result = Probe::new("https://h/gtp", "k")
            .check(&source, &FetchSettings::default())
            .await;
        assert!(!result.success());
        assert_eq!(source.settings()[0], FetchSettings::new(QUICK_TEST_TIMEOUT, 1));
    }
}
