//! JSON output formatting.

use anyhow::Result;
use engdocs_fetch::{ProbeResult, ProbeStage};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Connectivity probe output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeOutput {
    pub base_url: String,
    pub reachable: bool,
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }

    /// Converts a probe result to its output type.
    pub fn probe_to_output(&self, result: &ProbeResult, base_url: &str) -> ProbeOutput {
        ProbeOutput {
            base_url: base_url.to_string(),
            reachable: result.success(),
            stage: stage_name(result.stage),
            status_code: result.status_code,
            elapsed_ms: result.elapsed.map(|d| d.as_millis()),
            content_type: result.content_type.clone(),
        }
    }

    /// Formats a probe result.
    pub fn format_probe(&self, result: &ProbeResult, base_url: &str) -> Result<String> {
        self.format(&self.probe_to_output(result, base_url))
    }
}

fn stage_name(stage: ProbeStage) -> &'static str {
    match stage {
        ProbeStage::Quick => "quick",
        ProbeStage::Full => "full",
        ProbeStage::Unreachable => "unreachable",
    }
}

// ============================================================================
// Tests
// ============================================================================
