//! Program (account/project) types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One account/project in the upstream catalogue.
///
/// Every feed is fetched once per program, in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Identifier used in the `programID` filter.
    #[serde(rename = "programID", deserialize_with = "lenient_string")]
    pub program_id: String,
    /// Short code.
    #[serde(rename = "programCode", default, deserialize_with = "lenient_string")]
    pub program_code: String,
    /// Description.
    #[serde(rename = "program", default, deserialize_with = "lenient_string")]
    pub program: String,
    /// Optional display name.
    #[serde(
        rename = "programName",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub program_name: Option<String>,
}

impl Program {
    /// Creates a program without a display name.
    pub fn new(
        program_id: impl Into<String>,
        program_code: impl Into<String>,
        program: impl Into<String>,
    ) -> Self {
        Self {
            program_id: program_id.into(),
            program_code: program_code.into(),
            program: program.into(),
            program_name: None,
        }
    }

    /// Label used in progress lines: the display name, else the ID.
    pub fn label(&self) -> &str {
        self.program_name.as_deref().unwrap_or(&self.program_id)
    }
}

/// The catalogue sometimes carries numeric IDs; keep them as their decimal text.
fn value_to_string(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("expected a string or number, got {other}")),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_string(value)
        .map(Option::unwrap_or_default)
        .map_err(serde::de::Error::custom)
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_string(value).map_err(serde::de::Error::custom)
}
