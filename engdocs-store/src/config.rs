//! Run configuration from `.env` and the process environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `API_KEY` | required |
//! | `GET_DATA_FROM_QAS` | `True` |
//! | `DATE_INI` | `2010/01/01` |
//! | `DATE_END` | today + 3 months |
//! | `API_TIMEOUT` | `180` |
//! | `MAX_RETRIES` | `5` |
//! | `DEBUG` | `False` |

use chrono::{Local, Months, NaiveDate};
use engdocs_core::{Environment, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::StoreError;

/// Format of `DATE_INI` and `DATE_END`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Base URL of the QAS environment.
pub const QAS_BASE_URL: &str = "https://ft-qas.embraer.com.br/components/systemTest/gtp";

/// Base URL of the Production environment.
pub const PROD_BASE_URL: &str = "https://ft.embraer.com.br/components/systemTest/gtp";

const DEFAULT_DATE_INI: &str = "2010/01/01";

/// Validated run configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API key sent with every request.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// First day of the date filter.
    pub date_ini: NaiveDate,
    /// Last day of the date filter.
    pub date_end: NaiveDate,
    /// Target environment.
    pub environment: Environment,
    /// Whether debug dumps are written.
    pub debug: bool,
    /// Timeout of the first attempt of each request.
    pub timeout: Duration,
    /// Total attempts per request.
    pub max_retries: u32,
}

impl Config {
    /// Loads `.env` (an explicit path, or the first one found walking up from
    /// the working directory) and validates the environment.
    pub fn load(env_file: Option<&Path>) -> Result<Self, StoreError> {
        let loaded: Result<PathBuf, dotenvy::Error> = match env_file {
            Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };

        match loaded {
            Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => {
                error!("Error: .env file not found. Please create a .env file with required environment variables.");
                error!("Required variables: API_KEY, DATE_INI");
                error!("Optional variables: DATE_END, GET_DATA_FROM_QAS, DEBUG, API_TIMEOUT, MAX_RETRIES");
                return Err(StoreError::MissingFile {
                    path: env_file.map_or_else(|| ".env".to_string(), |p| p.display().to_string()),
                    purpose: "environment configuration".to_string(),
                });
            }
            Err(e) => return Err(StoreError::Config(format!("cannot read .env file: {e}"))),
        }

        Self::from_vars(|key| std::env::var(key).ok(), Local::now().date_naive())
    }

    /// Validates configuration from a variable lookup.
    ///
    /// `today` anchors the default end date.
    pub fn from_vars<F>(lookup: F, today: NaiveDate) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY").unwrap_or_default().trim().to_string();
        if api_key.is_empty() {
            error!("Error: API_KEY is not defined in the .env file");
            error!("Please add: API_KEY=your_api_key_here");
            return Err(StoreError::Config("API_KEY is not defined".to_string()));
        }

        let environment = if lookup("GET_DATA_FROM_QAS")
            .unwrap_or_else(|| "True".to_string())
            .eq_ignore_ascii_case("true")
        {
            Environment::Qas
        } else {
            Environment::Production
        };

        let date_ini_text = lookup("DATE_INI").unwrap_or_else(|| DEFAULT_DATE_INI.to_string());
        let date_ini = parse_date(&date_ini_text, "DATE_INI")?;

        let date_end_text = lookup("DATE_END").unwrap_or_default().trim().to_string();
        let date_end = if date_end_text.is_empty() {
            today
                .checked_add_months(Months::new(3))
                .ok_or_else(|| StoreError::Config("default DATE_END is out of range".to_string()))?
        } else {
            parse_date(&date_end_text, "DATE_END")?
        };

        if date_ini > date_end {
            let msg = format!(
                "Start date ({}) must be before or equal to end date ({})",
                format_date(date_ini),
                format_date(date_end)
            );
            error!("Error: {}", msg);
            return Err(StoreError::Config(msg));
        }

        let timeout = match lookup("API_TIMEOUT") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "Warning: Invalid API_TIMEOUT value '{}'. Using default: {}s",
                        raw, DEFAULT_TIMEOUT_SECS
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
        };

        let max_retries = match lookup("MAX_RETRIES") {
            None => DEFAULT_MAX_RETRIES,
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!(
                    "Warning: Invalid MAX_RETRIES value '{}'. Using default: {}",
                    raw, DEFAULT_MAX_RETRIES
                );
                DEFAULT_MAX_RETRIES
            }),
        };

        let debug = lookup("DEBUG").is_some_and(|v| {
            matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
        });

        Ok(Self {
            api_key,
            date_ini,
            date_end,
            environment,
            debug,
            timeout: Duration::from_secs(timeout),
            max_retries,
        })
    }

    /// Returns a copy targeting `environment`.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Base URL of the configured environment.
    pub fn api_base_url(&self) -> &'static str {
        base_url(self.environment)
    }

    /// `DATE_INI` as sent to the API.
    pub fn date_ini_text(&self) -> String {
        format_date(self.date_ini)
    }

    /// `DATE_END` as sent to the API.
    pub fn date_end_text(&self) -> String {
        format_date(self.date_end)
    }

    /// Logs the configuration summary.
    pub fn log_summary(&self) {
        info!("Environment: {}", self.environment);
        info!("Date range: {} to {}", self.date_ini_text(), self.date_end_text());
        info!("Base URL: {}", self.api_base_url());
        info!(
            "Timeout: {}s, Max retries: {}",
            self.timeout.as_secs(),
            self.max_retries
        );
        info!("Debug mode: {}", if self.debug { "Enabled" } else { "Disabled" });
    }
}

/// Base URL of `environment`.
pub fn base_url(environment: Environment) -> &'static str {
    match environment {
        Environment::Qas => QAS_BASE_URL,
        Environment::Production => PROD_BASE_URL,
    }
}

fn parse_date(text: &str, field: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        let msg = format!("Invalid {field} format. '{text}' is not in YYYY/MM/DD format.");
        error!("Error: {}", msg);
        StoreError::Config(msg)
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[("API_KEY", "  abc  ")]), today()).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.environment, Environment::Qas);
        assert_eq!(config.api_base_url(), QAS_BASE_URL);
        assert_eq!(config.date_ini_text(), "2010/01/01");
        assert_eq!(config.date_end_text(), "2026/02/28");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!(!config.debug);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(
            vars(&[
                ("API_KEY", "k"),
                ("GET_DATA_FROM_QAS", "False"),
                ("DATE_INI", "2020/01/01"),
                ("DATE_END", "2020/12/31"),
                ("API_TIMEOUT", "300"),
                ("MAX_RETRIES", "0"),
                ("DEBUG", "Yes"),
            ]),
            today(),
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api_base_url(), PROD_BASE_URL);
        assert_eq!(config.date_end_text(), "2020/12/31");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.max_retries, 0);
        assert!(config.debug);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = Config::from_vars(
            vars(&[("API_KEY", "k"), ("API_TIMEOUT", "0"), ("MAX_RETRIES", "-1")]),
            today(),
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(180));
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_fatal_values() {
        assert!(matches!(
            Config::from_vars(vars(&[]), today()),
            Err(StoreError::Config(_))
        ));
        assert!(Config::from_vars(vars(&[("API_KEY", "k"), ("DATE_INI", "2020-01-01")]), today()).is_err());
        assert!(Config::from_vars(
            vars(&[("API_KEY", "k"), ("DATE_INI", "2021/01/01"), ("DATE_END", "2020/01/01")]),
            today()
        )
        .is_err());
    }

    #[test]
    fn test_environment_override() {
        let config = Config::from_vars(vars(&[("API_KEY", "k")]), today())
            .unwrap()
            .with_environment(Environment::Production);
        assert_eq!(config.api_base_url(), PROD_BASE_URL);
    }
}
