//! Configuration management for the activity picker.
//!
//! Configuration is set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `PICKER_USERS` - Optional. Comma-separated user names. Defaults to `Preston,Isaac`.
//! - `SELECTION_SEED` - Optional. Seeds every selection (reproducible picks).
//! - `SOURCE_TIMEOUT_SECS` - Optional. Timeout for remote sources. Defaults to `10`.
//! - `ACTIVITY_SOURCE` - Optional. `file` (default), `http` or `sheet`.
//!
//! `file` source:
//! - `ACTIVITY_FILE` - Optional. Defaults to `activities.json`.
//!
//! `http` source:
//! - `ACTIVITY_TASKS_URL` - Required. Endpoint returning the task rows.
//! - `ACTIVITY_EXERCISES_URL` - Required. Endpoint returning the exercise rows.
//!
//! `sheet` source:
//! - `SHEET_ID` - Required. Spreadsheet id.
//! - `SHEET_API_KEY` - Required. API key with read access.
//! - `SHEET_TASKS_RANGE` - Optional. Defaults to `Tasks`.
//! - `SHEET_EXERCISES_RANGE` - Optional. Defaults to `Exercises`.
//! - `SHEETS_API_BASE` - Optional. Defaults to `https://sheets.googleapis.com`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::util::split_list;

/// Users offered by default.
pub const DEFAULT_USERS: &[&str] = &["Preston", "Isaac"];

const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the task and exercise pools come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Local JSON file
    File { path: PathBuf },

    /// Remote function, one endpoint per pool
    Http { tasks_url: Url, exercises_url: Url },

    /// Spreadsheet, one range per pool
    Sheet {
        api_base: String,
        sheet_id: String,
        api_key: String,
        tasks_range: String,
        exercises_range: String,
    },
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Names offered to the user; a selection is only made for one of these
    pub users: Vec<String>,

    /// Fixed seed for every selection (testing and demos)
    pub selection_seed: Option<u64>,

    /// Timeout for remote source requests
    pub source_timeout: Duration,

    /// Backing store configuration
    pub source: SourceConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when the selected source lacks a
    /// required variable, and `ConfigError::InvalidValue` for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let users = match lookup("PICKER_USERS") {
            Some(value) => split_list(&value),
            None => DEFAULT_USERS.iter().map(|s| s.to_string()).collect(),
        };
        if users.is_empty() {
            return Err(ConfigError::InvalidValue(
                "PICKER_USERS".to_string(),
                "at least one user is required".to_string(),
            ));
        }

        let selection_seed = lookup("SELECTION_SEED")
            .map(|v| {
                v.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("SELECTION_SEED".to_string(), format!("{}", e))
                })
            })
            .transpose()?;

        let timeout_secs: u64 = lookup("SOURCE_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("SOURCE_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        let source = source_from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            users,
            selection_seed,
            source_timeout: Duration::from_secs(timeout_secs.max(1)),
            source,
        })
    }

    /// Create a config for a local pool file (useful for testing).
    pub fn new(path: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            users: DEFAULT_USERS.iter().map(|s| s.to_string()).collect(),
            selection_seed: None,
            source_timeout: Duration::from_secs(10),
            source: SourceConfig::File { path },
        }
    }

    /// Whether `name` is one of the configured users.
    pub fn is_known_user(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }
}

fn source_from_lookup<F>(lookup: &F) -> Result<SourceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &str| lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));
    let url = |name: &str| -> Result<Url, ConfigError> {
        let raw = required(name)?;
        let parsed = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(
                name.to_string(),
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }
        Ok(parsed)
    };

    let kind = lookup("ACTIVITY_SOURCE").unwrap_or_else(|| "file".to_string());
    match kind.trim().to_lowercase().as_str() {
        "file" => Ok(SourceConfig::File {
            path: lookup("ACTIVITY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("activities.json")),
        }),
        "http" => Ok(SourceConfig::Http {
            tasks_url: url("ACTIVITY_TASKS_URL")?,
            exercises_url: url("ACTIVITY_EXERCISES_URL")?,
        }),
        "sheet" => Ok(SourceConfig::Sheet {
            api_base: lookup("SHEETS_API_BASE")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
            sheet_id: required("SHEET_ID")?,
            api_key: required("SHEET_API_KEY")?,
            tasks_range: lookup("SHEET_TASKS_RANGE").unwrap_or_else(|| "Tasks".to_string()),
            exercises_range: lookup("SHEET_EXERCISES_RANGE")
                .unwrap_or_else(|| "Exercises".to_string()),
        }),
        other => Err(ConfigError::InvalidValue(
            "ACTIVITY_SOURCE".to_string(),
            format!("unknown source {} (expected file, http or sheet)", other),
        )),
    }
}
