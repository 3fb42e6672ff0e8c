//! Data sources for task and exercise pools.
//!
//! Supports:
//! - `http`: a remote function exposing one JSON endpoint per pool
//! - `sheet`: a spreadsheet read through the Google Sheets values API
//! - `file`: a local JSON file, re-read on every fetch
//! - `memory`: fixed pools (tests, demos)
//!
//! Every backend decodes leniently: rows without their name field are
//! dropped, never reported.

mod file;
mod http;
mod memory;
mod raw;
mod sheet;

pub use file::FileSource;
pub use http::HttpSource;
pub use memory::InMemorySource;
pub use raw::{RawExercise, RawTask};
pub use sheet::SheetSource;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::activity::{ExerciseRecord, TaskRecord};
use crate::config::SourceConfig;

/// Error from a backing store.
///
/// Every variant means "the store could not produce a pool"; callers show a
/// generic failure and do not retry.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Store unreachable, refused the request, or rejected the credentials
    #[error("{store} unavailable: {message}")]
    Unavailable {
        store: &'static str,
        message: String,
    },

    /// Store answered, but not with the expected JSON shape
    #[error("{store} returned an invalid payload: {message}")]
    InvalidPayload {
        store: &'static str,
        message: String,
    },
}

impl SourceError {
    pub fn unavailable(store: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            store,
            message: message.into(),
        }
    }

    pub fn invalid_payload(store: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            store,
            message: message.into(),
        }
    }
}

/// Backing store contract - implemented by all sources.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Short label used in logs and the health endpoint.
    fn kind(&self) -> &'static str;

    /// Fetch the task pool.
    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, SourceError>;

    /// Fetch the exercise pool.
    async fn fetch_exercises(&self) -> Result<Vec<ExerciseRecord>, SourceError>;
}

pub type SourceRef = Arc<dyn ActivitySource>;

/// Build the configured source.
pub fn from_config(config: &SourceConfig, timeout: Duration) -> Result<SourceRef, SourceError> {
    let source: SourceRef = match config {
        SourceConfig::File { path } => Arc::new(FileSource::new(path.clone())),
        SourceConfig::Http {
            tasks_url,
            exercises_url,
        } => Arc::new(HttpSource::new(
            tasks_url.clone(),
            exercises_url.clone(),
            timeout,
        )?),
        SourceConfig::Sheet {
            api_base,
            sheet_id,
            api_key,
            tasks_range,
            exercises_range,
        } => Arc::new(SheetSource::new(
            api_base.clone(),
            sheet_id.clone(),
            api_key.clone(),
            tasks_range.clone(),
            exercises_range.clone(),
            timeout,
        )?),
    };
    tracing::info!("Activity source: {}", source.kind());
    Ok(source)
}

/// Build a `reqwest` client for a remote source.
fn http_client(store: &'static str, timeout: Duration) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("activity_picker/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SourceError::unavailable(store, format!("failed to build HTTP client: {}", e)))
}
