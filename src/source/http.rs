//! Remote function source: one JSON endpoint per pool.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::raw::{decode_exercises, decode_tasks};
use super::{http_client, ActivitySource, SourceError};
use crate::activity::{ExerciseRecord, TaskRecord};

const KIND: &str = "http";

/// Reads pools from two HTTP endpoints.
///
/// Each endpoint answers `GET` with a JSON array of rows, or with an object
/// holding that array under the pool name (`tasks` / `exercises`) or `records`.
pub struct HttpSource {
    client: Client,
    tasks_url: Url,
    exercises_url: Url,
}

impl HttpSource {
    pub fn new(tasks_url: Url, exercises_url: Url, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client(KIND, timeout)?,
            tasks_url,
            exercises_url,
        })
    }

    /// Fetch one endpoint and return its rows.
    async fn fetch_rows(&self, url: &Url, pool: &str) -> Result<Vec<Value>, SourceError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::unavailable(KIND, format!("request to {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| SourceError::invalid_payload(KIND, format!("{} body is not JSON: {}", pool, e)))?;
        extract_rows(body, pool)
    }
}

#[async_trait]
impl ActivitySource for HttpSource {
    fn kind(&self) -> &'static str {
        KIND
    }

    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        let rows = self.fetch_rows(&self.tasks_url, "tasks").await?;
        Ok(decode_tasks(KIND, rows))
    }

    async fn fetch_exercises(&self) -> Result<Vec<ExerciseRecord>, SourceError> {
        let rows = self.fetch_rows(&self.exercises_url, "exercises").await?;
        Ok(decode_exercises(KIND, rows))
    }
}

fn status_error(status: StatusCode, text: &str) -> SourceError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        SourceError::unavailable(KIND, format!("authentication rejected ({})", status))
    } else {
        SourceError::unavailable(KIND, format!("{} - {}", status, text.trim()))
    }
}

/// Accept a bare array, or an object wrapping it under `pool` or `records`.
fn extract_rows(body: Value, pool: &str) -> Result<Vec<Value>, SourceError> {
    match body {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove(pool).or_else(|| map.remove("records")) {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(SourceError::invalid_payload(
                KIND,
                format!("expected an array under \"{}\"", pool),
            )),
        },
        other => Err(SourceError::invalid_payload(
            KIND,
            format!("expected an array of {}, got {}", pool, json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
