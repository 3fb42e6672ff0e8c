//! Spreadsheet source backed by the Google Sheets v4 values API.
//!
//! Each pool lives in its own range (usually a whole tab). The first row of a
//! range is the header; columns are matched to record fields by lowercased
//! header text, so column order does not matter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::raw::{decode_exercises, decode_tasks};
use super::{http_client, ActivitySource, SourceError};
use crate::activity::{ExerciseRecord, TaskRecord};

const KIND: &str = "sheet";

/// Response body of `spreadsheets.values.get`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    /// Absent when the range is empty
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Reads pools from two ranges of one spreadsheet.
pub struct SheetSource {
    client: Client,
    api_base: String,
    sheet_id: String,
    api_key: String,
    tasks_range: String,
    exercises_range: String,
}

impl SheetSource {
    pub fn new(
        api_base: String,
        sheet_id: String,
        api_key: String,
        tasks_range: String,
        exercises_range: String,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client(KIND, timeout)?,
            api_base: api_base.trim_end_matches('/').to_string(),
            sheet_id,
            api_key,
            tasks_range,
            exercises_range,
        })
    }

    /// URL of the values endpoint for a range.
    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            urlencoding::encode(&self.sheet_id),
            urlencoding::encode(range)
        )
    }

    /// Fetch a range and turn its data rows into JSON objects keyed by header.
    async fn fetch_range(&self, range: &str) -> Result<Vec<Value>, SourceError> {
        let resp = self
            .client
            .get(self.values_url(range))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::unavailable(KIND, format!("request for range {} failed: {}", range, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                SourceError::unavailable(KIND, format!("authentication rejected ({})", status))
            } else {
                SourceError::unavailable(KIND, format!("range {}: {} - {}", range, status, text.trim()))
            });
        }

        let body: ValueRange = resp
            .json()
            .await
            .map_err(|e| SourceError::invalid_payload(KIND, format!("range {}: {}", range, e)))?;
        Ok(rows_to_objects(body.values))
    }
}

#[async_trait]
impl ActivitySource for SheetSource {
    fn kind(&self) -> &'static str {
        KIND
    }

    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        let rows = self.fetch_range(&self.tasks_range).await?;
        Ok(decode_tasks(KIND, rows))
    }

    async fn fetch_exercises(&self) -> Result<Vec<ExerciseRecord>, SourceError> {
        let rows = self.fetch_range(&self.exercises_range).await?;
        Ok(decode_exercises(KIND, rows))
    }
}

/// Zip each data row with the header row.
///
/// Trailing empty cells are omitted by the API, so short rows simply lack
/// those keys. Cells beyond the header are ignored.
fn rows_to_objects(values: Vec<Vec<Value>>) -> Vec<Value> {
    let mut rows = values.into_iter();
    let header: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| match cell {
                Value::String(s) => s.trim().to_lowercase(),
                other => other.to_string().to_lowercase(),
            })
            .collect(),
        None => return Vec::new(),
    };

    rows.map(|row| {
        let object: Map<String, Value> = header
            .iter()
            .zip(row)
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, cell)| (key.clone(), cell))
            .collect();
        Value::Object(object)
    })
    .collect()
}
