//! Local JSON file source.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::raw::{decode_exercises, decode_tasks};
use super::{ActivitySource, SourceError};
use crate::activity::{ExerciseRecord, TaskRecord};

const KIND: &str = "file";

/// On-disk layout: `{"tasks": [...], "exercises": [...]}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PoolFile {
    tasks: Vec<Value>,
    exercises: Vec<Value>,
}

/// Reads both pools from one JSON file.
///
/// The file is read again on every fetch, so edits show up on the next
/// selection without a restart.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<PoolFile, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::unavailable(KIND, format!("cannot read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            SourceError::invalid_payload(KIND, format!("{}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ActivitySource for FileSource {
    fn kind(&self) -> &'static str {
        KIND
    }

    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        let file = self.load().await?;
        Ok(decode_tasks(KIND, file.tasks))
    }

    async fn fetch_exercises(&self) -> Result<Vec<ExerciseRecord>, SourceError> {
        let file = self.load().await?;
        Ok(decode_exercises(KIND, file.exercises))
    }
}
