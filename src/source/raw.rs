//! Lenient row decoding shared by every source.
//!
//! Rows are read as JSON objects. Each record field has a priority list of
//! column names, matched case-insensitively; the first column holding a
//! non-blank value wins. A row without its name field is dropped.

use serde_json::{Map, Value};

use crate::activity::{ExerciseRecord, TaskRecord};
use crate::util::{cell_count, cell_text};

const TASK_NAME: &[&str] = &["name", "task"];
const TASK_DURATION: &[&str] = &["duration", "minutes"];
const TASK_DESCRIPTION: &[&str] = &["description"];

const EXERCISE_NAME: &[&str] = &["exercise", "name"];
const EXERCISE_SETS: &[&str] = &["sets"];
const EXERCISE_INSTRUCTIONS: &[&str] = &["instructions"];
const EXERCISE_VIDEO: &[&str] = &["video", "video_url"];

/// A task row as it came out of the store.
#[derive(Debug, Clone, Default)]
pub struct RawTask {
    pub name: Option<Value>,
    pub duration: Option<Value>,
    pub description: Option<Value>,
}

impl RawTask {
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            name: column(row, TASK_NAME),
            duration: column(row, TASK_DURATION),
            description: column(row, TASK_DESCRIPTION),
        }
    }

    /// `None` when the name is missing or blank. Missing numbers become 0.
    pub fn into_record(self) -> Option<TaskRecord> {
        let name = cell_text(self.name.as_ref())?;
        Some(TaskRecord {
            name,
            duration: cell_count(self.duration.as_ref()).unwrap_or(0),
            description: cell_text(self.description.as_ref()).unwrap_or_default(),
        })
    }
}

/// An exercise row as it came out of the store.
#[derive(Debug, Clone, Default)]
pub struct RawExercise {
    pub exercise: Option<Value>,
    pub sets: Option<Value>,
    pub instructions: Option<Value>,
    pub video: Option<Value>,
}

impl RawExercise {
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            exercise: column(row, EXERCISE_NAME),
            sets: column(row, EXERCISE_SETS),
            instructions: column(row, EXERCISE_INSTRUCTIONS),
            video: column(row, EXERCISE_VIDEO),
        }
    }

    /// `None` when the exercise name is missing or blank.
    pub fn into_record(self) -> Option<ExerciseRecord> {
        let exercise = cell_text(self.exercise.as_ref())?;
        Some(ExerciseRecord {
            exercise,
            sets: cell_count(self.sets.as_ref()).unwrap_or(0),
            instructions: cell_text(self.instructions.as_ref()).unwrap_or_default(),
            video: cell_text(self.video.as_ref()),
        })
    }
}

/// First non-blank value among `names`, in priority order.
fn column(row: &Map<String, Value>, names: &[&str]) -> Option<Value> {
    names.iter().find_map(|name| {
        row.iter()
            .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
            .find(|value| !is_blank(value))
            .cloned()
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Decode task rows, dropping anything that is not a named object.
pub(crate) fn decode_tasks(store: &str, rows: Vec<Value>) -> Vec<TaskRecord> {
    decode(store, "task", rows, |row| RawTask::from_row(row).into_record())
}

/// Decode exercise rows, dropping anything that is not a named object.
pub(crate) fn decode_exercises(store: &str, rows: Vec<Value>) -> Vec<ExerciseRecord> {
    decode(store, "exercise", rows, |row| {
        RawExercise::from_row(row).into_record()
    })
}

fn decode<T>(
    store: &str,
    what: &str,
    rows: Vec<Value>,
    convert: impl Fn(&Map<String, Value>) -> Option<T>,
) -> Vec<T> {
    let total = rows.len();
    let records: Vec<T> = rows
        .iter()
        .filter_map(Value::as_object)
        .filter_map(convert)
        .collect();
    if records.len() < total {
        tracing::debug!(
            "Dropped {} of {} {} rows from {} (missing name)",
            total - records.len(),
            total,
            what,
            store
        );
    }
    records
}
