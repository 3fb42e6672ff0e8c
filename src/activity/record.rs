//! Task and exercise records.
//!
//! # Invariants
//! - Records carry no id; identity is structural equality over every field
//! - Records are never mutated after a source hands them out

use serde::{Deserialize, Serialize};

/// A candidate task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Display name (required; rows without one never become records)
    pub name: String,

    /// Expected duration in minutes
    pub duration: u32,

    /// Free-form description
    pub description: String,
}

impl TaskRecord {
    pub fn new(name: impl Into<String>, duration: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration,
            description: description.into(),
        }
    }
}

/// A candidate exercise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Exercise name (required)
    pub exercise: String,

    /// Number of sets
    pub sets: u32,

    /// How to perform it
    pub instructions: String,

    /// Optional demonstration video URL
    pub video: Option<String>,
}

impl ExerciseRecord {
    pub fn new(
        exercise: impl Into<String>,
        sets: u32,
        instructions: impl Into<String>,
        video: Option<String>,
    ) -> Self {
        Self {
            exercise: exercise.into(),
            sets,
            instructions: instructions.into(),
            video,
        }
    }
}

/// Outcome of one selection.
///
/// # Invariants
/// - `selected_tasks.len() <= MAX_SELECTED` and `selected_exercises.len() <= MAX_SELECTED`
/// - `bonus_task`, when present, is not equal to any entry of `selected_tasks`
///
/// Serialized as `{selected_tasks, selected_exercises, random_task}`; an absent
/// bonus task is written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub selected_tasks: Vec<TaskRecord>,

    pub selected_exercises: Vec<ExerciseRecord>,

    #[serde(rename = "random_task")]
    pub bonus_task: Option<TaskRecord>,
}

impl SelectionResult {
    /// True when nothing at all was selected.
    pub fn is_empty(&self) -> bool {
        self.selected_tasks.is_empty()
            && self.selected_exercises.is_empty()
            && self.bonus_task.is_none()
    }
}
