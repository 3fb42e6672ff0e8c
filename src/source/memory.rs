//! In-memory source (fixed pools).

use async_trait::async_trait;

use super::{ActivitySource, SourceError};
use crate::activity::{ExerciseRecord, TaskRecord};

/// Serves clones of fixed pools.
///
/// Optionally fails every fetch, to exercise the unavailable path.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tasks: Vec<TaskRecord>,
    exercises: Vec<ExerciseRecord>,
    offline: bool,
}

impl InMemorySource {
    pub fn new(tasks: Vec<TaskRecord>, exercises: Vec<ExerciseRecord>) -> Self {
        Self {
            tasks,
            exercises,
            offline: false,
        }
    }

    /// A source whose every fetch fails with `SourceError::Unavailable`.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ActivitySource for InMemorySource {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        if self.offline {
            return Err(SourceError::unavailable("memory", "source is offline"));
        }
        Ok(self.tasks.clone())
    }

    async fn fetch_exercises(&self) -> Result<Vec<ExerciseRecord>, SourceError> {
        if self.offline {
            return Err(SourceError::unavailable("memory", "source is offline"));
        }
        Ok(self.exercises.clone())
    }
}
