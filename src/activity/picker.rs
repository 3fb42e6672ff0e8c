//! Picker service: fetch fresh pools, then select.

use rand::Rng;
use serde::Serialize;

use super::record::SelectionResult;
use super::selection::select_activities;
use crate::source::{SourceError, SourceRef};

/// A selection labelled with the user it was made for.
///
/// The user name is only a label; it never filters the pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub user: String,

    #[serde(flatten)]
    pub selection: SelectionResult,
}

/// Runs one selection per call against an injected source.
#[derive(Clone)]
pub struct ActivityPicker {
    source: SourceRef,
}

impl ActivityPicker {
    pub fn new(source: SourceRef) -> Self {
        Self { source }
    }

    /// Label of the underlying source.
    pub fn source_kind(&self) -> &'static str {
        self.source.kind()
    }

    /// Fetch both pools and select from them.
    ///
    /// A source failure is returned as is; nothing is retried.
    pub async fn pick<R: Rng + Send + ?Sized>(
        &self,
        user: &str,
        rng: &mut R,
    ) -> Result<Pick, SourceError> {
        let tasks = self.source.fetch_tasks().await.map_err(|e| {
            tracing::warn!("Failed to fetch tasks for {}: {}", user, e);
            e
        })?;
        let exercises = self.source.fetch_exercises().await.map_err(|e| {
            tracing::warn!("Failed to fetch exercises for {}: {}", user, e);
            e
        })?;

        let selection = select_activities(&tasks, &exercises, rng);
        if selection.is_empty() {
            tracing::warn!("Source {} returned no usable rows for {}", self.source_kind(), user);
        }
        tracing::info!(
            "Picked for {}: {}/{} tasks, {}/{} exercises, bonus={}",
            user,
            selection.selected_tasks.len(),
            tasks.len(),
            selection.selected_exercises.len(),
            exercises.len(),
            selection.bonus_task.is_some()
        );

        Ok(Pick {
            user: user.to_string(),
            selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ExerciseRecord, TaskRecord};
    use crate::source::{FileSource, InMemorySource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn picker_with(tasks: usize, exercises: usize) -> ActivityPicker {
        let tasks = (0..tasks)
            .map(|i| TaskRecord::new(format!("task-{}", i), 15, "something"))
            .collect();
        let exercises = (0..exercises)
            .map(|i| ExerciseRecord::new(format!("exercise-{}", i), 3, "reps", None))
            .collect();
        ActivityPicker::new(Arc::new(InMemorySource::new(tasks, exercises)))
    }

    #[tokio::test]
    async fn pick_labels_selection_with_user() {
        let picker = picker_with(8, 6);
        let mut rng = StdRng::seed_from_u64(5);
        let pick = picker.pick("Isaac", &mut rng).await.expect("pick");
        assert_eq!(pick.user, "Isaac");
        assert_eq!(pick.selection.selected_tasks.len(), 5);
        assert_eq!(pick.selection.selected_exercises.len(), 5);
        assert!(pick.selection.bonus_task.is_some());
    }

    #[tokio::test]
    async fn user_name_does_not_change_selection() {
        let picker = picker_with(10, 10);
        let preston = picker
            .pick("Preston", &mut StdRng::seed_from_u64(9))
            .await
            .expect("pick");
        let isaac = picker
            .pick("Isaac", &mut StdRng::seed_from_u64(9))
            .await
            .expect("pick");
        assert_eq!(preston.selection, isaac.selection);
    }

    #[tokio::test]
    async fn source_failure_is_returned() {
        let picker = ActivityPicker::new(Arc::new(InMemorySource::offline()));
        let mut rng = StdRng::seed_from_u64(1);
        let err = picker.pick("Preston", &mut rng).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn empty_source_gives_empty_pick() {
        let picker = picker_with(0, 0);
        let pick = picker
            .pick("Preston", &mut StdRng::seed_from_u64(3))
            .await
            .expect("empty pools are not an error");
        assert!(pick.selection.is_empty());
    }

    #[tokio::test]
    async fn nameless_rows_never_reach_selection_or_bonus() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("activities.json");
        std::fs::write(
            &path,
            r#"{
                "tasks": [
                    {"name": "A", "duration": 5},
                    {"name": "B", "duration": 5},
                    {"name": "C", "duration": 5},
                    {"name": "D", "duration": 5},
                    {"name": "E", "duration": 5},
                    {"duration": 99, "description": "ghost"}
                ],
                "exercises": [{"sets": 3, "instructions": "ghost"}]
            }"#,
        )
        .expect("write pool file");
        let picker = ActivityPicker::new(Arc::new(FileSource::new(path)));

        for seed in 0..20 {
            let pick = picker
                .pick("Preston", &mut StdRng::seed_from_u64(seed))
                .await
                .expect("pick");
            assert_eq!(pick.selection.selected_tasks.len(), 5);
            assert!(pick.selection.selected_tasks.iter().all(|t| t.duration == 5));
            assert!(pick.selection.bonus_task.is_none());
            assert!(pick.selection.selected_exercises.is_empty());
        }
    }

    #[test]
    fn pick_serializes_flat() {
        let pick = Pick {
            user: "Preston".to_string(),
            selection: SelectionResult::default(),
        };
        let json = serde_json::to_value(&pick).expect("serialize");
        assert_eq!(json["user"], "Preston");
        assert!(json["selected_tasks"].as_array().expect("array").is_empty());
        assert!(json["selected_exercises"].as_array().expect("array").is_empty());
        assert!(json["random_task"].is_null());
    }
}
