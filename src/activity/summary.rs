//! Plain-text rendering of a selection.

use std::fmt::Write;

use super::record::{ExerciseRecord, SelectionResult, TaskRecord};

/// Render a selection as the numbered listing shown to the user.
pub fn render_summary(user: &str, selection: &SelectionResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "For {}", user);
    for (i, task) in selection.selected_tasks.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, task_line(task));
    }

    if !selection.selected_exercises.is_empty() {
        let _ = writeln!(out, "\nExercises");
        for (i, exercise) in selection.selected_exercises.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, exercise_line(exercise));
        }
    }

    let _ = writeln!(out, "\nRandom Task");
    match &selection.bonus_task {
        Some(task) => {
            let _ = writeln!(out, "- {}", task_line(task));
        }
        None => {
            let _ = writeln!(out, "No random task available.");
        }
    }

    out
}

fn task_line(task: &TaskRecord) -> String {
    format!("{} ({} minutes) - {}", task.name, task.duration, task.description)
}

fn exercise_line(exercise: &ExerciseRecord) -> String {
    let mut line = format!(
        "{} ({} sets) - {}",
        exercise.exercise, exercise.sets, exercise.instructions
    );
    if let Some(video) = &exercise.video {
        line.push_str(&format!(" [{}]", video));
    }
    line
}
