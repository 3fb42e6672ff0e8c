//! Activity module - records, the selection engine, and the picker service.
//!
//! Layering:
//! - `record`: immutable task/exercise records and the selection result
//! - `selection`: pure random selection over in-memory pools
//! - `picker`: one request = fetch pools from a source, then select
//! - `summary`: plain-text rendering of a selection

pub mod picker;
mod record;
pub mod selection;
mod summary;

pub use picker::{ActivityPicker, Pick};
pub use record::{ExerciseRecord, SelectionResult, TaskRecord};
pub use selection::{select_activities, MAX_SELECTED};
pub use summary::render_summary;
