//! # Activity Picker
//!
//! Picks a handful of tasks and exercises for the day.
//!
//! This library provides:
//! - Task/exercise records and a pure, RNG-injected selection engine
//! - Pluggable backing stores (HTTP endpoints, a spreadsheet, a JSON file)
//! - An HTTP API the UI calls once per user action
//!
//! ## Request Flow
//! 1. The UI posts the selected user name to `/api/select`
//! 2. Both pools are fetched fresh from the configured source
//! 3. Up to five tasks, up to five exercises and one bonus task are drawn
//! 4. The selection is returned; nothing is stored
//!
//! ## Modules
//! - `activity`: records, selection engine, picker service, text summary
//! - `source`: backing store adapters
//! - `api`: axum routes
//! - `config`: environment configuration

pub mod activity;
pub mod api;
pub mod config;
pub mod source;
pub mod util;

pub use activity::{ActivityPicker, ExerciseRecord, SelectionResult, TaskRecord};
pub use config::Config;
pub use source::{ActivitySource, SourceError};
