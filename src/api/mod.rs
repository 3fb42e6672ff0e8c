//! HTTP API for the activity picker.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/users` - List the names a selection can be made for
//! - `POST /api/select` - Pick tasks, exercises and a bonus task
//! - `GET /api/select/:user/summary` - Same pick, rendered as plain text

mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
pub use types::*;
