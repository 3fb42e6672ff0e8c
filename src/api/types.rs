//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to pick activities.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectRequest {
    /// One of the configured user names
    #[serde(default)]
    pub user: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Configured backing store (`file`, `http`, `sheet`)
    pub source: String,
}

/// Users the picker can select for.
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<String>,
}
