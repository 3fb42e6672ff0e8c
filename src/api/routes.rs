//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::activity::{render_summary, ActivityPicker, Pick};
use crate::config::Config;
use crate::source;

use super::types::*;

/// Body returned whenever the backing store fails.
const FETCH_FAILED: &str = "Failed to retrieve tasks.";

/// Shared application state. Immutable; every request owns its own pools and RNG.
pub struct AppState {
    pub config: Config,
    /// Selection service bound to the configured source
    pub picker: ActivityPicker,
}

impl AppState {
    pub fn new(config: Config, picker: ActivityPicker) -> Self {
        Self { config, picker }
    }

    /// RNG for one request: seeded when configured, otherwise from entropy.
    fn selection_rng(&self) -> StdRng {
        match self.config.selection_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/users", get(list_users))
        .route("/api/select", post(select))
        .route("/api/select/:user/summary", get(select_summary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let source = source::from_config(&config.source, config.source_timeout)?;
    let picker = ActivityPicker::new(source);
    if config.selection_seed.is_some() {
        tracing::warn!("SELECTION_SEED is set; every selection will be identical");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config, picker));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.picker.source_kind().to_string(),
    })
}

/// List the configured user names.
async fn list_users(State(state): State<Arc<AppState>>) -> Json<UsersResponse> {
    Json(UsersResponse {
        users: state.config.users.clone(),
    })
}

/// Pick activities for a user.
async fn select(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<Pick>, (StatusCode, String)> {
    let pick = pick_for(&state, &req.user).await?;
    Ok(Json(pick))
}

/// Pick activities for a user and render them as text.
async fn select_summary(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<String, (StatusCode, String)> {
    let pick = pick_for(&state, &user).await?;
    Ok(render_summary(&pick.user, &pick.selection))
}

async fn pick_for(state: &AppState, user: &str) -> Result<Pick, (StatusCode, String)> {
    let user = user.trim();
    if user.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "User name is required".to_string()));
    }
    if !state.config.is_known_user(user) {
        return Err((StatusCode::BAD_REQUEST, format!("Unknown user: {}", user)));
    }

    let mut rng = state.selection_rng();
    state
        .picker
        .pick(user, &mut rng)
        .await
        .map_err(|_| (StatusCode::BAD_GATEWAY, FETCH_FAILED.to_string()))
}
