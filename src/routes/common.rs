//! Liveness, readiness and build info.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 200 once the store answers, 503 otherwise.
async fn ready(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    tracing::debug!(sql = "SELECT 1", "query");
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "readiness check failed");
            AppError::Unavailable("database")
        })?;
    Ok(Json(json!({ "status": "ok", "database": "ok" })))
}

async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health and GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// `common_routes` plus GET /ready, which pings the store.
pub fn common_routes_with_ready(state: AppState) -> Router {
    common_routes().merge(Router::new().route("/ready", get(ready)).with_state(state))
}
