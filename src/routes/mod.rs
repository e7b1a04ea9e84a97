//! Router assembly.

mod camp;
mod common;

pub use camp::camp_routes;
pub use common::{common_routes, common_routes_with_ready};

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Resource routes plus health endpoints, with request tracing and a body size cap.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(camp_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
