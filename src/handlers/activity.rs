use super::parse_id;
use crate::error::{AppError, Resource};
use crate::response::{activity_summary, ActivitySummary};
use crate::service::ActivityService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /activities
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ActivitySummary>>, AppError> {
    let activities = ActivityService::list(&state.pool).await?;
    Ok(Json(activities.into_iter().map(activity_summary).collect()))
}

/// DELETE /activities/:id, taking its signups with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str, Resource::Activity)?;
    ActivityService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
