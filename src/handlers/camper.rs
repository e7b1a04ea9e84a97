use super::parse_id;
use crate::error::{AppError, Resource};
use crate::extractors::JsonBody;
use crate::model::{CamperPatch, NewCamper};
use crate::response::{camper_detail, camper_summary, CamperDetail, CamperSummary};
use crate::service::CamperService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /campers
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CamperSummary>>, AppError> {
    let campers = CamperService::list(&state.pool).await?;
    Ok(Json(campers.into_iter().map(camper_summary).collect()))
}

/// POST /campers
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewCamper>,
) -> Result<(StatusCode, Json<CamperSummary>), AppError> {
    let camper = CamperService::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(camper_summary(camper))))
}

/// GET /campers/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<CamperDetail>, AppError> {
    let id = parse_id(&id_str, Resource::Camper)?;
    let (camper, signups) = CamperService::read_detail(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(Resource::Camper))?;
    Ok(Json(camper_detail(camper, signups)))
}

/// PATCH /campers/:id. A missing camper is reported before the body is looked at.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<JsonBody<CamperPatch>, AppError>,
) -> Result<(StatusCode, Json<CamperSummary>), AppError> {
    let id = parse_id(&id_str, Resource::Camper)?;
    if CamperService::find(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound(Resource::Camper));
    }
    let JsonBody(patch) = body?;
    let camper = CamperService::update(&state.pool, id, &patch).await?;
    Ok((StatusCode::ACCEPTED, Json(camper_summary(camper))))
}
