use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::NewSignup;
use crate::response::{signup_detail, SignupDetail};
use crate::service::SignupService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /signups
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewSignup>,
) -> Result<(StatusCode, Json<SignupDetail>), AppError> {
    let created = SignupService::create(&state.pool, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(signup_detail(created.signup, created.camper, created.activity)),
    ))
}
