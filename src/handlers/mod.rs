//! HTTP handlers for campers, activities and signups.

pub mod activity;
pub mod camper;
pub mod signup;

use crate::error::{AppError, Resource};
use axum::http::StatusCode;

/// Path ids are integers; anything else names no row.
fn parse_id(id_str: &str, resource: Resource) -> Result<i64, AppError> {
    id_str
        .parse::<i64>()
        .map_err(|_| AppError::NotFound(resource))
}

/// GET /: empty 200.
pub async fn home() -> StatusCode {
    StatusCode::OK
}
