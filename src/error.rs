//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use std::fmt;
use thiserror::Error;

/// Resources addressable by id. Display gives the name used in 404 bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Camper,
    Activity,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Camper => "Camper",
            Resource::Activity => "Activity",
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Why a write was refused. Logged server-side; clients only see the generic body.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("age is required")]
    AgeRequired,
    #[error("age must be between 8 and 18, got {0}")]
    AgeOutOfRange(i64),
    #[error("time is required")]
    TimeRequired,
    #[error("time must be between 0 and 23, got {0}")]
    TimeOutOfRange(i64),
    #[error("{0} is required")]
    MissingReference(&'static str),
    #[error("{resource} {id} does not exist")]
    UnknownReference { resource: Resource, id: i64 },
    #[error("request body is not a valid JSON object: {0}")]
    MalformedBody(String),
    #[error("store rejected the write: {0}")]
    Constraint(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0} unavailable")]
    Unavailable(&'static str),
}

impl AppError {
    /// Map a store error raised while writing. Constraint violations are client errors;
    /// anything else (pool, I/O) stays a server error.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if !matches!(db.kind(), ErrorKind::Other) {
                return AppError::Validation(ValidationError::Constraint(db.message().to_string()));
            }
        }
        AppError::Db(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{} not found", resource) })),
            )
                .into_response(),
            AppError::Validation(cause) => {
                tracing::warn!(%cause, "write rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "errors": ["validation errors"] })),
                )
                    .into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
            AppError::Unavailable(dependency) => {
                let mut body = json!({ "status": "degraded" });
                body[dependency] = json!("unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let resp = AppError::NotFound(Resource::Activity).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await, json!({ "error": "Activity not found" }));
    }

    #[tokio::test]
    async fn validation_body_does_not_leak_the_cause() {
        let resp = AppError::from(ValidationError::AgeOutOfRange(42)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(resp).await, json!({ "errors": ["validation errors"] }));
    }

    #[tokio::test]
    async fn unavailable_names_the_dependency() {
        let resp = AppError::Unavailable("database").into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_of(resp).await,
            json!({ "status": "degraded", "database": "unavailable" })
        );
    }

    #[test]
    fn non_database_write_errors_stay_server_errors() {
        assert!(matches!(
            AppError::from_write(sqlx::Error::PoolTimedOut),
            AppError::Db(_)
        ));
    }
}
