//! JSON request body whose rejection is the generic validation error.

use crate::error::{AppError, ValidationError};
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but a missing content type, malformed JSON or a type mismatch
/// all answer with the same 400 body as a failed field check.
#[derive(Clone, Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ValidationError::MalformedBody(rejection.body_text()).into()),
        }
    }
}
