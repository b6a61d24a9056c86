//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use confsite_common::Error;
use serde_json::json;

/// Request-level error; maps storage and rendering failures to HTTP statuses
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HttpError::Core(Error::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            HttpError::Core(Error::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
