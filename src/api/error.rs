//! API error responses
//!
//! The core distinguishes two request-level failures: a primary key with no
//! matching record, and a body that fails schema validation. Everything else
//! is an unspecified external-layer fault and surfaces as a 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::ValidationErrors;

/// Error surface of the request handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Requested primary key has no matching record; renders an empty 404
    #[error("record not found")]
    NotFound,

    /// Request body failed schema validation; the field-keyed error map is
    /// the 400 response body
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Request body was not parseable JSON
    #[error("JSON parse error - {0}")]
    Parse(String),

    /// Unspecified external-layer fault
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Parse(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": format!("JSON parse error - {}", detail) })),
            )
                .into_response(),
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
