use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shared::PriceServiceError;
use thiserror::Error;
use tracing::error;

/// Error type for price API responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not_found: {0}")]
    NotFound(String),

    #[error("bad_request: {0}")]
    BadRequest(String),

    #[error("internal_error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => {
                error!("Price API internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "price store unavailable".to_string())
            }
        };

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<PriceServiceError> for ApiError {
    fn from(e: PriceServiceError) -> Self {
        match e {
            PriceServiceError::NotFound(msg) => Self::NotFound(msg),
            PriceServiceError::Store(err) => Self::Internal(err.to_string()),
        }
    }
}
