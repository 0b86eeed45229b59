use axum::{http::StatusCode, response::Json};
use pizza_restaurant_service::{StoreError, ValidationError};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(vec![err.to_string()])
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Record not found".to_string()),
            StoreError::Validation(e) => e.into(),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
