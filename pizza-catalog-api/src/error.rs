use axum::{http::StatusCode, response::Json};
use pizza_catalog_service::CatalogError;
use serde_json::json;
use tracing::{error, info};

pub const VALIDATION_ERRORS: &str = "validation errors";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation errors")]
    ValidationFailed,
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(entity) => ApiError::NotFound(entity),
            CatalogError::Validation(reason) => {
                info!(%reason, "request rejected");
                ApiError::ValidationFailed
            }
            err => {
                error!(error = %err, "catalog operation failed");
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{entity} not found") })),
            )
                .into_response(),
            ApiError::ValidationFailed => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [VALIDATION_ERRORS] })),
            )
                .into_response(),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}
