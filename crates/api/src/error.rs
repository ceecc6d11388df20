use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campaign_export_core::document::ValidationError;
use campaign_export_core::export::ExportError;
use campaign_export_core::store::StoreError;
use serde_json::json;

/// API error type rendered as a JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Store(err) => {
                tracing::error!("Document store error: {err}");
                internal()
            }
            ApiError::Export(err) => {
                tracing::error!(stage = %err.stage(), "Export failed: {err}");
                internal()
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internalError",
        "An internal error occurred".to_string(),
    )
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
