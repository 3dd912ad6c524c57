use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("slot is already taken")]
    SlotUnavailable,

    #[error("transition is not permitted from the current status")]
    IllegalTransition,

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    TransientIo(String),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::SlotUnavailable => StatusCode::CONFLICT,
            StoreError::IllegalTransition => StatusCode::CONFLICT,
            StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::TransientIo(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
