use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// Everything a report request can fail with. The display text is the
/// `error` field of the JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    MissingType,
    #[error("Missing required parameters: type and hash")]
    MissingHash,
    #[error("Unsupported type. Only ip-check-report is supported.")]
    UnsupportedType,
    #[error("Failed to fetch SVG report")]
    Upstream { status: u16 },
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Non-standard code kept for existing clients
            ApiError::MissingType => StatusCode::from_u16(444).unwrap_or(StatusCode::BAD_REQUEST),
            ApiError::MissingHash | ApiError::UnsupportedType => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(e) => error!("Request failed: {:#}", e),
            ApiError::Upstream { status } => {
                warn!("Report host rejected the request with {}", status)
            }
            _ => {}
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
