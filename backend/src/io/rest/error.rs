use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Request errors reported to the client. Gateway failures never end up here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidView(String),
    #[error("Path id '{path}' does not match body id '{body}'")]
    IdMismatch { path: String, body: String },
    #[error("Unknown country: {0}")]
    UnknownCountry(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Rejecting request: {}", self);
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Reject a body whose id differs from the one in the path
pub fn ensure_same_id(path: &str, body: &str) -> Result<(), ApiError> {
    if path == body {
        Ok(())
    } else {
        Err(ApiError::IdMismatch {
            path: path.to_string(),
            body: body.to_string(),
        })
    }
}
