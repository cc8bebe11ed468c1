use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Serialize;
use shared::LogEntry;
use tracing::{debug, error, info, warn};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub success: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/logs", post(log_message))
}

/// Forward a frontend log line into the server log
pub async fn log_message(
    State(_state): State<AppState>,
    Json(entry): Json<LogEntry>,
) -> Result<Json<LogResponse>, StatusCode> {
    let component = entry.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, entry.message);

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Ok(Json(LogResponse { success: true }))
}
