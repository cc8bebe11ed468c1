//! # REST API for Quick Shortcuts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::QuickShortcut;
use tracing::info;

use super::error::{ensure_same_id, ApiError};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shortcuts).post(create_shortcut))
        .route("/:id", put(update_shortcut).delete(delete_shortcut))
}

pub async fn list_shortcuts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/shortcuts");
    (StatusCode::OK, Json(state.shortcut_service.list_shortcuts().await)).into_response()
}

pub async fn create_shortcut(
    State(state): State<AppState>,
    Json(shortcut): Json<QuickShortcut>,
) -> impl IntoResponse {
    info!("POST /api/shortcuts - {}", shortcut.label);

    let shortcut = state.shortcut_service.add_shortcut(shortcut).await;
    (StatusCode::CREATED, Json(shortcut)).into_response()
}

pub async fn update_shortcut(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(shortcut): Json<QuickShortcut>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/shortcuts/{}", id);

    ensure_same_id(&id, &shortcut.id)?;
    state.shortcut_service.update_shortcut(shortcut.clone()).await;
    Ok((StatusCode::OK, Json(shortcut)))
}

pub async fn delete_shortcut(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/shortcuts/{}", id);

    state.shortcut_service.delete_shortcut(&id).await;
    StatusCode::OK
}
