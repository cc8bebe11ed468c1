//! # REST API for State and Views
//!
//! `GET /api/state` returns the whole snapshot; `GET /api/views/:view`
//! returns only the slice the named view renders.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::ViewState;
use tracing::info;

use super::error::ApiError;
use crate::domain::route_view;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/views/:view", get(get_view))
}

pub async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/state");
    (StatusCode::OK, Json(state.store.snapshot().await)).into_response()
}

pub async fn get_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/views/{}", view);

    let view: ViewState = view.parse().map_err(ApiError::InvalidView)?;
    let content = route_view(view, state.store.snapshot().await);
    Ok((StatusCode::OK, Json(content)))
}
