//! # REST API for Savings Goals
//!
//! Endpoints for creating, listing and deleting savings goals.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use shared::SavingsGoal;
use tracing::info;

use crate::AppState;

/// Create a router for goal related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", delete(delete_goal))
}

pub async fn list_goals(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/goals");
    (StatusCode::OK, Json(state.goal_service.list_goals().await)).into_response()
}

/// Create a new goal
pub async fn create_goal(
    State(state): State<AppState>,
    Json(goal): Json<SavingsGoal>,
) -> impl IntoResponse {
    info!("POST /api/goals - {} ({:.2})", goal.name, goal.target_amount);

    let goal = state.goal_service.add_goal(goal).await;
    (StatusCode::CREATED, Json(goal)).into_response()
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/goals/{}", id);

    state.goal_service.delete_goal(&id).await;
    StatusCode::OK
}
