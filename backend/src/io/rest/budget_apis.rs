use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::Budget;
use tracing::info;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_budgets).post(create_budget))
}

pub async fn list_budgets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/budgets");
    (StatusCode::OK, Json(state.budget_service.list_budgets().await)).into_response()
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(budget): Json<Budget>,
) -> impl IntoResponse {
    info!("POST /api/budgets - {}", budget.category);

    let budget = state.budget_service.add_budget(budget).await;
    (StatusCode::CREATED, Json(budget)).into_response()
}
