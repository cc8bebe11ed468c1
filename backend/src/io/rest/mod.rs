//! # REST API Interface Layer
//!
//! HTTP endpoints for the finance tracker, all under `/api`. Handlers are thin:
//! they log the request, call one domain service and serialize the result.
//! Persistence failures are handled (and logged) inside the services, so the
//! only errors a client sees are [`ApiError`] validation failures.

pub mod budget_apis;
pub mod category_apis;
pub mod error;
pub mod goal_apis;
pub mod logging_apis;
pub mod settings_apis;
pub mod shortcut_apis;
pub mod state_apis;
pub mod transaction_apis;

use axum::Router;

use crate::AppState;

pub use error::ApiError;

/// Every API route, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(state_apis::router())
        .merge(settings_apis::router())
        .merge(logging_apis::router())
        .nest("/transactions", transaction_apis::router())
        .nest("/categories", category_apis::router())
        .nest("/shortcuts", shortcut_apis::router())
        .nest("/budgets", budget_apis::router())
        .nest("/goals", goal_apis::router())
}
