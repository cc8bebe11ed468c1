//! # REST API for Transactions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{AddTransactionResponse, Transaction};
use tracing::info;

use super::error::{ensure_same_id, ApiError};
use crate::AppState;

/// Create a router for transaction related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/:id", put(update_transaction).delete(delete_transaction))
}

pub async fn list_transactions(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/transactions");
    (StatusCode::OK, Json(state.transaction_service.list_transactions().await)).into_response()
}

/// Log a new transaction, creating its category when unknown
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(transaction): Json<Transaction>,
) -> impl IntoResponse {
    info!("POST /api/transactions - {} {}", transaction.id, transaction.category);

    let added = state.transaction_service.add_transaction(transaction).await;
    let response = AddTransactionResponse {
        transaction: added.transaction,
        created_category: added.created_category,
    };
    (StatusCode::CREATED, Json(response)).into_response()
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(transaction): Json<Transaction>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/transactions/{}", id);

    ensure_same_id(&id, &transaction.id)?;
    state.transaction_service.update_transaction(transaction.clone()).await;
    Ok((StatusCode::OK, Json(transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", id);

    state.transaction_service.delete_transaction(&id).await;
    StatusCode::OK
}
