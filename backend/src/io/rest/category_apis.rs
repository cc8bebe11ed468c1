//! # REST API for Categories
//!
//! Renaming (`PUT /api/categories/:id`) and deleting
//! (`DELETE /api/categories/:id?migrateTo=Others`) cascade over transactions
//! and budgets; the responses report how many records moved.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{
    Category, DeleteCategoryRequest, DeleteCategoryResponse, RenameCategoryRequest,
    RenameCategoryResponse,
};
use tracing::info;

use crate::domain::{CategoryDeletion, CategoryRename};
use crate::AppState;

/// Create a router for category related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", put(rename_category).delete(delete_category))
}

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");
    (StatusCode::OK, Json(state.category_service.list_categories().await)).into_response()
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(category): Json<Category>,
) -> impl IntoResponse {
    info!("POST /api/categories - {}", category.name);

    let category = state.category_service.add_category(category).await;
    (StatusCode::CREATED, Json(category)).into_response()
}

pub async fn rename_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RenameCategoryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/categories/{} - name: {}", id, request.name);

    let response = match state.category_service.update_category(&id, &request.name).await {
        CategoryRename::Unchanged => RenameCategoryResponse {
            renamed: false,
            updated_transactions: 0,
            updated_budgets: 0,
        },
        CategoryRename::Renamed { cascade, .. } => RenameCategoryResponse {
            renamed: true,
            updated_transactions: cascade.transactions,
            updated_budgets: cascade.budgets,
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteCategoryRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/categories/{} - migrate to: {:?}", id, query.migrate_to);

    let response = match state
        .category_service
        .delete_category(&id, query.migrate_to.as_deref())
        .await
    {
        CategoryDeletion::NotFound => DeleteCategoryResponse {
            deleted: false,
            migrated_to: None,
            migrated_transactions: 0,
            migrated_budgets: 0,
        },
        CategoryDeletion::Deleted {
            migrated_to,
            cascade,
            ..
        } => DeleteCategoryResponse {
            deleted: true,
            migrated_to,
            migrated_transactions: cascade.transactions,
            migrated_budgets: cascade.budgets,
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}
