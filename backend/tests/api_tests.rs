//! HTTP API tests: the full router over an in-memory gateway.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use backend::domain::CountryTable;
use backend::storage::MemoryGateway;
use backend::test_utils::{sample_guide, ScriptedGuideGenerator};
use backend::{build_state, create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn setup() -> (Router, AppState, Arc<ScriptedGuideGenerator>) {
    let (_memory, gateway) = MemoryGateway::new().into_gateway();
    let generator = Arc::new(ScriptedGuideGenerator::new());
    let state = build_state(gateway, generator.clone(), CountryTable::default(), "Germany").await;
    let router = create_router(state.clone(), "http://localhost:3000", None).unwrap();
    (router, state, generator)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn transaction_json(id: &str, category: &str) -> Value {
    json!({
        "id": id,
        "amount": -8.5,
        "currency": "EUR",
        "category": category,
        "date": "2025-02-01",
        "description": "Cat food",
        "type": "expense"
    })
}

#[tokio::test]
async fn test_state_is_loaded_with_defaults() {
    let (router, _state, _generator) = setup().await;

    let (status, body) = send(&router, "GET", "/api/state", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isLoaded"], true);
    assert_eq!(body["country"], "Germany");
    assert_eq!(body["currency"], "EUR");
    assert_eq!(body["categories"].as_array().unwrap().len(), 9);
    assert_eq!(body["shortcuts"][0]["prompt"], "Coffee 5");
}

#[tokio::test]
async fn test_view_routes() {
    let (router, _state, _generator) = setup().await;

    let (status, body) = send(&router, "GET", "/api/views/tips", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "tips");
    assert_eq!(body["country"], "Germany");
    assert_eq!(body["loading"], false);

    let (status, body) = send(&router, "GET", "/api/views/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "dashboard");
    assert!(body["shortcuts"].is_array());

    let (status, _) = send(&router, "GET", "/api/views/reports", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transaction_with_new_category() {
    let (router, state, _generator) = setup().await;

    let (status, body) = send(&router, "POST", "/api/transactions", Some(transaction_json("t1", "Pets"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["transaction"]["id"], "t1");
    assert_eq!(body["createdCategory"]["name"], "Pets");
    assert_eq!(body["createdCategory"]["isDefault"], false);

    let (_, body) = send(&router, "POST", "/api/transactions", Some(transaction_json("t2", "pets"))).await;
    assert!(body["createdCategory"].is_null());
    assert_eq!(state.category_service.list_categories().await.len(), 10);

    let (_, body) = send(&router, "GET", "/api/transactions", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_transaction_update_and_delete() {
    let (router, state, _generator) = setup().await;
    send(&router, "POST", "/api/transactions", Some(transaction_json("t1", "Food"))).await;

    let mut updated = transaction_json("t1", "Food");
    updated["amount"] = json!(-9.0);
    let (status, _) = send(&router, "PUT", "/api/transactions/t1", Some(updated.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.transaction_service.list_transactions().await[0].amount, -9.0);

    let (status, _) = send(&router, "PUT", "/api/transactions/other", Some(updated)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, "DELETE", "/api/transactions/t1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.transaction_service.list_transactions().await.is_empty());
}

#[tokio::test]
async fn test_category_rename_and_delete_cascade() {
    let (router, state, _generator) = setup().await;
    send(&router, "POST", "/api/transactions", Some(transaction_json("t1", "Food"))).await;
    send(&router, "POST", "/api/transactions", Some(transaction_json("t2", "Rent"))).await;
    send(
        &router,
        "POST",
        "/api/budgets",
        Some(json!({"category": "Rent", "limit": 900.0, "spent": 0.0})),
    )
    .await;

    let (status, body) = send(&router, "PUT", "/api/categories/1", Some(json!({"name": "Groceries"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"renamed": true, "updatedTransactions": 1, "updatedBudgets": 0}));

    let (_, body) = send(&router, "PUT", "/api/categories/1", Some(json!({"name": "Groceries"}))).await;
    assert_eq!(body["renamed"], false);

    let (status, body) = send(&router, "DELETE", "/api/categories/3?migrateTo=Others", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"deleted": true, "migratedTo": "Others", "migratedTransactions": 1, "migratedBudgets": 1})
    );

    let snapshot = state.store.snapshot().await;
    assert_eq!(snapshot.transactions[0].category, "Groceries");
    assert_eq!(snapshot.transactions[1].category, "Others");
    assert_eq!(snapshot.budgets[0].category, "Others");
    assert_eq!(snapshot.categories.iter().filter(|c| c.name == "Others").count(), 1);

    let (_, body) = send(&router, "DELETE", "/api/categories/3", None).await;
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn test_shortcuts_and_goals() {
    let (router, state, _generator) = setup().await;

    let (status, _) = send(
        &router,
        "POST",
        "/api/shortcuts",
        Some(json!({"id": "s4", "label": "Lunch", "prompt": "Lunch 12"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(&router, "DELETE", "/api/shortcuts/1", None).await;
    let (_, body) = send(&router, "GET", "/api/shortcuts", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = send(
        &router,
        "POST",
        "/api/goals",
        Some(json!({"id": "g1", "name": "Bike", "targetAmount": 600.0, "currentAmount": 50.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.goal_service.list_goals().await.len(), 1);

    send(&router, "DELETE", "/api/goals/g1", None).await;
    let (_, body) = send(&router, "GET", "/api/goals", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_select_country_preloads_guide() {
    let (router, state, generator) = setup().await;

    let (status, body) = send(&router, "PUT", "/api/country", Some(json!({"country": "Japan"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"country": "Japan", "currency": "JPY"}));

    // The preload runs in the background
    let mut guide = state.guide_service.current_guide().await;
    for _ in 0..100 {
        if guide.guide.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        guide = state.guide_service.current_guide().await;
    }
    assert_eq!(guide.guide, Some(sample_guide("Japan")));
    assert!(!guide.loading);
    assert_eq!(generator.calls().await, vec!["Japan".to_string()]);

    let (_, body) = send(&router, "GET", "/api/guide", None).await;
    assert_eq!(body["country"], "Japan");
    assert_eq!(body["guide"]["shoppingGuide"], sample_guide("Japan").shopping_guide);
}

#[tokio::test]
async fn test_unknown_country_is_rejected() {
    let (router, _state, generator) = setup().await;

    let (status, _) = send(&router, "PUT", "/api/country", Some(json!({"country": "Atlantis"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&router, "GET", "/api/country", None).await;
    assert_eq!(body["country"], "Germany");
    assert_eq!(generator.call_count().await, 0);

    let (_, body) = send(&router, "GET", "/api/countries", None).await;
    assert_eq!(body["countries"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_frontend_logs_are_accepted() {
    let (router, _state, _generator) = setup().await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/logs",
        Some(json!({"level": "warn", "message": "chart failed to render", "component": "dashboard"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}
