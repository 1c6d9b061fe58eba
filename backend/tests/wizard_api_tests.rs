//! Onboarding wizard API tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` against a
//! mock inventory API bound to an ephemeral local port:
//! - Session lifecycle and navigation gating
//! - Field coercion and derived pricing
//! - Batch reconciliation and the guarded tracking toggle
//! - Submission success, rejection, outage and exclusivity

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Method, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;
use vendor_inventory::{create_app, external::InventoryApiClient, AppState, Config};

const API_KEY: &str = "test-key";
const CREATED_ID: &str = "5d1f8c1e-6a7b-4c2d-8e9f-0a1b2c3d4e5f";
const PRODUCT_ID: &str = "0b8f3a4e-8d2c-4c3e-9a51-2f9c1d7e6b10";

// ============================================================================
// Mock inventory API
// ============================================================================

#[derive(Clone, Copy)]
enum UpstreamMode {
    Accept,
    Reject,
    Outage,
    Slow,
}

#[derive(Clone)]
struct Upstream {
    mode: UpstreamMode,
    calls: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<Value>>>,
}

async fn upstream_search(
    headers: HeaderMap,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let query = params.get("q").cloned().unwrap_or_default();
    (StatusCode::OK, Json(json!([product_json(&query)])))
}

async fn upstream_create(
    State(upstream): State<Upstream>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_payload.lock().await = Some(payload);

    match upstream.mode {
        UpstreamMode::Accept => (StatusCode::CREATED, Json(json!({ "inventoryId": CREATED_ID }))),
        UpstreamMode::Reject => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": {
                    "code": "DUPLICATE_INVENTORY",
                    "message": "Product is already stocked",
                    "field": "productId"
                }
            })),
        ),
        UpstreamMode::Outage => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
        UpstreamMode::Slow => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            (StatusCode::CREATED, Json(json!({ "inventoryId": CREATED_ID })))
        }
    }
}

async fn spawn_upstream(mode: UpstreamMode) -> (String, Upstream) {
    let upstream = Upstream {
        mode,
        calls: Arc::new(AtomicUsize::new(0)),
        last_payload: Arc::new(Mutex::new(None)),
    };
    let router = Router::new()
        .route("/products/search", get(upstream_search))
        .route("/inventory", post(upstream_create))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), upstream)
}

// ============================================================================
// Helpers
// ============================================================================

fn product_json(name: &str) -> Value {
    let name = if name.is_empty() { "Sparkling Water 330ml" } else { name };
    json!({
        "id": PRODUCT_ID,
        "name": name,
        "brand": "Fizz",
        "category": "Beverages",
        "unit": "can",
        "basePrice": "25.00",
        "specifications": [{ "name": "Volume", "value": "330ml" }],
        "currentStock": 12
    })
}

fn test_app(base_url: &str) -> Router {
    let client = InventoryApiClient::with_base_url(API_KEY.to_string(), base_url.to_string());
    create_app(AppState::new(Config::default(), client))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/v1/onboarding", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

async fn set_field(app: &Router, id: &str, section: &str, field: &str, value: &str) -> Value {
    let uri = format!("/api/v1/onboarding/{}/{}", id, section);
    let (status, body) = send(
        app,
        Method::PUT,
        &uri,
        Some(json!({ "field": field, "value": value })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

async fn next(app: &Router, id: &str) -> (StatusCode, Value) {
    send(app, Method::POST, &format!("/api/v1/onboarding/{}/next", id), None).await
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

/// Walk a session to the review step with untracked stock
async fn fill_to_review(app: &Router, id: &str) {
    let (status, _) = send(
        app,
        Method::PUT,
        &format!("/api/v1/onboarding/{}/product", id),
        Some(product_json("")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(next(app, id).await.0, StatusCode::OK);

    set_field(app, id, "pricing", "costPrice", "50").await;
    set_field(app, id, "pricing", "sellingPrice", "100").await;
    set_field(app, id, "pricing", "discountPercentage", "10").await;
    assert_eq!(next(app, id).await.0, StatusCode::OK);

    set_field(app, id, "inventory", "addStock", "20").await;
    set_field(app, id, "inventory", "minStockLevel", "5").await;
    assert_eq!(next(app, id).await.0, StatusCode::OK);

    let (status, body) = next(app, id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentStep"], "review");
}

// ============================================================================
// Session and Navigation Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app("http://127.0.0.1:9");
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_new_session_starts_on_product_step() {
    let app = test_app("http://127.0.0.1:9");
    let (status, body) = send(&app, Method::POST, "/api/v1/onboarding", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["currentStep"], "product");
    assert_eq!(body["currentStepIndex"], 0);
    assert_eq!(body["canGoNext"], false);
    assert_eq!(body["canGoPrevious"], false);
    assert_eq!(body["steps"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = test_app("http://127.0.0.1:9");
    let uri = format!("/api/v1/onboarding/{}", Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_next_blocked_on_incomplete_step() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;

    let (status, body) = next(&app, &id).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "STEP_INCOMPLETE");
    assert_eq!(body["error"]["field"], "product");

    let (_, snapshot) = send(&app, Method::GET, &format!("/api/v1/onboarding/{}", id), None).await;
    assert_eq!(snapshot["currentStep"], "product");
}

#[tokio::test]
async fn test_previous_at_first_step_is_rejected() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;

    let uri = format!("/api/v1/onboarding/{}/previous", id);
    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_STATE_TRANSITION");
}

#[tokio::test]
async fn test_jump_and_edit_section() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;
    fill_to_review(&app, &id).await;

    let edit = format!("/api/v1/onboarding/{}/edit", id);
    let (status, body) = send(&app, Method::POST, &edit, Some(json!({ "step": "pricing" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentStep"], "pricing");

    // Data entered in later steps is kept
    assert_eq!(body["form"]["inventory"]["addStock"], 20);

    let jump = format!("/api/v1/onboarding/{}/jump", id);
    let (status, body) = send(&app, Method::POST, &jump, Some(json!({ "step": "review" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
}

#[tokio::test]
async fn test_delete_session() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;
    let uri = format!("/api/v1/onboarding/{}", id);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Step Input Tests
// ============================================================================

#[tokio::test]
async fn test_pricing_is_derived() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;

    set_field(&app, &id, "pricing", "costPrice", "50").await;
    set_field(&app, &id, "pricing", "sellingPrice", "100").await;
    let body = set_field(&app, &id, "pricing", "discountPercentage", "10").await;

    let pricing = &body["form"]["pricing"];
    assert_eq!(decimal(&pricing["finalPrice"]), Decimal::from(90));
    assert_eq!(decimal(&pricing["margin"]), Decimal::from(40));
    assert_eq!(body["readiness"]["profitable"], true);
}

#[tokio::test]
async fn test_non_numeric_input_becomes_zero() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;

    let body = set_field(&app, &id, "pricing", "costPrice", "abc").await;
    assert_eq!(decimal(&body["form"]["pricing"]["costPrice"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;

    let uri = format!("/api/v1/onboarding/{}/pricing", id);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "field": "wholesalePrice", "value": "3" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "field");
}

#[tokio::test]
async fn test_invalid_shared_expiry_date() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;

    let uri = format!("/api/v1/onboarding/{}/expiry/shared", id);
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "expiryDate": "31/12/2026" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "expiryDate");
}

// ============================================================================
// Batch Tests
// ============================================================================

#[tokio::test]
async fn test_batch_reconciliation_flow() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;
    set_field(&app, &id, "inventory", "addStock", "20").await;

    let tracking = format!("/api/v1/onboarding/{}/expiry/tracking", id);
    let (status, body) = send(&app, Method::PUT, &tracking, Some(json!({ "enabled": true }))).await;
    assert_eq!(status, StatusCode::OK);

    let batches = body["form"]["expiry"]["batches"].as_array().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0]["quantity"], 20);
    let first = batches[0]["id"].as_str().unwrap().to_string();

    let first_uri = format!("/api/v1/onboarding/{}/batches/{}", id, first);
    for (field, value) in [("batchNumber", "A"), ("quantity", "12"), ("expiryDate", "2030-01-01")] {
        let (status, _) = send(&app, Method::PUT, &first_uri, Some(json!({ "field": field, "value": value }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::POST, &format!("/api/v1/onboarding/{}/batches", id), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let second = body["batchId"].as_str().unwrap().to_string();
    assert_eq!(body["batchReconciliation"]["status"], "under");

    let second_uri = format!("/api/v1/onboarding/{}/batches/{}", id, second);
    for (field, value) in [("batchNumber", "B"), ("quantity", "8"), ("expiryDate", "2030-02-01")] {
        send(&app, Method::PUT, &second_uri, Some(json!({ "field": field, "value": value }))).await;
    }

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/onboarding/{}", id), None).await;
    assert_eq!(body["batchReconciliation"]["totalQuantity"], 20);
    assert_eq!(body["batchReconciliation"]["status"], "reconciled");
    assert_eq!(body["readiness"]["batchesReconciled"], true);

    let (status, body) = send(&app, Method::PUT, &second_uri, Some(json!({ "field": "quantity", "value": "5" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["batchReconciliation"]["totalQuantity"], 17);
    assert_eq!(body["batchReconciliation"]["difference"], -3);

    let (status, body) = send(&app, Method::DELETE, &second_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["expiry"]["batches"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_batch_is_not_found() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;
    let tracking = format!("/api/v1/onboarding/{}/expiry/tracking", id);
    send(&app, Method::PUT, &tracking, Some(json!({ "enabled": true }))).await;

    let uri = format!("/api/v1/onboarding/{}/batches/{}", id, Uuid::new_v4());
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "BATCH_NOT_FOUND");
}

#[tokio::test]
async fn test_disabling_tracking_requires_confirmation() {
    let app = test_app("http://127.0.0.1:9");
    let id = create_session(&app).await;
    set_field(&app, &id, "inventory", "addStock", "10").await;

    let tracking = format!("/api/v1/onboarding/{}/expiry/tracking", id);
    send(&app, Method::PUT, &tracking, Some(json!({ "enabled": true }))).await;

    let (status, body) = send(&app, Method::PUT, &tracking, Some(json!({ "enabled": false }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFIRMATION_REQUIRED");

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/onboarding/{}", id), None).await;
    assert_eq!(body["form"]["expiry"]["enableBatchTracking"], true);

    let (status, body) = send(
        &app,
        Method::PUT,
        &tracking,
        Some(json!({ "enabled": false, "confirm": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["expiry"]["enableBatchTracking"], false);
    assert!(body["form"]["expiry"]["batches"].as_array().unwrap().is_empty());
}

// ============================================================================
// Submission Tests
// ============================================================================

#[tokio::test]
async fn test_submit_success() {
    let (base_url, upstream) = spawn_upstream(UpstreamMode::Accept).await;
    let app = test_app(&base_url);
    let id = create_session(&app).await;
    fill_to_review(&app, &id).await;

    let readiness = format!("/api/v1/onboarding/{}/readiness", id);
    let (status, body) = send(&app, Method::GET, &readiness, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["firstIncompleteStep"], Value::Null);

    let submit = format!("/api/v1/onboarding/{}/submit", id);
    let (status, body) = send(&app, Method::POST, &submit, None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["isCompleted"], true);
    assert_eq!(body["isSubmitting"], false);
    assert_eq!(body["completion"]["inventoryId"], CREATED_ID);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);

    let payload = upstream.last_payload.lock().await.clone().unwrap();
    assert_eq!(payload["productId"], PRODUCT_ID);
    assert_eq!(payload["inventory"]["currentStock"], 20);
    assert_eq!(payload["inventory"]["minStockLevel"], 5);
    assert_eq!(decimal(&payload["pricing"]["finalPrice"]), Decimal::from(90));
    assert_eq!(payload["expiryTracking"]["hasExpiry"], false);

    // A completed wizard cannot be submitted again
    let (status, body) = send(&app, Method::POST, &submit, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_COMPLETED");
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_submit_before_review_is_rejected() {
    let (base_url, upstream) = spawn_upstream(UpstreamMode::Accept).await;
    let app = test_app(&base_url);
    let id = create_session(&app).await;

    let submit = format!("/api/v1/onboarding/{}/submit", id);
    let (status, _) = send(&app, Method::POST, &submit, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_submit_rejected_stays_on_review() {
    let (base_url, _upstream) = spawn_upstream(UpstreamMode::Reject).await;
    let app = test_app(&base_url);
    let id = create_session(&app).await;
    fill_to_review(&app, &id).await;

    let submit = format!("/api/v1/onboarding/{}/submit", id);
    let (status, body) = send(&app, Method::POST, &submit, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "DUPLICATE_INVENTORY");
    assert_eq!(body["error"]["field"], "productId");

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/onboarding/{}", id), None).await;
    assert_eq!(body["currentStep"], "review");
    assert_eq!(body["isSubmitting"], false);
    assert_eq!(body["isCompleted"], false);
    assert_eq!(body["lastError"]["kind"], "rejected");
    assert_eq!(body["lastError"]["message"], "Product is already stocked");
}

#[tokio::test]
async fn test_submit_outage_is_bad_gateway() {
    let (base_url, _upstream) = spawn_upstream(UpstreamMode::Outage).await;
    let app = test_app(&base_url);
    let id = create_session(&app).await;
    fill_to_review(&app, &id).await;

    let submit = format!("/api/v1/onboarding/{}/submit", id);
    let (status, body) = send(&app, Method::POST, &submit, None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "INVENTORY_SERVICE_UNAVAILABLE");

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/onboarding/{}", id), None).await;
    assert_eq!(body["lastError"]["kind"], "unavailable");
    assert_eq!(body["isSubmitting"], false);
}

#[tokio::test]
async fn test_concurrent_submit_is_rejected() {
    let (base_url, upstream) = spawn_upstream(UpstreamMode::Slow).await;
    let app = test_app(&base_url);
    let id = create_session(&app).await;
    fill_to_review(&app, &id).await;

    let submit = format!("/api/v1/onboarding/{}/submit", id);
    let first = {
        let app = app.clone();
        let submit = submit.clone();
        tokio::spawn(async move { send(&app, Method::POST, &submit, None).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = send(&app, Method::POST, &submit, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SUBMISSION_IN_PROGRESS");

    // Edits are refused while the request is in flight
    let uri = format!("/api/v1/onboarding/{}/pricing", id);
    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "field": "costPrice", "value": "1" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isCompleted"], true);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_abandoned_submit_still_completes() {
    let (base_url, upstream) = spawn_upstream(UpstreamMode::Slow).await;
    let app = test_app(&base_url);
    let id = create_session(&app).await;
    fill_to_review(&app, &id).await;

    // Client gives up long before the upstream answers
    let submit = format!("/api/v1/onboarding/{}/submit", id);
    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), send(&app, Method::POST, &submit, None)).await;
    assert!(abandoned.is_err());

    let session = format!("/api/v1/onboarding/{}", id);
    let (_, body) = send(&app, Method::GET, &session, None).await;
    assert_eq!(body["isSubmitting"], true);

    tokio::time::sleep(Duration::from_millis(600)).await;
    let (status, body) = send(&app, Method::GET, &session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSubmitting"], false);
    assert_eq!(body["isCompleted"], true);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);

    let (status, _) = send(&app, Method::DELETE, &session, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ============================================================================
// Product Search Tests
// ============================================================================

#[tokio::test]
async fn test_product_search_proxies_upstream() {
    let (base_url, _upstream) = spawn_upstream(UpstreamMode::Accept).await;
    let app = test_app(&base_url);

    let (status, body) = send(&app, Method::GET, "/api/v1/products/search?q=Cola", None).await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Cola");
    assert_eq!(products[0]["currentStock"], 12);
}

#[tokio::test]
async fn test_product_search_requires_query() {
    let app = test_app("http://127.0.0.1:9");

    let (status, body) = send(&app, Method::GET, "/api/v1/products/search?q=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "q");
}

#[tokio::test]
async fn test_product_search_upstream_down() {
    let app = test_app("http://127.0.0.1:9");

    let (status, body) = send(&app, Method::GET, "/api/v1/products/search?q=tea", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "PRODUCT_LOOKUP_FAILED");
}
