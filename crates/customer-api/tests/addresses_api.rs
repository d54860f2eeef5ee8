//! Endpoint tests for the address API.
//!
//! Drives the full router through `tower::ServiceExt::oneshot` against the
//! in-memory store, checking the status-code mapping and envelope shape of
//! every endpoint.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use lidshop_core::CustomerId;
use lidshop_customer_api::db::memory::MemoryStore;
use lidshop_customer_api::routes;
use lidshop_customer_api::state::AppState;

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    store.add_customer(CustomerId::new(1));
    store.add_customer(CustomerId::new(2));
    let state = AppState::with_stores(store.clone(), store);
    routes::router().with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn address_payload(line: &str, is_default: Option<bool>) -> Value {
    let mut payload = json!({
        "line": line,
        "city": "Hanoi",
        "district": "Ba Dinh",
        "ward": "Truc Bach",
        "label": "Home",
    });
    if let Some(flag) = is_default {
        payload["isDefault"] = json!(flag);
    }
    payload
}

async fn create_address(app: &Router, customer: i64, line: &str, is_default: Option<bool>) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/customers/{customer}/addresses"),
        Some(address_payload(line, is_default)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().expect("address id")
}

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_returns_created_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/customers/1/addresses",
        Some(address_payload("1 Pho Hue", None)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["data"]["customerId"], json!(1));
    assert_eq!(body["data"]["isDefault"], json!(false));
    assert_eq!(body["data"]["line"], json!("1 Pho Hue"));
}

#[tokio::test]
async fn add_for_unknown_customer_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/customers/99/addresses",
        Some(address_payload("1 Pho Hue", None)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn add_with_blank_required_field_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/customers/1/addresses",
        Some(json!({ "line": "  ", "city": "Hanoi" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn list_returns_default_first_then_oldest() {
    let app = app();
    let a = create_address(&app, 1, "A", None).await;
    let b = create_address(&app, 1, "B", Some(true)).await;
    let c = create_address(&app, 1, "C", None).await;

    let (status, body) = send(&app, "GET", "/api/customers/1/addresses", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|a| a["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![b, a, c]);
}

#[tokio::test]
async fn list_for_unknown_customer_is_empty_200() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/customers/99/addresses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_returns_ok_envelope_with_data() {
    let app = app();
    let id = create_address(&app, 1, "A", Some(true)).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/customers/1/addresses/{id}"),
        Some(address_payload("A2", None)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["line"], json!("A2"));
    // isDefault was absent from the payload, so the stored value survives.
    assert_eq!(body["data"]["isDefault"], json!(true));
}

#[tokio::test]
async fn update_of_foreign_address_is_400() {
    let app = app();
    let id = create_address(&app, 1, "A", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/customers/2/addresses/{id}"),
        Some(address_payload("HIJACKED", None)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn update_of_missing_address_is_400() {
    let app = app();
    let (status, _) = send(
        &app,
        "PUT",
        "/api/customers/1/addresses/99",
        Some(address_payload("A", None)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_returns_ok_envelope() {
    let app = app();
    let id = create_address(&app, 1, "A", None).await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/customers/1/addresses/{id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn delete_of_missing_address_is_404() {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/api/customers/1/addresses/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn delete_of_foreign_address_is_500() {
    let app = app();
    let id = create_address(&app, 1, "A", None).await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/customers/2/addresses/{id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));

    // The address must survive the failed attempt.
    let (_, list) = send(&app, "GET", "/api/customers/1/addresses", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn patch_default_flips_the_flag_to_the_target() {
    let app = app();
    // A starts as the default; the PATCH must hand the flag to B.
    create_address(&app, 1, "A", Some(true)).await;
    let b = create_address(&app, 1, "B", None).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/customers/1/addresses/{b}/default"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["id"], json!(b));
    assert_eq!(body["data"]["isDefault"], json!(true));

    let (_, list) = send(&app, "GET", "/api/customers/1/addresses", None).await;
    for address in list.as_array().expect("array body") {
        let expected = address["id"] == json!(b);
        assert_eq!(address["isDefault"], json!(expected));
    }
}

#[tokio::test]
async fn patch_default_on_foreign_address_is_400() {
    let app = app();
    let id = create_address(&app, 1, "A", None).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/customers/2/addresses/{id}/default"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}
