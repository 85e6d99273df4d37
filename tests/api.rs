//! End-to-end tests over the HTTP surface, exercising the literal
//! scenarios via `tower::ServiceExt::oneshot` against the
//! axum router directly — no bound socket needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use txsigner::api::router;
use txsigner::crypto::CryptoProvider;
use txsigner::registry::DeviceRegistry;
use txsigner::service::SigningCore;

fn test_app() -> axum::Router {
    let core = SigningCore::new(Arc::new(DeviceRegistry::new()), Arc::new(CryptoProvider::new()));
    router(core)
}

async fn post(app: &axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn create_device_returns_a_fresh_rsa_device() {
    let app = test_app();
    let (status, body) =
        post(&app, "/api/v0/create-device", json!({"id": "D1", "algorithm": "RSA", "label": "t"}))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signatureCounter"], 0);
    assert_eq!(body["lastSignature"], "");
    assert!(body["publicKey"].as_str().unwrap().contains("RSA_PUBLIC_KEY"));
    assert!(body["privateKey"].as_str().unwrap().contains("RSA_PRIVATE_KEY"));
}

#[tokio::test]
async fn first_sign_chains_off_the_base64_device_id() {
    let app = test_app();
    post(&app, "/api/v0/create-device", json!({"id": "D1", "algorithm": "RSA", "label": "t"}))
        .await;

    let (status, body) =
        post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": "hello"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signedData"], "0_hello_RDE=");
    assert!(!body["signature"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn second_sign_chains_off_the_first_raw_signature() {
    let app = test_app();
    post(&app, "/api/v0/create-device", json!({"id": "D1", "algorithm": "RSA", "label": "t"}))
        .await;
    let (_, first) =
        post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": "hello"})).await;
    let (status, second) =
        post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": "world"})).await;

    assert_eq!(status, StatusCode::OK);
    let expected = format!("1_world_{}", first["signature"].as_str().unwrap());
    assert_eq!(second["signedData"], expected);
}

#[tokio::test]
async fn ecc_device_chains_and_reports_der_signature() {
    let app = test_app();
    post(&app, "/api/v0/create-device", json!({"id": "D2", "algorithm": "ECC"})).await;
    let (status, body) =
        post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D2", "data": "x"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signedData"], "0_x_RDI=");
}

#[tokio::test]
async fn sign_on_unknown_device_is_a_server_error_with_no_state_change() {
    let app = test_app();
    let (status, _) =
        post(&app, "/api/v0/sign-transaction", json!({"deviceId": "nope", "data": "x"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn empty_data_is_a_validation_error() {
    let app = test_app();
    post(&app, "/api/v0/create-device", json!({"id": "D1", "algorithm": "RSA"})).await;
    let (status, _) =
        post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lowercase_algorithm_is_a_validation_error() {
    let app = test_app();
    let (status, _) =
        post(&app, "/api/v0/create-device", json!({"id": "D1", "algorithm": "rsa"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ten_concurrent_signs_on_one_device_land_on_contiguous_counters() {
    let app = test_app();
    post(&app, "/api/v0/create-device", json!({"id": "D1", "algorithm": "RSA"})).await;
    post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": "a"})).await;
    post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": "b"})).await;

    let mut handles = Vec::new();
    for i in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post(&app, "/api/v0/sign-transaction", json!({"deviceId": "D1", "data": format!("c{i}")}))
                .await
        }));
    }

    let mut counters: Vec<u64> = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let prefix = body["signedData"].as_str().unwrap().split('_').next().unwrap();
        counters.push(prefix.parse().unwrap());
    }
    counters.sort_unstable();
    assert_eq!(counters, (2..12).collect::<Vec<_>>());
}

#[tokio::test]
async fn health_check_reports_pass_and_version() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().method(Method::GET).uri("/api/v0/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "pass");
    assert_eq!(body["version"], "v0");
}

#[tokio::test]
async fn health_check_rejects_non_get_methods() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().method(Method::POST).uri("/api/v0/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
