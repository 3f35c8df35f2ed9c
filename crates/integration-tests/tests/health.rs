//! Integration tests for the health probes.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The API server running (cargo run -p ebasi-api)
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{base_url, client};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_health_returns_ok() {
    let client = client();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse health body");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_readiness_checks_database() {
    let client = client();

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");

    // With the database up this is 200; if it were down we would see 503.
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_trailing_slash_is_normalized() {
    let client = client();

    let with_slash = client
        .get(format!("{}/products/", base_url()))
        .send()
        .await
        .expect("Failed to list products with trailing slash");
    let without_slash = client
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products without trailing slash");

    assert_eq!(with_slash.status(), StatusCode::OK);
    assert_eq!(without_slash.status(), StatusCode::OK);
}
