//! Integration tests for the wishlist.
//!
//! These tests require:
//! - A running `PostgreSQL` database with seed data (cargo run -p ebasi-cli -- seed)
//! - The API server running (cargo run -p ebasi-api)
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{any_product, base_url, client, register_user};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_toggle_roundtrip() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    // First toggle adds.
    let resp = client
        .post(format!("{}/wishlist/toggle/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product["id"]}))
        .send()
        .await
        .expect("Failed to toggle wishlist");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse toggle");
    assert_eq!(body["status"], "added");

    let resp = client
        .get(format!("{}/wishlist/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to list wishlist");
    assert_eq!(resp.status(), StatusCode::OK);
    let list: Value = resp.json().await.expect("Failed to parse wishlist");
    assert_eq!(list.as_array().expect("array").len(), 1);

    // Second toggle removes.
    let resp = client
        .post(format!("{}/wishlist/toggle/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product["id"]}))
        .send()
        .await
        .expect("Failed to toggle wishlist");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse toggle");
    assert_eq!(body["status"], "removed");

    let resp = client
        .get(format!("{}/wishlist/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to list wishlist");
    let list: Value = resp.json().await.expect("Failed to parse wishlist");
    assert!(list.as_array().expect("array").is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_toggle_unknown_product_is_not_found() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .post(format!("{}/wishlist/toggle/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": 999_999_999}))
        .send()
        .await
        .expect("Failed to toggle wishlist");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_remove_by_product_id() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    let resp = client
        .post(format!("{}/wishlist/toggle/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product["id"]}))
        .send()
        .await
        .expect("Failed to toggle wishlist");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .delete(format!("{}/wishlist/{}/", base_url(), product["id"]))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to remove wishlist entry");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/wishlist/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to list wishlist");
    let list: Value = resp.json().await.expect("Failed to parse wishlist");
    assert!(list.as_array().expect("array").is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wishlist_requires_authentication() {
    let client = client();

    let resp = client
        .get(format!("{}/wishlist/", base_url()))
        .send()
        .await
        .expect("Failed to list wishlist");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
