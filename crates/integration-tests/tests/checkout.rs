//! Integration tests for checkout and order history.
//!
//! These tests require:
//! - A running `PostgreSQL` database with seed data (cargo run -p ebasi-cli -- seed)
//! - The API server running (cargo run -p ebasi-api)
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{TestUser, any_product, base_url, client, register_user};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

async fn fill_cart(client: &Client, user: &TestUser) {
    let product = any_product(client).await.expect("seed data required");
    let resp = client
        .post(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product["id"], "quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
}

fn shipping_details() -> Value {
    json!({
        "full_name": "Test Buyer",
        "address": "1 Integration Way",
        "city": "Lisbon",
        "postal_code": "1000-001",
        "country": "Portugal",
        "phone": "+351000000000",
    })
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_creates_order_and_empties_cart() {
    let client = client();
    let user = register_user(&client).await;
    fill_cart(&client, &user).await;

    let resp = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&shipping_details())
        .send()
        .await
        .expect("Failed to checkout");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(order["status"], "pending");
    assert!(!order["items"].as_array().expect("items").is_empty());

    // Cart is cleared in the same transaction.
    let resp = client
        .get(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to fetch cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_empty_cart_is_bad_request() {
    let client = client();
    let user = register_user(&client).await;

    // Materialize an empty cart first.
    let resp = client
        .get(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to fetch cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&shipping_details())
        .send()
        .await
        .expect("Failed to checkout");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_idempotency_key_replays_order() {
    let client = client();
    let user = register_user(&client).await;
    fill_cart(&client, &user).await;

    let mut payload = shipping_details();
    payload["idempotency_key"] = Value::String(Uuid::new_v4().to_string());

    let first = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&payload)
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_order: Value = first.json().await.expect("Failed to parse order");

    // Retry with the same key: no new order, 200 instead of 201.
    let second = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&payload)
        .send()
        .await
        .expect("Failed to retry checkout");
    assert_eq!(second.status(), StatusCode::OK);
    let second_order: Value = second.json().await.expect("Failed to parse order");

    assert_eq!(first_order["id"], second_order["id"]);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_requires_shipping_fields() {
    let client = client();
    let user = register_user(&client).await;
    fill_cart(&client, &user).await;

    let resp = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"full_name": "", "address": "", "city": "", "country": ""}))
        .send()
        .await
        .expect("Failed to checkout");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_orders_are_scoped_to_their_owner() {
    let client = client();
    let buyer = register_user(&client).await;
    fill_cart(&client, &buyer).await;

    let resp = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", buyer.auth_header())
        .json(&shipping_details())
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");

    // The owner sees it.
    let resp = client
        .get(format!("{}/orders/{}/", base_url(), order["id"]))
        .header("Authorization", buyer.auth_header())
        .send()
        .await
        .expect("Failed to fetch order");
    assert_eq!(resp.status(), StatusCode::OK);

    // A different user gets a 404, not a 403, so order ids do not leak.
    let stranger = register_user(&client).await;
    let resp = client
        .get(format!("{}/orders/{}/", base_url(), order["id"]))
        .header("Authorization", stranger.auth_header())
        .send()
        .await
        .expect("Failed to fetch order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
