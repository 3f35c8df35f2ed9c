//! Integration tests for the shopping cart.
//!
//! These tests require:
//! - A running `PostgreSQL` database with seed data (cargo run -p ebasi-cli -- seed)
//! - The API server running (cargo run -p ebasi-api)
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{TestUser, any_product, base_url, client, register_user};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn add_to_cart(client: &Client, user: &TestUser, product_id: &Value, quantity: i64) -> Value {
    let resp = client
        .post(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product_id, "quantity": quantity}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse cart")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_cart_requires_authentication() {
    let client = client();

    let resp = client
        .get(format!("{}/cart/", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_empty_cart_is_created_on_first_read() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .get(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to fetch cart");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(body["total_items"], 0);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_adding_same_product_twice_increments_quantity() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    add_to_cart(&client, &user, &product["id"], 1).await;
    let cart = add_to_cart(&client, &user, &product["id"], 2).await;

    let items = cart["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1, "same product stays on one line");
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(cart["total_items"], 3);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_unknown_product_is_not_found() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .post(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": 999_999_999, "quantity": 1}))
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_nonpositive_quantity_rejected() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    let resp = client
        .post(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product["id"], "quantity": 0}))
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_setting_quantity_to_zero_removes_line() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    add_to_cart(&client, &user, &product["id"], 2).await;

    let resp = client
        .patch(format!("{}/cart/item/{}/", base_url(), product["id"]))
        .header("Authorization", user.auth_header())
        .json(&json!({"quantity": 0}))
        .send()
        .await
        .expect("Failed to patch quantity");

    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_clear_cart() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    add_to_cart(&client, &user, &product["id"], 1).await;

    let resp = client
        .delete(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to clear cart");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

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
async fn test_cart_total_matches_line_subtotals() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await.expect("seed data required");

    let cart = add_to_cart(&client, &user, &product["id"], 3).await;

    let price: f64 = cart["items"][0]["price"]
        .as_str()
        .expect("price string")
        .parse()
        .expect("numeric price");
    let total: f64 = cart["total_price"]
        .as_str()
        .expect("total string")
        .parse()
        .expect("numeric total");
    assert!((total - price * 3.0).abs() < 0.001);
}
