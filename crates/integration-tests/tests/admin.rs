//! Integration tests for the staff-only admin surface.
//!
//! These tests require:
//! - A running `PostgreSQL` database with seed data (cargo run -p ebasi-cli -- seed)
//! - The API server running (cargo run -p ebasi-api)
//! - A bootstrapped staff account (cargo run -p ebasi-cli -- admin bootstrap)
//!   with `EBASI_ADMIN_USERNAME` / `EBASI_ADMIN_PASSWORD` exported
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{TestUser, any_product, base_url, client, register_user};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Log in as the bootstrapped staff account and return its token.
async fn staff_token(client: &Client) -> String {
    let username =
        std::env::var("EBASI_ADMIN_USERNAME").expect("EBASI_ADMIN_USERNAME must be set");
    let password =
        std::env::var("EBASI_ADMIN_PASSWORD").expect("EBASI_ADMIN_PASSWORD must be set");

    let resp = client
        .post(format!("{}/accounts/admin/login/", base_url()))
        .json(&json!({"username": username, "password": password}))
        .send()
        .await
        .expect("Failed to log in as staff");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse login body");
    format!("Bearer {}", body["token"].as_str().expect("token"))
}

async fn place_order(client: &Client, user: &TestUser) -> Value {
    let product = any_product(client).await.expect("seed data required");
    let resp = client
        .post(format!("{}/cart/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({"product_id": product["id"], "quantity": 1}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{}/checkout/", base_url()))
        .header("Authorization", user.auth_header())
        .json(&json!({
            "full_name": "Test Buyer",
            "address": "1 Integration Way",
            "city": "Lisbon",
            "country": "Portugal",
        }))
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse order")
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_admin_rejects_anonymous_and_non_staff() {
    let client = client();

    let resp = client
        .get(format!("{}/admin/dashboard/", base_url()))
        .send()
        .await
        .expect("Failed to fetch dashboard");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let user = register_user(&client).await;
    let resp = client
        .get(format!("{}/admin/dashboard/", base_url()))
        .header("Authorization", user.auth_header())
        .send()
        .await
        .expect("Failed to fetch dashboard");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database and staff credentials"]
async fn test_dashboard_shape() {
    let client = client();
    let auth = staff_token(&client).await;

    let resp = client
        .get(format!("{}/admin/dashboard/", base_url()))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to fetch dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse dashboard");
    assert!(body["total_orders"].is_i64());
    assert!(body["total_users"].is_i64());
    assert!(body["total_products"].is_i64());
    assert!(body["total_revenue"].is_string());
    assert!(body["conversion_rate"].is_f64() || body["conversion_rate"].is_i64());
    assert!(body["recent_activity"].as_array().expect("array").len() <= 5);
}

// ============================================================================
// Order management
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database and staff credentials"]
async fn test_order_status_transitions() {
    let client = client();
    let auth = staff_token(&client).await;
    let buyer = register_user(&client).await;
    let order = place_order(&client, &buyer).await;

    // pending -> processing is allowed.
    let resp = client
        .patch(format!(
            "{}/admin/orders/{}/update_status/",
            base_url(),
            order["id"]
        ))
        .header("Authorization", &auth)
        .json(&json!({"status": "processing"}))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse status update");
    assert_eq!(body["new_status"], "processing");

    // processing -> cancelled, then the order is terminal.
    let resp = client
        .patch(format!(
            "{}/admin/orders/{}/update_status/",
            base_url(),
            order["id"]
        ))
        .header("Authorization", &auth)
        .json(&json!({"status": "cancelled"}))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .patch(format!(
            "{}/admin/orders/{}/update_status/",
            base_url(),
            order["id"]
        ))
        .header("Authorization", &auth)
        .json(&json!({"status": "shipped"}))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server, database and staff credentials"]
async fn test_order_status_rejects_unknown_value() {
    let client = client();
    let auth = staff_token(&client).await;
    let buyer = register_user(&client).await;
    let order = place_order(&client, &buyer).await;

    let resp = client
        .patch(format!(
            "{}/admin/orders/{}/update_status/",
            base_url(),
            order["id"]
        ))
        .header("Authorization", &auth)
        .json(&json!({"status": "teleported"}))
        .send()
        .await
        .expect("Failed to update status");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// User management
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database and staff credentials"]
async fn test_disabled_user_cannot_authenticate() {
    let client = client();
    let auth = staff_token(&client).await;
    let victim = register_user(&client).await;

    // Find the victim's id via the admin user list.
    let resp = client
        .get(format!("{}/admin/users/", base_url()))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to list users");
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Value = resp.json().await.expect("Failed to parse users");
    let victim_id = users
        .as_array()
        .expect("array")
        .iter()
        .find(|u| u["username"] == Value::String(victim.username.clone()))
        .expect("victim should be listed")["id"]
        .clone();

    let resp = client
        .patch(format!(
            "{}/admin/users/{victim_id}/toggle_status/",
            base_url()
        ))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to toggle user");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse toggle");
    assert_eq!(body["is_active"], false);

    // The existing token stops working immediately.
    let resp = client
        .get(format!("{}/accounts/profile/", base_url()))
        .header("Authorization", victim.auth_header())
        .send()
        .await
        .expect("Failed to fetch profile");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Contact inbox
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database and staff credentials"]
async fn test_contact_mark_read() {
    let client = client();
    let auth = staff_token(&client).await;

    let resp = client
        .post(format!("{}/accounts/contact/", base_url()))
        .json(&json!({
            "name": "Visitor",
            "email": "visitor@test.ebasi.shop",
            "subject": "Read me",
            "message": "Marking this as read.",
        }))
        .send()
        .await
        .expect("Failed to submit contact form");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/admin/contacts/", base_url()))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to list contacts");
    assert_eq!(resp.status(), StatusCode::OK);
    let contacts: Value = resp.json().await.expect("Failed to parse contacts");
    let message = contacts
        .as_array()
        .expect("array")
        .iter()
        .find(|m| m["subject"] == "Read me")
        .expect("submitted message should be listed");

    let resp = client
        .patch(format!(
            "{}/admin/contacts/{}/mark_read/",
            base_url(),
            message["id"]
        ))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to mark read");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse mark_read");
    assert_eq!(body["is_read"], true);
}
