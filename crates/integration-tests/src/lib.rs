//! Integration tests for the Ebasi store API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start Postgres and the API server
//! cargo run -p ebasi-cli -- migrate run
//! cargo run -p ebasi-api
//!
//! # Then run the ignored tests
//! cargo test -p ebasi-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a live server over HTTP; each test registers its own
//! throwaway user so runs do not interfere with each other. The base
//! URL defaults to `http://localhost:8000` and can be overridden with
//! `EBASI_API_BASE_URL`.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the running API server.
#[must_use]
pub fn base_url() -> String {
    std::env::var("EBASI_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// A plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A registered user together with its auth token.
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    /// `Authorization` header value for this user.
    #[must_use]
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Register a fresh user with a unique username and return its token.
///
/// # Panics
///
/// Panics if registration does not return 201 with a token.
pub async fn register_user(client: &Client) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("it_user_{suffix}");
    let email = format!("{username}@test.ebasi.shop");
    let password = format!("It!{suffix}x9");

    let resp = client
        .post(format!("{}/accounts/register/", base_url()))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to register test user");

    assert_eq!(resp.status(), 201, "registration should return 201");
    let body: Value = resp.json().await.expect("Failed to parse register body");
    let token = body["token"]
        .as_str()
        .expect("register response missing token")
        .to_string();

    TestUser {
        username,
        email,
        password,
        token,
    }
}

/// Fetch the first active product slug from the public listing.
///
/// Returns `None` when the catalog is empty (run `ebasi seed` first).
///
/// # Panics
///
/// Panics if the listing endpoint is unreachable.
pub async fn any_product(client: &Client) -> Option<Value> {
    let resp = client
        .get(format!("{}/products/", base_url()))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("Failed to parse product list");
    body.as_array().and_then(|products| products.first().cloned())
}
