//! Integration tests for the public catalog endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with seed data (cargo run -p ebasi-cli -- seed)
//! - The API server running (cargo run -p ebasi-api)
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{any_product, base_url, client};
use reqwest::StatusCode;
use serde_json::Value;

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_categories_listing() {
    let client = client();

    let resp = client
        .get(format!("{}/categories/", base_url()))
        .send()
        .await
        .expect("Failed to list categories");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse categories");
    let categories = body.as_array().expect("categories should be an array");
    for category in categories {
        assert!(category["slug"].is_string());
        assert!(category["name"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_category_is_not_found() {
    let client = client();

    let resp = client
        .get(format!("{}/categories/no-such-category/products/", base_url()))
        .send()
        .await
        .expect("Failed to fetch category products");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Product listing & filters
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_listing_shape() {
    let client = client();
    let product = any_product(&client).await.expect("seed data required");

    assert!(product["slug"].is_string());
    assert!(product["price"].is_string(), "prices serialize as strings");
    assert!(product["is_on_sale"].is_boolean());
    assert!(product["category"]["slug"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_price_filters() {
    let client = client();

    let resp = client
        .get(format!(
            "{}/products/?min_price=10&max_price=1000",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to filter products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse products");
    for product in body.as_array().expect("array expected") {
        let price: f64 = product["price"]
            .as_str()
            .expect("price string")
            .parse()
            .expect("numeric price");
        assert!((10.0..=1000.0).contains(&price));
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_ordering_whitelist_tolerates_garbage() {
    let client = client();

    // Unknown ordering values fall back to the default instead of erroring.
    let resp = client
        .get(format!(
            "{}/products/?ordering=;DROP%20TABLE%20product",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_featured_products_are_featured() {
    let client = client();

    let resp = client
        .get(format!("{}/products/featured/", base_url()))
        .send()
        .await
        .expect("Failed to list featured products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse products");
    for product in body.as_array().expect("array expected") {
        assert_eq!(product["is_featured"], true);
    }
}

// ============================================================================
// Product detail
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_detail_includes_media_and_reviews() {
    let client = client();
    let product = any_product(&client).await.expect("seed data required");
    let slug = product["slug"].as_str().expect("slug");

    let resp = client
        .get(format!("{}/products/{slug}/", base_url()))
        .send()
        .await
        .expect("Failed to fetch product detail");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse detail");
    assert_eq!(body["slug"], Value::String(slug.to_string()));
    assert!(body["images"].is_array());
    assert!(body["videos"].is_array());
    assert!(body["reviews"].is_array());
    assert!(body["category"]["name"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_product_is_not_found() {
    let client = client();

    let resp = client
        .get(format!("{}/products/no-such-product/", base_url()))
        .send()
        .await
        .expect("Failed to fetch product detail");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
