//! Integration tests for product reviews.
//!
//! These tests require:
//! - A running `PostgreSQL` database with seed data (cargo run -p ebasi-cli -- seed)
//! - The API server running (cargo run -p ebasi-api)
//!
//! Run with: cargo test -p ebasi-integration-tests -- --ignored

use ebasi_integration_tests::{any_product, base_url, client};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_submit_and_list_review() {
    let client = client();
    let product = any_product(&client).await.expect("seed data required");
    let slug = product["slug"].as_str().expect("slug");

    let resp = client
        .post(format!("{}/products/{slug}/reviews/", base_url()))
        .json(&json!({
            "user_name": "Reviewer",
            "rating": 5,
            "comment": "Exactly as described.",
        }))
        .send()
        .await
        .expect("Failed to submit review");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/products/{slug}/reviews/", base_url()))
        .send()
        .await
        .expect("Failed to list reviews");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse reviews");
    let reviews = body.as_array().expect("array expected");
    assert!(
        reviews
            .iter()
            .any(|r| r["comment"] == "Exactly as described."),
        "submitted review should appear in the list"
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_review_rating_bounds() {
    let client = client();
    let product = any_product(&client).await.expect("seed data required");
    let slug = product["slug"].as_str().expect("slug");

    for rating in [0, 6] {
        let resp = client
            .post(format!("{}/products/{slug}/reviews/", base_url()))
            .json(&json!({"user_name": "x", "rating": rating, "comment": "hi"}))
            .send()
            .await
            .expect("Failed to submit review");
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "rating {rating} should be rejected"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_review_for_unknown_product_is_not_found() {
    let client = client();

    let resp = client
        .post(format!("{}/products/no-such-product/reviews/", base_url()))
        .json(&json!({"user_name": "x", "rating": 4, "comment": "hi"}))
        .send()
        .await
        .expect("Failed to submit review");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
