//! Product review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::catalog::CatalogRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::Review;
use crate::state::AppState;

/// Review submission payload. `user_name` left blank reads as anonymous.
#[derive(Debug, Deserialize)]
pub struct NewReview {
    #[serde(default)]
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
}

/// List reviews for a product, newest first.
///
/// GET /products/{slug}/reviews/
pub async fn list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Review>>> {
    let product = CatalogRepository::new(state.pool())
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(product.id)
        .await?;

    Ok(Json(reviews))
}

/// Submit a review. No authentication required.
///
/// POST /products/{slug}/reviews/
#[instrument(skip(state, payload), fields(product = %slug))]
pub async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>)> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    if payload.comment.trim().is_empty() {
        return Err(AppError::BadRequest("Comment is required".to_string()));
    }

    let product = CatalogRepository::new(state.pool())
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let review = ReviewRepository::new(state.pool())
        .create(
            product.id,
            payload.user_name.trim(),
            payload.rating,
            payload.comment.trim(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
