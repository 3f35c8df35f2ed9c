//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ebasi_core::{CategoryId, Slug, StockStatus, price};

use crate::db::catalog::{CatalogRepository, ProductFilter, ProductOrdering};
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::{Category, Product, ProductImage, ProductListRow, ProductVideo, Review};
use crate::state::AppState;

/// Query parameters accepted by the product listing.
#[derive(Debug, Deserialize, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl ProductQuery {
    fn into_filter(self, featured_only: bool) -> ProductFilter {
        ProductFilter {
            category: self.category.filter(|c| !c.is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            search: self.search.filter(|s| !s.is_empty()),
            featured_only,
            ordering: ProductOrdering::parse(self.ordering.as_deref()),
        }
    }
}

/// Category summary embedded in product payloads.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
}

/// Product payload for list endpoints.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub id: ebasi_core::ProductId,
    pub name: String,
    pub slug: Slug,
    pub short_description: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub is_on_sale: bool,
    pub discount_percentage: u32,
    pub stock_status: StockStatus,
    pub is_featured: bool,
    pub category: CategorySummary,
    pub primary_image: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

impl From<ProductListRow> for ProductListResponse {
    fn from(row: ProductListRow) -> Self {
        Self {
            is_on_sale: price::is_on_sale(row.price, row.compare_price),
            discount_percentage: price::discount_percentage(row.price, row.compare_price),
            id: row.id,
            name: row.name,
            slug: row.slug,
            short_description: row.short_description,
            price: row.price,
            compare_price: row.compare_price,
            stock_status: row.stock_status,
            is_featured: row.is_featured,
            category: CategorySummary {
                id: row.category_id,
                name: row.category_name,
                slug: row.category_slug,
            },
            primary_image: row.primary_image,
            average_rating: row.average_rating.map(round_rating),
            review_count: row.review_count,
        }
    }
}

/// Full product payload for the detail endpoint.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub is_on_sale: bool,
    pub discount_percentage: u32,
    pub category: Category,
    pub images: Vec<ProductImage>,
    pub videos: Vec<ProductVideo>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
    pub review_count: usize,
}

/// Ratings are reported to one decimal place.
fn round_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

/// List active categories.
///
/// GET /categories/
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool())
        .active_categories()
        .await?;

    Ok(Json(categories))
}

/// List active products with optional filters.
///
/// GET /products/
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductListResponse>>> {
    let rows = CatalogRepository::new(state.pool())
        .list_products(&query.into_filter(false))
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// List featured products.
///
/// GET /products/featured/
pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductListResponse>>> {
    let rows = CatalogRepository::new(state.pool())
        .list_products(&query.into_filter(true))
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Products of an active category.
///
/// GET /categories/{slug}/products/
pub async fn category_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(mut query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductListResponse>>> {
    let catalog = CatalogRepository::new(state.pool());

    // 404 before filtering so an unknown category isn't an empty list.
    catalog
        .category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

    query.category = Some(slug);
    let rows = catalog.list_products(&query.into_filter(false)).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Full product detail.
///
/// GET /products/{slug}/
#[instrument(skip(state))]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetailResponse>> {
    let catalog = CatalogRepository::new(state.pool());

    let product = catalog
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    // Fetched by id: the category may be inactive and still render here.
    let category = fetch_category(state.pool(), product.category_id).await?;
    let images = catalog.images(product.id).await?;
    let videos = catalog.videos(product.id).await?;
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(product.id)
        .await?;

    let average_rating = average_rating(&reviews);

    Ok(Json(ProductDetailResponse {
        is_on_sale: price::is_on_sale(product.price, product.compare_price),
        discount_percentage: price::discount_percentage(product.price, product.compare_price),
        category,
        images,
        videos,
        review_count: reviews.len(),
        average_rating,
        reviews,
        product,
    }))
}

async fn fetch_category(
    pool: &sqlx::PgPool,
    id: CategoryId,
) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, description, image_url, is_active \
         FROM category WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(crate::db::RepositoryError::from)?
    .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

    Ok(category)
}

fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let avg = reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / reviews.len() as f64;
    Some(round_rating(avg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ebasi_core::{ProductId, ReviewId};

    fn review(rating: i32) -> Review {
        Review {
            id: ReviewId::new(1),
            product_id: ProductId::new(1),
            user_name: String::new(),
            rating,
            comment: "fine".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_rating_one_decimal() {
        assert!((round_rating(4.666) - 4.7).abs() < f64::EPSILON);
        assert!((round_rating(3.04) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_rating() {
        let reviews = vec![review(5), review(4), review(5)];
        assert_eq!(average_rating(&reviews), Some(4.7));
    }

    #[test]
    fn test_average_rating_no_reviews() {
        assert_eq!(average_rating(&[]), None);
    }
}
