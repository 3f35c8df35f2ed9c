//! Catalog row models: categories, products, media, reviews.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use ebasi_core::{
    CategoryId, ProductId, ProductImageId, ProductVideoId, ReviewId, Slug, StockStatus,
};

/// A category row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// A full product row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub sku: String,
    pub stock_quantity: i32,
    pub stock_status: StockStatus,
    pub weight: Option<Decimal>,
    pub dimensions: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub meta_title: String,
    pub meta_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product listing row: product columns joined with its category and
/// review aggregates, as returned by the catalog list queries.
#[derive(Debug, Clone, FromRow)]
pub struct ProductListRow {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    pub short_description: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub stock_status: StockStatus,
    pub is_featured: bool,
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_slug: Slug,
    pub primary_image: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

/// An ordered product image; at most one per product is flagged primary
/// (application convention, not a constraint).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub image_url: String,
    pub alt_text: String,
    pub is_primary: bool,
    pub position: i32,
}

/// An ordered product video.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductVideo {
    pub id: ProductVideoId,
    pub product_id: ProductId,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub title: String,
    pub position: i32,
}

/// A product review. `user_name` is blank for anonymous reviews.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
