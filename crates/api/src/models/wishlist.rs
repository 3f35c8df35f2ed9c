//! Wishlist row model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use ebasi_core::{ProductId, Slug, WishlistItemId};

/// A wishlist entry joined with its product summary.
#[derive(Debug, Clone, FromRow)]
pub struct WishlistEntry {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_slug: Slug,
    pub price: Decimal,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
