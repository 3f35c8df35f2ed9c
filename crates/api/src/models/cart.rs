//! Cart row models and total computation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use ebasi_core::{CartId, CartItemId, ProductId, Slug, UserId};

/// A cart row. One per user, created on first access.
#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with its product's live price.
///
/// The price here is the product's current price, not a snapshot; cart
/// totals float with catalog price changes until checkout.
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_slug: Slug,
    pub price: Decimal,
    pub quantity: i32,
    pub primary_image: Option<String>,
}

/// Live cart total: Σ quantity × current price.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum()
}
