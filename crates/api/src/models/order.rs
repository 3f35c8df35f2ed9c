//! Order row models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use ebasi_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// An order row: an immutable snapshot of a completed checkout.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order line. `price` is the product price captured at checkout time;
/// later catalog price changes never alter it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
}
