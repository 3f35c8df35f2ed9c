//! Checkout: turn a cart into an order.
//!
//! The whole conversion runs in one transaction with the cart row
//! locked `FOR UPDATE`, so two concurrent checkouts of the same cart
//! serialize and the second one sees an empty cart. Prices are
//! snapshotted into the order lines; later catalog edits never change
//! a placed order.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use thiserror::Error;

use ebasi_core::{CartId, OrderId, ProductId, UserId};

use crate::db::orders::ORDER_COLUMNS;
use crate::models::{Order, OrderItem};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The user has no cart.
    #[error("cart not found")]
    CartNotFound,

    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Shipping details captured at checkout.
#[derive(Debug, Clone)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// A placed (or replayed) order with its lines.
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// `false` when an idempotency key matched an existing order.
    pub created: bool,
}

#[derive(FromRow)]
struct CheckoutLine {
    product_id: ProductId,
    product_name: String,
    price: Decimal,
    quantity: i32,
}

/// Order total over (price, quantity) lines.
fn compute_total(lines: &[CheckoutLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum()
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's cart.
    ///
    /// When `idempotency_key` is given and an order with that key
    /// already exists for this user, that order is returned unchanged
    /// instead of placing a new one.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::CartNotFound` if the user has no cart and
    /// `CheckoutError::EmptyCart` if it has no lines.
    pub async fn place_order(
        &self,
        user_id: UserId,
        details: &ShippingDetails,
        idempotency_key: Option<&str>,
    ) -> Result<PlacedOrder, CheckoutError> {
        let mut tx = self.pool.begin().await?;

        // Lock the cart row so concurrent checkouts of the same cart
        // serialize on it.
        let cart_id: Option<CartId> =
            sqlx::query_scalar("SELECT id FROM cart WHERE user_id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let cart_id = cart_id.ok_or(CheckoutError::CartNotFound)?;

        if let Some(key) = idempotency_key {
            let existing = sqlx::query_as::<_, Order>(&format!(
                "SELECT {ORDER_COLUMNS} FROM \"order\" \
                 WHERE user_id = $1 AND idempotency_key = $2"
            ))
            .bind(user_id)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(order) = existing {
                let items = order_items(&mut tx, order.id).await?;
                tx.commit().await?;
                return Ok(PlacedOrder {
                    order,
                    items,
                    created: false,
                });
            }
        }

        let lines = sqlx::query_as::<_, CheckoutLine>(
            "SELECT ci.product_id, p.name AS product_name, p.price, ci.quantity \
             FROM cart_item ci \
             JOIN product p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.id",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = compute_total(&lines);

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO \"order\" \
                 (user_id, full_name, email, phone, address, city, postal_code, country, \
                  total_amount, idempotency_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&details.full_name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(&details.address)
        .bind(&details.city)
        .bind(&details.postal_code)
        .bind(&details.country)
        .bind(total)
        .bind(idempotency_key)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_item (order_id, product_id, product_name, price, quantity) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, order_id, product_id, product_name, price, quantity",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        sqlx::query("DELETE FROM cart_item WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(PlacedOrder {
            order,
            items,
            created: true,
        })
    }
}

async fn order_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    order_id: OrderId,
) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, product_name, price, quantity \
         FROM order_item WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(&mut **tx)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn line(product_id: i32, price: Decimal, quantity: i32) -> CheckoutLine {
        CheckoutLine {
            product_id: ProductId::new(product_id),
            product_name: format!("product-{product_id}"),
            price,
            quantity,
        }
    }

    #[test]
    fn test_compute_total_snapshot_prices() {
        let lines = vec![line(1, dec!(100.00), 2), line(2, dec!(50.00), 1)];
        assert_eq!(compute_total(&lines), dec!(250.00));
    }

    #[test]
    fn test_compute_total_empty() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }
}
