//! Cart repository.
//!
//! Each user has at most one cart, created lazily on first access.
//! Line quantities are adjusted with a single atomic upsert so two
//! concurrent adds for the same product never lose an increment.

use sqlx::PgPool;

use ebasi_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the user's cart, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if no cart row exists
    /// after the insert (the user was deleted concurrently).
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        sqlx::query("INSERT INTO cart (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, created_at FROM cart WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        cart.ok_or_else(|| RepositoryError::DataCorruption(format!("no cart for user {user_id}")))
    }

    /// Cart lines joined with live product data, oldest line first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT ci.id, ci.product_id, p.name AS product_name, p.slug AS product_slug, \
                    p.price, ci.quantity, \
                    (SELECT pi.image_url FROM product_image pi \
                     WHERE pi.product_id = p.id AND pi.is_primary \
                     ORDER BY pi.position LIMIT 1) AS primary_image \
             FROM cart_item ci \
             JOIN product p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.id",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add `quantity` of a product to the cart. If the product already has
    /// a line, its quantity is incremented in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including
    /// a foreign-key violation for an unknown product).
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        let id: CartItemId = sqlx::query_scalar(
            "INSERT INTO cart_item (cart_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (cart_id, product_id) \
             DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity \
             RETURNING id",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Set the quantity of the line holding `product_id`. A quantity of
    /// zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product has no line in
    /// this cart.
    pub async fn set_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = if quantity <= 0 {
            sqlx::query("DELETE FROM cart_item WHERE cart_id = $1 AND product_id = $2")
                .bind(cart_id)
                .bind(product_id)
                .execute(self.pool)
                .await?
        } else {
            sqlx::query(
                "UPDATE cart_item SET quantity = $3 WHERE cart_id = $1 AND product_id = $2",
            )
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .execute(self.pool)
            .await?
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove the line holding `product_id` from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product has no line in
    /// this cart.
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_item WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove every line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_item WHERE cart_id = $1")
            .bind(cart_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
