//! Wishlist repository.

use sqlx::PgPool;

use ebasi_core::{ProductId, UserId, WishlistItemId};

use super::RepositoryError;
use crate::models::WishlistEntry;

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A user's wishlist joined with product summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<WishlistEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, WishlistEntry>(
            "SELECT w.id, w.product_id, p.name AS product_name, p.slug AS product_slug, \
                    p.price, \
                    (SELECT pi.image_url FROM product_image pi \
                     WHERE pi.product_id = p.id AND pi.is_primary \
                     ORDER BY pi.position LIMIT 1) AS primary_image, \
                    w.created_at \
             FROM wishlist_item w \
             JOIN product p ON p.id = w.product_id \
             WHERE w.user_id = $1 \
             ORDER BY w.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Toggle a product on the user's wishlist. Returns `true` if the
    /// product was added, `false` if an existing entry was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails (including
    /// a foreign-key violation for an unknown product).
    pub async fn toggle(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let removed = sqlx::query(
            "DELETE FROM wishlist_item WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        // Tolerate a concurrent add between the delete and the insert.
        sqlx::query(
            "INSERT INTO wishlist_item (user_id, product_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(true)
    }

    /// Remove a product from the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not on the
    /// wishlist.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM wishlist_item WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove an entry by its row id (fallback when the path id is not a
    /// product id).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such entry belongs to
    /// the user.
    pub async fn remove_by_row(
        &self,
        user_id: UserId,
        entry_id: WishlistItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM wishlist_item WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
