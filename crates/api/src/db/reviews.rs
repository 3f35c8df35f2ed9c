//! Review repository.

use sqlx::PgPool;

use ebasi_core::ProductId;

use super::RepositoryError;
use crate::models::Review;

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, product_id, user_name, rating, comment, created_at \
             FROM review WHERE product_id = $1 ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Store a review. The rating is validated to 1..=5 by the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        product_id: ProductId,
        user_name: &str,
        rating: i32,
        comment: &str,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO review (product_id, user_name, rating, comment) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, product_id, user_name, rating, comment, created_at",
        )
        .bind(product_id)
        .bind(user_name)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.pool)
        .await?;

        Ok(review)
    }
}
