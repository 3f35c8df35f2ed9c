//! Address repository.
//!
//! Every mutation is scoped to the owning user; a user can never touch
//! another user's addresses. At most one address per user is flagged
//! default, enforced by clearing the flag inside the same transaction
//! that sets it.

use sqlx::PgPool;

use ebasi_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::Address;

const ADDRESS_COLUMNS: &str =
    "id, user_id, label, line1, line2, city, postal_code, country, is_default";

/// Fields for creating or replacing an address.
#[derive(Debug, Clone)]
pub struct AddressData {
    pub label: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A user's addresses, default first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM address \
             WHERE user_id = $1 ORDER BY is_default DESC, id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Store a new address for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn create(
        &self,
        user_id: UserId,
        data: &AddressData,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if data.is_default {
            sqlx::query("UPDATE address SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            "INSERT INTO address \
                 (user_id, label, line1, line2, city, postal_code, country, is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&data.label)
        .bind(&data.line1)
        .bind(&data.line2)
        .bind(&data.city)
        .bind(&data.postal_code)
        .bind(&data.country)
        .bind(data.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// Replace an address owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist
    /// or belongs to someone else.
    pub async fn update(
        &self,
        user_id: UserId,
        address_id: AddressId,
        data: &AddressData,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if data.is_default {
            sqlx::query("UPDATE address SET is_default = FALSE WHERE user_id = $1 AND id <> $2")
                .bind(user_id)
                .bind(address_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            "UPDATE address SET \
                 label = $3, line1 = $4, line2 = $5, city = $6, \
                 postal_code = $7, country = $8, is_default = $9 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(address_id)
        .bind(user_id)
        .bind(&data.label)
        .bind(&data.line1)
        .bind(&data.line2)
        .bind(&data.city)
        .bind(&data.postal_code)
        .bind(&data.country)
        .bind(data.is_default)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        address.ok_or(RepositoryError::NotFound)
    }

    /// Delete an address owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist
    /// or belongs to someone else.
    pub async fn delete(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM address WHERE id = $1 AND user_id = $2")
            .bind(address_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
