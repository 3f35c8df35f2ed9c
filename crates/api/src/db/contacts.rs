//! Contact message repository.

use sqlx::PgPool;

use ebasi_core::ContactMessageId;

use super::RepositoryError;
use crate::models::ContactMessage;

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, is_read, created_at";

/// Repository for contact message database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store an inbound message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let stored = sqlx::query_as::<_, ContactMessage>(&format!(
            "INSERT INTO contact_message (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(stored)
    }

    /// All messages, newest first (admin surface).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_message ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Mark a message read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message doesn't exist.
    pub async fn mark_read(&self, id: ContactMessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE contact_message SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
