//! Database operations for the Ebasi `PostgreSQL` database.
//!
//! One repository module per aggregate:
//!
//! - [`users`] - Accounts, bearer tokens, profile updates
//! - [`catalog`] - Categories, products, product media
//! - [`reviews`] - Product reviews
//! - [`carts`] - Carts and cart lines
//! - [`orders`] - Orders and order lines
//! - [`wishlist`] - Wishlist membership
//! - [`addresses`] - User shipping addresses
//! - [`contacts`] - Contact messages
//!
//! All queries are runtime-checked (`sqlx::query`/`query_as`); row structs
//! derive `FromRow` and live in [`crate::models`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p ebasi-cli -- migrate run
//! ```

pub mod addresses;
pub mod carts;
pub mod catalog;
pub mod contacts;
pub mod orders;
pub mod reviews;
pub mod users;
pub mod wishlist;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value failed to parse back into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// Convert a sqlx error, turning unique violations into `Conflict`.
    pub(crate) fn from_sqlx(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
