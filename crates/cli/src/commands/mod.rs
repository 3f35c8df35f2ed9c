//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by all CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Insecure value in {0}: {1}")]
    InsecureSecret(&'static str, String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Invalid seed data: {0}")]
    InvalidSeedData(String),
}

/// Connect to the database named in `EBASI_DATABASE_URL` (falling back
/// to `DATABASE_URL`).
pub(crate) async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("EBASI_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("EBASI_DATABASE_URL"))?;

    Ok(PgPool::connect(&database_url).await?)
}
