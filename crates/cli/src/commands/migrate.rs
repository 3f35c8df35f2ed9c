//! Database migration command.

use super::CliError;

/// Apply all pending migrations from `crates/api/migrations/`.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
