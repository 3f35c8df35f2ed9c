//! Admin account bootstrap.
//!
//! Deployments need one staff account before the admin API is usable.
//! Credentials come exclusively from the environment so they never end
//! up in shell history or the repository:
//!
//! - `EBASI_ADMIN_USERNAME`
//! - `EBASI_ADMIN_EMAIL`
//! - `EBASI_ADMIN_PASSWORD`

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use secrecy::{ExposeSecret, SecretString};

use super::CliError;

const MIN_PASSWORD_LENGTH: usize = 12;

/// Obvious throwaway values that must never become a staff password.
const PLACEHOLDER_PASSWORDS: &[&str] = &[
    "password",
    "changeme",
    "change-me",
    "admin",
    "secret",
    "letmein",
    "test",
    "example",
];

/// Create the staff account named in the environment, or repair its
/// staff flags if it already exists.
///
/// Existing accounts keep their password; only `is_staff` and
/// `is_superuser` are enforced. Safe to run on every deploy.
///
/// # Errors
///
/// Returns `CliError` if a credential variable is missing, the password
/// fails the strength check, or the database write fails.
pub async fn bootstrap() -> Result<(), CliError> {
    let username = require_env("EBASI_ADMIN_USERNAME")?;
    let email = require_env("EBASI_ADMIN_EMAIL")?;
    let password = SecretString::from(require_env("EBASI_ADMIN_PASSWORD")?);

    validate_password(password.expose_secret(), &username)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| CliError::Hash(e.to_string()))?
        .to_string();

    let pool = super::connect().await?;

    let (id, created): (i32, bool) = sqlx::query_as(
        r"
        INSERT INTO user_account (username, email, password_hash, is_active, is_staff, is_superuser)
        VALUES ($1, $2, $3, TRUE, TRUE, TRUE)
        ON CONFLICT (username) DO UPDATE
            SET is_staff = TRUE, is_superuser = TRUE, is_active = TRUE
        RETURNING id, (xmax = 0)
        ",
    )
    .bind(&username)
    .bind(&email)
    .bind(&hash)
    .fetch_one(&pool)
    .await?;

    if created {
        tracing::info!(user_id = id, %username, "Created admin account");
    } else {
        tracing::info!(user_id = id, %username, "Admin account already exists, staff flags verified");
    }

    Ok(())
}

fn require_env(name: &'static str) -> Result<String, CliError> {
    dotenvy::dotenv().ok();
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CliError::MissingEnvVar(name)),
    }
}

/// Reject passwords that would make the bootstrap account trivially
/// guessable.
fn validate_password(password: &str, username: &str) -> Result<(), CliError> {
    let lowered = password.to_lowercase();

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CliError::InsecureSecret(
            "EBASI_ADMIN_PASSWORD",
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    if PLACEHOLDER_PASSWORDS.iter().any(|p| lowered.contains(p)) {
        return Err(CliError::InsecureSecret(
            "EBASI_ADMIN_PASSWORD",
            "looks like a placeholder value".into(),
        ));
    }
    if lowered == username.to_lowercase() {
        return Err(CliError::InsecureSecret(
            "EBASI_ADMIN_PASSWORD",
            "must differ from the username".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_passwords() {
        assert!(validate_password("short", "admin").is_err());
    }

    #[test]
    fn rejects_placeholder_passwords() {
        assert!(validate_password("changeme-now-1234", "root").is_err());
        assert!(validate_password("Password1234567", "root").is_err());
    }

    #[test]
    fn rejects_password_equal_to_username() {
        assert!(validate_password("StoreOwner2026", "storeowner2026").is_err());
    }

    #[test]
    fn accepts_strong_password() {
        assert!(validate_password("k9#vR2!xQm7&wZp4", "admin").is_ok());
    }
}
