//! Authentication service.
//!
//! Password registration and login with opaque bearer tokens. Tokens
//! are issued once per user on first login and never rotate.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::fmt::Write as _;

use rand::Rng;
use sqlx::PgPool;

use ebasi_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Length of issued bearer tokens.
const TOKEN_LENGTH: usize = 40;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user and issue their bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` / `InvalidEmail` /
    /// `WeakPassword` on validation failure.
    /// Returns `AuthError::UserAlreadyExists` if the username or email
    /// is taken.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(User, String), AuthError> {
        validate_username(username)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &email, Some(&password_hash), first_name, last_name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.issue_token(&user).await?;

        Ok((user, token))
    }

    /// Login with a username or email address.
    ///
    /// The identifier is tried as a username first; if no account
    /// matches and it parses as an email, the lookup falls back to the
    /// email column. Accounts without a stored password (created via
    /// Google) and deactivated accounts fail the same way as a wrong
    /// password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any authentication
    /// failure.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = self.verify_credentials(identifier, password).await?;
        let token = self.issue_token(&user).await?;

        Ok((user, token))
    }

    /// Login for the admin surface. Same as [`login`](Self::login) but
    /// additionally requires the staff flag.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on authentication failure.
    /// Returns `AuthError::NotStaff` for valid non-staff credentials.
    pub async fn admin_login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let user = self.verify_credentials(identifier, password).await?;

        if !user.is_staff {
            return Err(AuthError::NotStaff);
        }

        let token = self.issue_token(&user).await?;

        Ok((user, token))
    }

    async fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let mut row = self.users.get_password_hash(identifier).await?;

        if row.is_none() {
            if let Ok(email) = Email::parse(identifier) {
                if let Some(user) = self.users.get_by_email(&email).await? {
                    row = self.users.get_password_hash(&user.username).await?;
                }
            }
        }

        let (user, password_hash) = row.ok_or(AuthError::InvalidCredentials)?;
        let password_hash = password_hash.ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Fetch the user's token, generating one on first login.
    pub(crate) async fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let candidate = generate_token();
        let token = self.users.get_or_create_token(user.id, &candidate).await?;
        Ok(token)
    }
}

/// Generate a random 40-character hex token.
pub(crate) fn generate_token() -> String {
    let bytes: [u8; TOKEN_LENGTH / 2] = rand::rng().random();
    bytes.iter().fold(
        String::with_capacity(TOKEN_LENGTH),
        |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        },
    )
}

/// Validate username format: 1-150 characters, letters, digits and
/// `@`/`.`/`+`/`-`/`_` only.
fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::InvalidUsername("username is required".into()));
    }
    if username.len() > 150 {
        return Err(AuthError::InvalidUsername(
            "username must be at most 150 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(AuthError::InvalidUsername(
            "username may only contain letters, digits and @/./+/-/_".into(),
        ));
    }

    Ok(())
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice.smith+shop@example").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has spaces").is_err());
        assert!(validate_username(&"x".repeat(151)).is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(matches!(
            validate_password("1234567"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("correct horse battery").expect("hash");
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
