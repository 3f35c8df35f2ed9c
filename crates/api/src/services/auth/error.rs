//! Authentication error types.

use thiserror::Error;

use ebasi_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The username/email or password is wrong, or the account is disabled.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account authenticated but lacks staff rights for the admin surface.
    #[error("user is not staff")]
    NotStaff,

    /// The username or email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The password doesn't meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The username format is invalid.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// A database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}
