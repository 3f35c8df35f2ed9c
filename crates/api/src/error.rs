//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; the response body is always `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::google::GoogleError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Google OAuth operation failed.
    #[error("Google login error: {0}")]
    Google(#[from] GoogleError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No valid bearer token presented.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (non-staff on admin surface).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body, matching the `{"error": message}` wire shape.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            // Wrong username/email/password is a 400, not a 401; 401 is
            // reserved for missing or invalid bearer tokens.
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::UserAlreadyExists
                | AuthError::WeakPassword(_)
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidUsername(_) => StatusCode::BAD_REQUEST,
                AuthError::NotStaff => StatusCode::FORBIDDEN,
                AuthError::Repository(_) | AuthError::Hash(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Google(err) => match err {
                GoogleError::ExchangeRejected(_) | GoogleError::MissingEmail => {
                    StatusCode::BAD_REQUEST
                }
                GoogleError::NotConfigured
                | GoogleError::Http(_)
                | GoogleError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Checkout(err) => match err {
                CheckoutError::CartNotFound => StatusCode::NOT_FOUND,
                CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the client. Internal details stay in the logs.
    fn client_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::NotStaff => {
                    "You do not have permission to access the admin panel.".to_string()
                }
                AuthError::UserAlreadyExists => {
                    "A user with this username or email already exists".to_string()
                }
                AuthError::WeakPassword(msg) | AuthError::InvalidUsername(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::Repository(_) | AuthError::Hash(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Google(err) => match err {
                GoogleError::ExchangeRejected(msg) => format!("Failed to exchange code: {msg}"),
                GoogleError::MissingEmail => "Email not provided by Google".to_string(),
                GoogleError::NotConfigured => {
                    "Google OAuth is not configured on the server".to_string()
                }
                GoogleError::Http(_) => "Failed to reach Google".to_string(),
                GoogleError::Repository(_) => "Internal server error".to_string(),
            },
            Self::Checkout(err) => match err {
                CheckoutError::CartNotFound => "Cart not found".to_string(),
                CheckoutError::EmptyCart => "Cart is empty".to_string(),
                CheckoutError::Database(_) => "Internal server error".to_string(),
            },
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized(msg) | Self::Forbidden(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.to_string(), "Not found: Product");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_credentials_is_400() {
        // Wrong password must be a 400 regardless of staff status
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_non_staff_admin_login_is_403() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::NotStaff)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_empty_cart_checkout_is_400() {
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
    }
}
