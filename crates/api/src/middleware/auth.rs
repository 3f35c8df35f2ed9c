//! Authentication extractors.
//!
//! Clients authenticate with an opaque bearer token issued at login.
//! Both `Authorization: Bearer <token>` and `Authorization: Token
//! <token>` are accepted.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires a valid bearer token for an active user.
///
/// Rejects with 401 when the header is missing, malformed, unknown, or
/// the account has been deactivated.
pub struct RequireUser(pub User);

/// Extractor that additionally requires the user to be staff.
///
/// Rejects with 403 when the token is valid but the user is not staff.
pub struct RequireStaff(pub User);

/// Pull the token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("Token "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let token = bearer_token(parts)
        .ok_or_else(|| AppError::Unauthorized("Authentication credentials were not provided".to_string()))?;

    let user = crate::db::users::UserRepository::new(state.pool())
        .get_by_token(token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("User account is disabled".to_string()));
    }

    Ok(user)
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;

        if !user.is_staff {
            return Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ));
        }

        Ok(Self(user))
    }
}
