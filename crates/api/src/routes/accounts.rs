//! Account route handlers: registration, login, Google OAuth, profile
//! and the public contact form.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ebasi_core::{Email, UserId};

use crate::db::contacts::ContactRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{ContactMessage, User};
use crate::services::{AuthService, GoogleService};
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Login payload. `username` carries either a username or an email.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Google login payload.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginPayload {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// Profile update payload. Absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Token payload returned by every login flow.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl TokenResponse {
    fn new(user: &User, token: String) -> Self {
        Self {
            token,
            user_id: user.id,
            email: user.email.to_string(),
            username: user.username.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

/// Google login response: the token payload plus profile extras.
#[derive(Debug, Serialize)]
pub struct GoogleLoginResponse {
    #[serde(flatten)]
    pub token: TokenResponse,
    pub first_name: String,
    pub last_name: String,
    pub picture: Option<String>,
    pub created: bool,
}

/// Register a new account.
///
/// POST /accounts/register/
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let (user, token) = AuthService::new(state.pool())
        .register(
            payload.username.trim(),
            payload.email.trim(),
            &payload.password,
            payload.first_name.trim(),
            payload.last_name.trim(),
        )
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(TokenResponse::new(&user, token))))
}

/// Login with username or email.
///
/// POST /accounts/login/
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>> {
    let (user, token) = AuthService::new(state.pool())
        .login(payload.username.trim(), &payload.password)
        .await?;

    Ok(Json(TokenResponse::new(&user, token)))
}

/// Login for the admin surface; requires the staff flag.
///
/// POST /accounts/admin/login/
#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>> {
    let (user, token) = AuthService::new(state.pool())
        .admin_login(payload.username.trim(), &payload.password)
        .await?;

    Ok(Json(TokenResponse::new(&user, token)))
}

/// Exchange a Google authorization code for a local session.
///
/// POST /accounts/google/
#[instrument(skip(state, payload))]
pub async fn google_login(
    State(state): State<AppState>,
    Json(payload): Json<GoogleLoginPayload>,
) -> Result<Json<GoogleLoginResponse>> {
    if payload.code.is_empty() {
        return Err(AppError::BadRequest(
            "Authorization code is required".to_string(),
        ));
    }

    let login = GoogleService::new(&state)
        .login(&payload.code, payload.redirect_uri.as_deref())
        .await?;

    if login.created {
        tracing::info!(user_id = %login.user.id, "User created via Google login");
    }

    Ok(Json(GoogleLoginResponse {
        token: TokenResponse::new(&login.user, login.token),
        first_name: login.user.first_name.clone(),
        last_name: login.user.last_name.clone(),
        picture: login.picture,
        created: login.created,
    }))
}

/// Current user's profile.
///
/// GET /accounts/profile/
pub async fn profile(RequireUser(user): RequireUser) -> Json<User> {
    Json(user)
}

/// Update profile fields.
///
/// PATCH /accounts/profile/
#[instrument(skip(state, patch, user), fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<User>> {
    let email = match patch.email.as_deref() {
        Some(raw) => Some(
            Email::parse(raw).map_err(|_| AppError::BadRequest("Invalid email address".to_string()))?,
        ),
        None => None,
    };

    let updated = UserRepository::new(state.pool())
        .update_profile(
            user.id,
            patch.first_name.as_deref(),
            patch.last_name.as_deref(),
            email.as_ref(),
        )
        .await?;

    Ok(Json(updated))
}

/// Submit a contact message. No authentication required.
///
/// POST /accounts/contact/
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<ContactMessage>)> {
    if payload.name.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and message are required".to_string(),
        ));
    }
    if Email::parse(&payload.email).is_err() {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let message = ContactRepository::new(state.pool())
        .create(
            payload.name.trim(),
            payload.email.trim(),
            payload.subject.trim(),
            payload.message.trim(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
