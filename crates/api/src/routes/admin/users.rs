//! Admin user handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;

use ebasi_core::UserId;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::User;
use crate::state::AppState;

/// All users, newest first.
///
/// GET /admin/users/
pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// One user.
///
/// GET /admin/users/{id}/
pub async fn detail(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    Ok(Json(user))
}

/// Flip a user's active flag. Deactivated users fail token auth with a
/// 401 on their next request.
///
/// PATCH /admin/users/{id}/toggle_status/
#[instrument(skip(state, _staff), fields(user_id = %id))]
pub async fn toggle_status(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>> {
    let is_active = UserRepository::new(state.pool()).toggle_active(id).await?;

    tracing::info!(user_id = %id, is_active, "User active flag toggled");

    Ok(Json(json!({"status": "success", "is_active": is_active})))
}
