//! Admin contact inbox handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use ebasi_core::ContactMessageId;

use crate::db::contacts::ContactRepository;
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::ContactMessage;
use crate::state::AppState;

/// All contact messages, newest first.
///
/// GET /admin/contacts/
pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = ContactRepository::new(state.pool()).list().await?;
    Ok(Json(messages))
}

/// Mark a message read.
///
/// PATCH /admin/contacts/{id}/mark_read/
pub async fn mark_read(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ContactMessageId>,
) -> Result<Json<serde_json::Value>> {
    ContactRepository::new(state.pool()).mark_read(id).await?;
    Ok(Json(json!({"status": "success", "is_read": true})))
}
