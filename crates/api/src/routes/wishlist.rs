//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use ebasi_core::{ProductId, WishlistItemId};

use crate::db::RepositoryError;
use crate::db::catalog::CatalogRepository;
use crate::db::wishlist::WishlistRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::WishlistEntry;
use crate::state::AppState;

/// Toggle payload.
#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub product_id: ProductId,
}

/// A wishlist entry with its product summary.
#[derive(Debug, Serialize)]
pub struct WishlistEntryResponse {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_slug: ebasi_core::Slug,
    pub price: Decimal,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistEntry> for WishlistEntryResponse {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            id: entry.id,
            product_id: entry.product_id,
            product_name: entry.product_name,
            product_slug: entry.product_slug,
            price: entry.price,
            primary_image: entry.primary_image,
            created_at: entry.created_at,
        }
    }
}

/// The caller's wishlist, newest first.
///
/// GET /wishlist/
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<WishlistEntryResponse>>> {
    let entries = WishlistRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Toggle a product on the wishlist: 201 `added` or 200 `removed`.
/// Toggling twice round-trips to the starting state.
///
/// POST /wishlist/toggle/
#[instrument(skip(state, user), fields(user_id = %user.id, product_id = %payload.product_id))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<TogglePayload>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    CatalogRepository::new(state.pool())
        .product_by_id(payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let added = WishlistRepository::new(state.pool())
        .toggle(user.id, payload.product_id)
        .await?;

    let (status, verb) = if added {
        (StatusCode::CREATED, "added")
    } else {
        (StatusCode::OK, "removed")
    };

    Ok((
        status,
        Json(json!({"status": verb, "product_id": payload.product_id})),
    ))
}

/// Remove an entry. The path id is tried as a product id first, then as
/// a wishlist row id, so both client conventions work.
///
/// DELETE /wishlist/{id}/
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let wishlist = WishlistRepository::new(state.pool());

    match wishlist.remove(user.id, ProductId::new(id)).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(RepositoryError::NotFound) => {
            wishlist.remove_by_row(user.id, WishlistItemId::new(id)).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(e.into()),
    }
}
