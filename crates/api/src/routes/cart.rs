//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ebasi_core::{CartId, ProductId};

use crate::db::carts::CartRepository;
use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{CartItem, cart_total};
use crate::state::AppState;

/// Add-to-cart payload. Quantity defaults to one.
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// Quantity update payload.
#[derive(Debug, Deserialize)]
pub struct QuantityPatch {
    pub quantity: i32,
}

/// Cart payload with live totals.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: CartId,
    pub items: Vec<CartItemResponse>,
    pub total_price: Decimal,
    pub total_items: i32,
}

/// One cart line with its product summary.
#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub id: ebasi_core::CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_slug: ebasi_core::Slug,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub primary_image: Option<String>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            subtotal: item.price * Decimal::from(item.quantity),
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            product_slug: item.product_slug,
            price: item.price,
            quantity: item.quantity,
            primary_image: item.primary_image,
        }
    }
}

fn cart_response(cart_id: CartId, items: Vec<CartItem>) -> CartResponse {
    CartResponse {
        id: cart_id,
        total_price: cart_total(&items),
        total_items: items.iter().map(|i| i.quantity).sum(),
        items: items.into_iter().map(Into::into).collect(),
    }
}

/// The caller's cart, created on first access.
///
/// GET /cart/
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartResponse>> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    let items = carts.items(cart.id).await?;

    Ok(Json(cart_response(cart.id, items)))
}

/// Add a product to the cart. Repeated adds of the same product
/// increment the existing line atomically.
///
/// POST /cart/
#[instrument(skip(state, user), fields(user_id = %user.id, product_id = %payload.product_id))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<AddToCart>,
) -> Result<(StatusCode, Json<CartResponse>)> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }

    CatalogRepository::new(state.pool())
        .product_by_id(payload.product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts
        .add_item(cart.id, payload.product_id, payload.quantity)
        .await?;
    let items = carts.items(cart.id).await?;

    Ok((StatusCode::CREATED, Json(cart_response(cart.id, items))))
}

/// Clear the cart.
///
/// DELETE /cart/
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<StatusCode> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts.clear(cart.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Set a line's quantity. Zero or less removes the line.
///
/// PATCH /cart/item/{product_id}/
pub async fn set_quantity(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<ProductId>,
    Json(patch): Json<QuantityPatch>,
) -> Result<Json<CartResponse>> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts.set_quantity(cart.id, product_id, patch.quantity).await?;
    let items = carts.items(cart.id).await?;

    Ok(Json(cart_response(cart.id, items)))
}

/// Remove a line.
///
/// DELETE /cart/item/{product_id}/
pub async fn remove_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts.remove_item(cart.id, product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
