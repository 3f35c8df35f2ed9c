//! Checkout and order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ebasi_core::OrderId;

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Order, OrderItem};
use crate::services::CheckoutService;
use crate::services::checkout::ShippingDetails;
use crate::state::AppState;

/// Checkout payload: shipping details plus an optional idempotency key.
#[derive(Debug, Deserialize)]
pub struct CheckoutPayload {
    pub full_name: String,
    /// Contact email; defaults to the account email.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// An order with its lines.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Place an order from the caller's cart.
///
/// POST /checkout/
///
/// Returns 201 for a newly placed order, 200 when an idempotency key
/// replays a previous one.
#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<CheckoutPayload>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    if payload.full_name.trim().is_empty()
        || payload.address.trim().is_empty()
        || payload.city.trim().is_empty()
        || payload.country.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Shipping name, address, city and country are required".to_string(),
        ));
    }

    let email = if payload.email.trim().is_empty() {
        user.email.to_string()
    } else {
        payload.email.trim().to_string()
    };

    let details = ShippingDetails {
        full_name: payload.full_name.trim().to_string(),
        email,
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        city: payload.city.trim().to_string(),
        postal_code: payload.postal_code.trim().to_string(),
        country: payload.country.trim().to_string(),
    };

    let placed = CheckoutService::new(state.pool())
        .place_order(user.id, &details, payload.idempotency_key.as_deref())
        .await?;

    let status = if placed.created {
        tracing::info!(order_id = %placed.order.id, total = %placed.order.total_amount, "Order placed");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(OrderResponse {
            order: placed.order,
            items: placed.items,
        }),
    ))
}

/// The caller's orders, newest first, each with its lines.
///
/// GET /orders/
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = OrderRepository::new(state.pool());
    let rows = orders.list_for_user(user.id).await?;

    let mut out = Vec::with_capacity(rows.len());
    for order in rows {
        let items = orders.items(order.id).await?;
        out.push(OrderResponse { order, items });
    }

    Ok(Json(out))
}

/// One of the caller's orders.
///
/// GET /orders/{id}/
pub async fn detail(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let orders = OrderRepository::new(state.pool());
    let order = orders
        .get_for_user(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
    let items = orders.items(order.id).await?;

    Ok(Json(OrderResponse { order, items }))
}
