//! Admin order handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use ebasi_core::{OrderId, OrderStatus};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::Order;
use crate::routes::orders::OrderResponse;
use crate::state::AppState;

/// Status update payload.
#[derive(Debug, Deserialize)]
pub struct StatusPatch {
    pub status: String,
}

/// All orders, newest first.
///
/// GET /admin/orders/
pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// One order with its lines, regardless of owner.
///
/// GET /admin/orders/{id}/
pub async fn detail(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let orders = OrderRepository::new(state.pool());
    let order = orders
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
    let items = orders.items(order.id).await?;

    Ok(Json(OrderResponse { order, items }))
}

/// Move an order to a new status. Transitions out of terminal states
/// (delivered, cancelled) are rejected.
///
/// PATCH /admin/orders/{id}/update_status/
#[instrument(skip(state, _staff), fields(order_id = %id, status = %patch.status))]
pub async fn update_status(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<OrderId>,
    Json(patch): Json<StatusPatch>,
) -> Result<Json<serde_json::Value>> {
    let new_status: OrderStatus = patch
        .status
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid status: {}", patch.status)))?;

    let orders = OrderRepository::new(state.pool());
    let order = orders
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    if !order.status.can_transition_to(new_status) {
        return Err(AppError::BadRequest(format!(
            "Cannot change status from {} to {}",
            order.status, new_status
        )));
    }

    let updated = orders.update_status(id, new_status).await?;

    tracing::info!(order_id = %id, from = %order.status, to = %updated.status, "Order status updated");

    Ok(Json(json!({"status": "success", "new_status": updated.status})))
}
