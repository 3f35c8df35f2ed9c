//! Admin dashboard handler.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::Order;
use crate::services::DashboardService;
use crate::state::AppState;

/// Dashboard statistics payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub total_users: i64,
    pub total_products: i64,
    pub conversion_rate: f64,
    pub recent_activity: Vec<Order>,
}

/// Aggregated storefront statistics.
///
/// GET /admin/dashboard/
#[instrument(skip(state, _staff))]
pub async fn stats(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<DashboardResponse>> {
    let stats = DashboardService::new(state.pool()).stats().await?;

    Ok(Json(DashboardResponse {
        total_orders: stats.total_orders,
        total_revenue: stats.total_revenue,
        total_users: stats.total_users,
        total_products: stats.total_products,
        conversion_rate: stats.conversion_rate,
        recent_activity: stats.recent_orders,
    }))
}
