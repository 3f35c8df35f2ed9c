//! Admin dashboard aggregates.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::catalog::CatalogRepository;
use crate::db::orders::OrderRepository;
use crate::db::users::UserRepository;
use crate::models::Order;

/// How many recent orders the dashboard shows.
const RECENT_ORDERS: i64 = 5;

/// Aggregated storefront statistics.
pub struct DashboardStats {
    pub total_orders: i64,
    /// Sum of delivered orders only.
    pub total_revenue: Decimal,
    pub total_users: i64,
    pub total_products: i64,
    /// Orders per user as a percentage, uncapped.
    pub conversion_rate: f64,
    pub recent_orders: Vec<Order>,
}

/// Dashboard statistics service.
pub struct DashboardService<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compute the dashboard aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let orders = OrderRepository::new(self.pool);
        let users = UserRepository::new(self.pool);
        let catalog = CatalogRepository::new(self.pool);

        let total_orders = orders.count().await?;
        let total_revenue = orders.delivered_revenue().await?;
        let total_users = users.count().await?;
        let total_products = catalog.count().await?;
        let recent_orders = orders.recent(RECENT_ORDERS).await?;

        Ok(DashboardStats {
            total_orders,
            total_revenue,
            total_users,
            total_products,
            conversion_rate: conversion_rate(total_orders, total_users),
            recent_orders,
        })
    }
}

/// Orders divided by users as a percentage, rounded to two decimal
/// places. Deliberately uncapped: more orders than users reads over
/// 100%. Zero users yields zero.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Counts stay far below f64 precision
pub fn conversion_rate(total_orders: i64, total_users: i64) -> f64 {
    if total_users == 0 {
        return 0.0;
    }

    let rate = total_orders as f64 / total_users as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rate() {
        assert!((conversion_rate(5, 10) - 50.0).abs() < f64::EPSILON);
        assert!((conversion_rate(1, 3) - 33.33).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversion_rate_uncapped() {
        assert!((conversion_rate(10, 5) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversion_rate_no_users() {
        assert!((conversion_rate(0, 0) - 0.0).abs() < f64::EPSILON);
        assert!((conversion_rate(5, 0) - 0.0).abs() < f64::EPSILON);
    }
}
