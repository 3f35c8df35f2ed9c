//! Business-logic services layered over the repositories.

pub mod auth;
pub mod checkout;
pub mod dashboard;
pub mod google;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutService};
pub use dashboard::DashboardService;
pub use google::{GoogleError, GoogleService};
