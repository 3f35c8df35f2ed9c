//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness probe
//! GET    /health/ready                    - Database readiness probe
//!
//! # Catalog (public)
//! GET    /categories/                     - Active categories
//! GET    /categories/{slug}/products/     - Products of an active category
//! GET    /products/                       - Product listing with filters
//! GET    /products/featured/              - Featured products
//! GET    /products/{slug}/                - Product detail
//! GET    /products/{slug}/reviews/        - Reviews for a product
//! POST   /products/{slug}/reviews/        - Submit a review
//!
//! # Accounts
//! POST   /accounts/register/              - Register with password
//! POST   /accounts/login/                 - Login (username or email)
//! POST   /accounts/admin/login/           - Staff login
//! POST   /accounts/google/                - Google OAuth code exchange
//! GET    /accounts/profile/               - Current user profile
//! PATCH  /accounts/profile/               - Update profile
//! POST   /accounts/contact/               - Contact form (public)
//! GET    /accounts/addresses/             - List addresses
//! POST   /accounts/addresses/             - Create address
//! PUT    /accounts/addresses/{id}/        - Replace address
//! DELETE /accounts/addresses/{id}/        - Delete address
//!
//! # Cart (authenticated)
//! GET    /cart/                           - Get-or-create cart with items
//! POST   /cart/                           - Add product (atomic increment)
//! DELETE /cart/                           - Clear cart
//! PATCH  /cart/item/{product_id}/         - Set line quantity
//! DELETE /cart/item/{product_id}/         - Remove line
//!
//! # Checkout & orders (authenticated)
//! POST   /checkout/                       - Place an order from the cart
//! GET    /orders/                         - Caller's orders with items
//! GET    /orders/{id}/                    - One of the caller's orders
//!
//! # Wishlist (authenticated)
//! GET    /wishlist/                       - Caller's wishlist
//! POST   /wishlist/toggle/                - Toggle a product
//! DELETE /wishlist/{id}/                  - Remove an entry
//!
//! # Admin (staff token required)
//! GET    /admin/dashboard/                - Aggregated statistics
//! /admin/products/                        - Product CRUD + media records
//! /admin/orders/                          - Order list/detail + status
//! /admin/users/                           - User list/detail + toggle
//! /admin/contacts/                        - Contact inbox + mark read
//! ```
//!
//! Trailing slashes are stripped by a `NormalizePathLayer`, so both
//! forms of every path resolve.

pub mod accounts;
pub mod addresses;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod reviews;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/admin/login", post(accounts::admin_login))
        .route("/google", post(accounts::google_login))
        .route(
            "/profile",
            get(accounts::profile).patch(accounts::update_profile),
        )
        .route("/contact", post(accounts::contact))
        .route(
            "/addresses",
            get(addresses::list).post(addresses::create),
        )
        .route(
            "/addresses/{id}",
            patch(addresses::update)
                .put(addresses::update)
                .delete(addresses::remove),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::add).delete(cart::clear))
        .route(
            "/item/{product_id}",
            patch(cart::set_quantity).delete(cart::remove_item),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::list))
        .route("/toggle", post(wishlist::toggle))
        .route("/{id}", delete(wishlist::remove))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health probes
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        // Catalog
        .route("/categories", get(catalog::categories))
        .route("/categories/{slug}/products", get(catalog::category_products))
        .route("/products", get(catalog::products))
        .route("/products/featured", get(catalog::featured))
        .route("/products/{slug}", get(catalog::product_detail))
        .route(
            "/products/{slug}/reviews",
            get(reviews::list).post(reviews::create),
        )
        // Accounts
        .nest("/accounts", account_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Checkout & orders
        .route("/checkout", post(orders::checkout))
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::detail))
        // Wishlist
        .nest("/wishlist", wishlist_routes())
        // Admin surface
        .nest("/admin", admin::routes())
}
