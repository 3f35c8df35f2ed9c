//! Admin route handlers. Every handler takes [`RequireStaff`], so a
//! valid non-staff token gets a 403 and everything else a 401.
//!
//! [`RequireStaff`]: crate::middleware::RequireStaff

pub mod contacts;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the admin routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::stats))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::detail)
                .put(products::update)
                .patch(products::update)
                .delete(products::remove),
        )
        .route("/products/{id}/images", post(products::add_image))
        .route(
            "/products/{id}/images/{image_id}",
            delete(products::remove_image),
        )
        .route("/products/{id}/videos", post(products::add_video))
        .route(
            "/products/{id}/videos/{video_id}",
            delete(products::remove_video),
        )
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::detail))
        .route("/orders/{id}/update_status", patch(orders::update_status))
        .route("/users", get(users::list))
        .route("/users/{id}", get(users::detail))
        .route("/users/{id}/toggle_status", patch(users::toggle_status))
        .route("/contacts", get(contacts::list))
        .route("/contacts/{id}/mark_read", patch(contacts::mark_read))
}
