//! Database row models.
//!
//! Structs here mirror table rows (`sqlx::FromRow`) plus a few joined/
//! aggregated read shapes. JSON response types live next to the route
//! handlers that serve them.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod order;
pub mod user;
pub mod wishlist;

pub use address::Address;
pub use cart::{Cart, CartItem, cart_total};
pub use catalog::{Category, Product, ProductImage, ProductListRow, ProductVideo, Review};
pub use contact::ContactMessage;
pub use order::{Order, OrderItem};
pub use user::User;
pub use wishlist::WishlistEntry;
