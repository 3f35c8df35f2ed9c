//! Core types for the Ebasi store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod slug;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{discount_percentage, is_on_sale};
pub use slug::{Slug, SlugError};
pub use status::*;
