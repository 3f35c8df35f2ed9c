//! User address model.

use serde::Serialize;
use sqlx::FromRow;

use ebasi_core::{AddressId, UserId};

/// A user-owned shipping address.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub label: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}
