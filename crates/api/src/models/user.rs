//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use ebasi_core::{Email, UserId};

/// A user account row.
///
/// `password_hash` is deliberately not part of this struct; it is only
/// fetched by the auth service when verifying a login. Google-created
/// accounts have no password hash at all.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}
