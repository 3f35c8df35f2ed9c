//! Contact message model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use ebasi_core::ContactMessageId;

/// An inbound contact-form message; `is_read` is flipped by admins.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
