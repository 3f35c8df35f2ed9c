//! Shipping address route handlers. All operations are scoped to the
//! authenticated caller.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use ebasi_core::AddressId;

use crate::db::addresses::{AddressData, AddressRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::Address;
use crate::state::AppState;

/// Address payload for create and update.
#[derive(Debug, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub label: String,
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

impl AddressPayload {
    fn validate(&self) -> Result<AddressData> {
        if self.line1.trim().is_empty()
            || self.city.trim().is_empty()
            || self.country.trim().is_empty()
        {
            return Err(AppError::BadRequest(
                "Address line, city and country are required".to_string(),
            ));
        }

        Ok(AddressData {
            label: self.label.trim().to_string(),
            line1: self.line1.trim().to_string(),
            line2: self.line2.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
            is_default: self.is_default,
        })
    }
}

/// List the caller's addresses, default first.
///
/// GET /accounts/addresses/
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(addresses))
}

/// Create an address.
///
/// POST /accounts/addresses/
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<AddressPayload>,
) -> Result<(StatusCode, Json<Address>)> {
    let data = payload.validate()?;
    let address = AddressRepository::new(state.pool())
        .create(user.id, &data)
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// Replace an address.
///
/// PUT|PATCH /accounts/addresses/{id}/
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<AddressId>,
    Json(payload): Json<AddressPayload>,
) -> Result<Json<Address>> {
    let data = payload.validate()?;
    let address = AddressRepository::new(state.pool())
        .update(user.id, id, &data)
        .await?;

    Ok(Json(address))
}

/// Delete an address.
///
/// DELETE /accounts/addresses/{id}/
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    AddressRepository::new(state.pool())
        .delete(user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
