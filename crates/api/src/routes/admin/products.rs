//! Admin product CRUD and media record management.
//!
//! Media endpoints manage URL records only; file storage lives outside
//! this service.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ebasi_core::{CategoryId, ProductId, ProductImageId, ProductVideoId, Slug, StockStatus};

use crate::db::catalog::{CatalogRepository, ProductData};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::{Product, ProductImage, ProductVideo};
use crate::state::AppState;

/// Product payload for create and update. The slug is derived from the
/// name when not given.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    #[serde(default)]
    pub compare_price: Option<Decimal>,
    pub sku: String,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
}

const fn default_true() -> bool {
    true
}

impl ProductPayload {
    fn validate(self) -> Result<ProductData> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Product name is required".to_string()));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::BadRequest("Price cannot be negative".to_string()));
        }

        let slug = match self.slug.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Slug::parse(raw)
                .map_err(|e| AppError::BadRequest(format!("Invalid slug: {e}")))?,
            None => Slug::from_name(&self.name)
                .map_err(|e| AppError::BadRequest(format!("Invalid product name: {e}")))?,
        };

        Ok(ProductData {
            name: self.name.trim().to_string(),
            slug,
            description: self.description,
            short_description: self.short_description,
            category_id: self.category_id,
            price: self.price,
            compare_price: self.compare_price,
            sku: self.sku.trim().to_string(),
            stock_quantity: self.stock_quantity,
            stock_status: self.stock_status,
            weight: self.weight,
            dimensions: self.dimensions,
            is_featured: self.is_featured,
            is_active: self.is_active,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
        })
    }
}

/// Image record payload.
#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub image_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub position: i32,
}

/// Video record payload.
#[derive(Debug, Deserialize)]
pub struct VideoPayload {
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub position: i32,
}

/// Full product with its media, for the admin detail view.
#[derive(Debug, Serialize)]
pub struct AdminProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub videos: Vec<ProductVideo>,
}

/// All products, active or not, newest first.
///
/// GET /admin/products/
pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<Product>>> {
    let products = CatalogRepository::new(state.pool()).all_products().await?;
    Ok(Json(products))
}

/// One product with its media records.
///
/// GET /admin/products/{id}/
pub async fn detail(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Json<AdminProductDetail>> {
    let catalog = CatalogRepository::new(state.pool());
    let product = catalog
        .product_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    let images = catalog.images(product.id).await?;
    let videos = catalog.videos(product.id).await?;

    Ok(Json(AdminProductDetail {
        product,
        images,
        videos,
    }))
}

/// Create a product.
///
/// POST /admin/products/
#[instrument(skip(state, _staff, payload), fields(name = %payload.name))]
pub async fn create(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>)> {
    let data = payload.validate()?;
    let product = CatalogRepository::new(state.pool())
        .create_product(&data)
        .await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields.
///
/// PUT|PATCH /admin/products/{id}/
#[instrument(skip(state, _staff, payload), fields(product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    let data = payload.validate()?;
    let product = CatalogRepository::new(state.pool())
        .update_product(id, &data)
        .await?;

    Ok(Json(product))
}

/// Delete a product and its dependent records.
///
/// DELETE /admin/products/{id}/
#[instrument(skip(state, _staff), fields(product_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool()).delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an image record.
///
/// POST /admin/products/{id}/images/
pub async fn add_image(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
    Json(payload): Json<ImagePayload>,
) -> Result<(StatusCode, Json<ProductImage>)> {
    if payload.image_url.trim().is_empty() {
        return Err(AppError::BadRequest("Image URL is required".to_string()));
    }

    let catalog = CatalogRepository::new(state.pool());
    catalog
        .product_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let image = catalog
        .add_image(
            id,
            payload.image_url.trim(),
            payload.alt_text.trim(),
            payload.is_primary,
            payload.position,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(image)))
}

/// Remove an image record.
///
/// DELETE /admin/products/{id}/images/{image_id}/
pub async fn remove_image(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path((id, image_id)): Path<(ProductId, ProductImageId)>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool())
        .delete_image(id, image_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Attach a video record.
///
/// POST /admin/products/{id}/videos/
pub async fn add_video(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
    Json(payload): Json<VideoPayload>,
) -> Result<(StatusCode, Json<ProductVideo>)> {
    if payload.video_url.trim().is_empty() {
        return Err(AppError::BadRequest("Video URL is required".to_string()));
    }

    let catalog = CatalogRepository::new(state.pool());
    catalog
        .product_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let video = catalog
        .add_video(
            id,
            payload.video_url.trim(),
            payload.thumbnail_url.as_deref(),
            payload.title.trim(),
            payload.position,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(video)))
}

/// Remove a video record.
///
/// DELETE /admin/products/{id}/videos/{video_id}/
pub async fn remove_video(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path((id, video_id)): Path<(ProductId, ProductVideoId)>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool())
        .delete_video(id, video_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
