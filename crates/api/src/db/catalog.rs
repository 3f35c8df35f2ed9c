//! Catalog repository: categories, products and product media.
//!
//! Listing queries join the category and fold in review aggregates
//! (average rating, review count) plus the primary image so list
//! endpoints are a single round trip per page.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use ebasi_core::{CategoryId, ProductId, ProductImageId, ProductVideoId, Slug, StockStatus};

use super::RepositoryError;
use crate::models::{Category, Product, ProductImage, ProductListRow, ProductVideo};

/// Columns fetched for a full [`Product`] row.
const PRODUCT_COLUMNS: &str = "id, name, slug, description, short_description, category_id, \
     price, compare_price, sku, stock_quantity, stock_status, weight, dimensions, \
     is_featured, is_active, meta_title, meta_description, created_at, updated_at";

/// Sort order for product listings.
///
/// Wire values mirror the query parameter: a bare field ascending, a
/// `-` prefix descending. Unknown values fall back to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOrdering {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    CreatedAsc,
    #[default]
    CreatedDesc,
}

impl ProductOrdering {
    /// Parse an `ordering` query parameter.
    #[must_use]
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("price") => Self::PriceAsc,
            Some("-price") => Self::PriceDesc,
            Some("name") => Self::NameAsc,
            Some("-name") => Self::NameDesc,
            Some("created_at") => Self::CreatedAsc,
            _ => Self::CreatedDesc,
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::PriceAsc => "p.price ASC",
            Self::PriceDesc => "p.price DESC",
            Self::NameAsc => "p.name ASC",
            Self::NameDesc => "p.name DESC",
            Self::CreatedAsc => "p.created_at ASC",
            Self::CreatedDesc => "p.created_at DESC",
        }
    }
}

/// Filters for the product listing query.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to an active category by slug.
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring over name/descriptions/SKU.
    pub search: Option<String>,
    pub featured_only: bool,
    pub ordering: ProductOrdering,
}

/// Data for creating or replacing a product (admin surface).
#[derive(Debug, Clone)]
pub struct ProductData {
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub sku: String,
    pub stock_quantity: i32,
    pub stock_status: StockStatus,
    pub weight: Option<Decimal>,
    pub dimensions: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub meta_title: String,
    pub meta_description: String,
}

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active categories, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, description, image_url, is_active \
             FROM category WHERE is_active ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Look up an active category by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, description, image_url, is_active \
             FROM category WHERE slug = $1 AND is_active",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Active products matching `filter`, with category and review
    /// aggregates folded in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductListRow>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT p.id, p.name, p.slug, p.short_description, p.price, p.compare_price, \
                    p.stock_status, p.is_featured, \
                    c.id AS category_id, c.name AS category_name, c.slug AS category_slug, \
                    (SELECT pi.image_url FROM product_image pi \
                     WHERE pi.product_id = p.id AND pi.is_primary \
                     ORDER BY pi.position LIMIT 1) AS primary_image, \
                    (SELECT AVG(r.rating)::float8 FROM review r WHERE r.product_id = p.id) \
                        AS average_rating, \
                    (SELECT COUNT(*) FROM review r WHERE r.product_id = p.id) AS review_count \
             FROM product p \
             JOIN category c ON c.id = p.category_id \
             WHERE p.is_active",
        );

        if let Some(category) = &filter.category {
            qb.push(" AND c.is_active AND c.slug = ");
            qb.push_bind(category.clone());
        }
        if let Some(min_price) = filter.min_price {
            qb.push(" AND p.price >= ");
            qb.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND p.price <= ");
            qb.push_bind(max_price);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (p.name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR p.description ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR p.short_description ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR p.sku ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if filter.featured_only {
            qb.push(" AND p.is_featured");
        }

        qb.push(" ORDER BY ");
        qb.push(filter.ordering.sql());

        let rows = qb
            .build_query_as::<ProductListRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Look up an active product by slug (public detail page).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE slug = $1 AND is_active"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Look up a product by ID regardless of active flag (admin surface,
    /// cart/wishlist references).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// All products, newest first, active or not (admin surface).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Total product count, active or not (dashboard).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Ordered images for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn images(&self, product_id: ProductId) -> Result<Vec<ProductImage>, RepositoryError> {
        let images = sqlx::query_as::<_, ProductImage>(
            "SELECT id, product_id, image_url, alt_text, is_primary, position \
             FROM product_image WHERE product_id = $1 ORDER BY position",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// Ordered videos for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn videos(&self, product_id: ProductId) -> Result<Vec<ProductVideo>, RepositoryError> {
        let videos = sqlx::query_as::<_, ProductVideo>(
            "SELECT id, product_id, video_url, thumbnail_url, title, position \
             FROM product_video WHERE product_id = $1 ORDER BY position",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(videos)
    }

    /// Create a product (admin surface).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug or SKU is taken.
    pub async fn create_product(&self, data: &ProductData) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO product \
                 (name, slug, description, short_description, category_id, price, \
                  compare_price, sku, stock_quantity, stock_status, weight, dimensions, \
                  is_featured, is_active, meta_title, meta_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.short_description)
        .bind(data.category_id)
        .bind(data.price)
        .bind(data.compare_price)
        .bind(&data.sku)
        .bind(data.stock_quantity)
        .bind(data.stock_status)
        .bind(data.weight)
        .bind(&data.dimensions)
        .bind(data.is_featured)
        .bind(data.is_active)
        .bind(&data.meta_title)
        .bind(&data.meta_description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "product slug or SKU already exists"))?;

        Ok(product)
    }

    /// Replace a product's fields (admin surface).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the slug or SKU is taken.
    pub async fn update_product(
        &self,
        id: ProductId,
        data: &ProductData,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE product SET \
                 name = $2, slug = $3, description = $4, short_description = $5, \
                 category_id = $6, price = $7, compare_price = $8, sku = $9, \
                 stock_quantity = $10, stock_status = $11, weight = $12, dimensions = $13, \
                 is_featured = $14, is_active = $15, meta_title = $16, meta_description = $17, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.short_description)
        .bind(data.category_id)
        .bind(data.price)
        .bind(data.compare_price)
        .bind(&data.sku)
        .bind(data.stock_quantity)
        .bind(data.stock_status)
        .bind(data.weight)
        .bind(&data.dimensions)
        .bind(data.is_featured)
        .bind(data.is_active)
        .bind(&data.meta_title)
        .bind(&data.meta_description)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "product slug or SKU already exists"))?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product and (via cascade) its media, reviews, cart and
    /// wishlist references.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Attach an image record to a product (URL only; storage is external).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_image(
        &self,
        product_id: ProductId,
        image_url: &str,
        alt_text: &str,
        is_primary: bool,
        position: i32,
    ) -> Result<ProductImage, RepositoryError> {
        let image = sqlx::query_as::<_, ProductImage>(
            "INSERT INTO product_image (product_id, image_url, alt_text, is_primary, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, product_id, image_url, alt_text, is_primary, position",
        )
        .bind(product_id)
        .bind(image_url)
        .bind(alt_text)
        .bind(is_primary)
        .bind(position)
        .fetch_one(self.pool)
        .await?;

        Ok(image)
    }

    /// Remove an image record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the image doesn't exist.
    pub async fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ProductImageId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product_image WHERE id = $1 AND product_id = $2")
            .bind(image_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Attach a video record to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_video(
        &self,
        product_id: ProductId,
        video_url: &str,
        thumbnail_url: Option<&str>,
        title: &str,
        position: i32,
    ) -> Result<ProductVideo, RepositoryError> {
        let video = sqlx::query_as::<_, ProductVideo>(
            "INSERT INTO product_video (product_id, video_url, thumbnail_url, title, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, product_id, video_url, thumbnail_url, title, position",
        )
        .bind(product_id)
        .bind(video_url)
        .bind(thumbnail_url)
        .bind(title)
        .bind(position)
        .fetch_one(self.pool)
        .await?;

        Ok(video)
    }

    /// Remove a video record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the video doesn't exist.
    pub async fn delete_video(
        &self,
        product_id: ProductId,
        video_id: ProductVideoId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product_video WHERE id = $1 AND product_id = $2")
            .bind(video_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_parse() {
        assert_eq!(ProductOrdering::parse(Some("price")), ProductOrdering::PriceAsc);
        assert_eq!(ProductOrdering::parse(Some("-price")), ProductOrdering::PriceDesc);
        assert_eq!(ProductOrdering::parse(Some("name")), ProductOrdering::NameAsc);
        assert_eq!(ProductOrdering::parse(Some("-name")), ProductOrdering::NameDesc);
        assert_eq!(
            ProductOrdering::parse(Some("created_at")),
            ProductOrdering::CreatedAsc
        );
        assert_eq!(
            ProductOrdering::parse(Some("-created_at")),
            ProductOrdering::CreatedDesc
        );
    }

    #[test]
    fn test_ordering_defaults_to_newest_first() {
        assert_eq!(ProductOrdering::parse(None), ProductOrdering::CreatedDesc);
        assert_eq!(
            ProductOrdering::parse(Some("price; DROP TABLE product")),
            ProductOrdering::CreatedDesc
        );
    }
}
