//! Demo catalog seed data.
//!
//! Inserts a small set of categories and products so a fresh install
//! has something to browse. Idempotent: rows are keyed by slug and
//! skipped when they already exist.

use rust_decimal::Decimal;

use super::CliError;

struct SeedProduct {
    category_slug: &'static str,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    short_description: &'static str,
    price: &'static str,
    // Pre-discount price shown struck through; on sale when above price
    compare_price: Option<&'static str>,
    sku: &'static str,
    stock_quantity: i32,
    is_featured: bool,
    image_url: &'static str,
}

const CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "Electronics",
        "electronics",
        "Phones, audio and smart devices",
    ),
    ("Clothing", "clothing", "Apparel for every season"),
    ("Home & Kitchen", "home-kitchen", "Everything for the home"),
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        category_slug: "electronics",
        name: "Wireless Earbuds Pro",
        slug: "wireless-earbuds-pro",
        description: "Noise-cancelling earbuds with 30 hours of battery life, \
                      wireless charging case and multipoint pairing.",
        short_description: "Noise-cancelling earbuds, 30h battery",
        price: "99.99",
        compare_price: Some("129.99"),
        sku: "ELEC-0001",
        stock_quantity: 120,
        is_featured: true,
        image_url: "https://cdn.example.com/seed/earbuds.jpg",
    },
    SeedProduct {
        category_slug: "electronics",
        name: "Smart Watch S2",
        slug: "smart-watch-s2",
        description: "Fitness tracking, notifications and a week of battery.",
        short_description: "Fitness watch with week-long battery",
        price: "199.00",
        compare_price: None,
        sku: "ELEC-0002",
        stock_quantity: 45,
        is_featured: true,
        image_url: "https://cdn.example.com/seed/watch.jpg",
    },
    SeedProduct {
        category_slug: "clothing",
        name: "Classic Cotton T-Shirt",
        slug: "classic-cotton-t-shirt",
        description: "Heavyweight cotton tee in a relaxed fit.",
        short_description: "Heavyweight cotton tee",
        price: "24.50",
        compare_price: None,
        sku: "CLTH-0001",
        stock_quantity: 300,
        is_featured: false,
        image_url: "https://cdn.example.com/seed/tshirt.jpg",
    },
    SeedProduct {
        category_slug: "home-kitchen",
        name: "Pour-Over Coffee Kettle",
        slug: "pour-over-coffee-kettle",
        description: "Gooseneck kettle with precise temperature control.",
        short_description: "Gooseneck kettle, precise pour",
        price: "49.00",
        compare_price: Some("64.00"),
        sku: "HOME-0001",
        stock_quantity: 80,
        is_featured: true,
        image_url: "https://cdn.example.com/seed/kettle.jpg",
    },
];

/// Insert the demo categories and products.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert
/// fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    let mut inserted = 0_u32;

    for (name, slug, description) in CATEGORIES {
        sqlx::query(
            r"
            INSERT INTO category (name, slug, description, is_active)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .execute(&pool)
        .await?;
    }

    for product in PRODUCTS {
        let price = parse_price(product.price, product.slug)?;
        let compare_price = product
            .compare_price
            .map(|p| parse_price(p, product.slug))
            .transpose()?;

        let product_id: Option<(i32,)> = sqlx::query_as(
            r"
            INSERT INTO product
                (category_id, name, slug, description, short_description,
                 price, compare_price, sku, stock_quantity, is_featured)
            SELECT c.id, $2, $3, $4, $5, $6, $7, $8, $9, $10
            FROM category c
            WHERE c.slug = $1
            ON CONFLICT (slug) DO NOTHING
            RETURNING id
            ",
        )
        .bind(product.category_slug)
        .bind(product.name)
        .bind(product.slug)
        .bind(product.description)
        .bind(product.short_description)
        .bind(price)
        .bind(compare_price)
        .bind(product.sku)
        .bind(product.stock_quantity)
        .bind(product.is_featured)
        .fetch_optional(&pool)
        .await?;

        // RETURNING yields a row only when the product was actually
        // inserted, so images are never duplicated on re-runs.
        if let Some((id,)) = product_id {
            sqlx::query(
                r"
                INSERT INTO product_image (product_id, image_url, alt_text, is_primary)
                VALUES ($1, $2, $3, TRUE)
                ",
            )
            .bind(id)
            .bind(product.image_url)
            .bind(product.name)
            .execute(&pool)
            .await?;
            inserted += 1;
        }
    }

    tracing::info!(
        products = inserted,
        skipped = PRODUCTS.len() as u32 - inserted,
        "Seed complete"
    );

    Ok(())
}

fn parse_price(value: &str, slug: &str) -> Result<Decimal, CliError> {
    value
        .parse()
        .map_err(|_| CliError::InvalidSeedData(format!("bad price {value:?} for {slug}")))
}
