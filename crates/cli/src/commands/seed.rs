//! Seed the catalog with demo products for local development.
//!
//! Idempotent: products are keyed by name and only inserted when absent, so
//! re-running the command never duplicates the catalog.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

/// Errors from the seed command.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Demo catalog: (name, description, price in cents).
const DEMO_PRODUCTS: &[(&str, &str, i64)] = &[
    (
        "Walnut Desk Organizer",
        "Five-compartment organizer milled from a single walnut block.",
        3499,
    ),
    (
        "Ceramic Pour-Over Set",
        "Dripper and carafe in matte stoneware, 600 ml.",
        5200,
    ),
    (
        "Linen Throw Blanket",
        "Stonewashed linen, 130 x 170 cm.",
        7800,
    ),
    (
        "Brass Desk Lamp",
        "Adjustable arm, warm-white LED, fabric cord.",
        11900,
    ),
    (
        "Cork Yoga Mat",
        "Natural cork over rubber, 4 mm.",
        4650,
    ),
];

/// Insert the demo catalog.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or a query fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let mut inserted = 0_u32;
    let mut skipped = 0_u32;

    for (name, description, cents) in DEMO_PRODUCTS {
        let result = sqlx::query(
            r"
            INSERT INTO products (name, description, price)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(description)
        .bind(Decimal::new(*cents, 2))
        .execute(&pool)
        .await?;

        if result.rows_affected() == 0 {
            skipped += 1;
        } else {
            inserted += 1;
        }
    }

    tracing::info!("Seeding complete!");
    tracing::info!("  Products inserted: {inserted}");
    tracing::info!("  Products skipped (already exist): {skipped}");

    Ok(())
}
