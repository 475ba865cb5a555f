//! Seed the catalog from a YAML file.
//!
//! # File format
//!
//! ```yaml
//! categories:
//!   - id: 1
//!     name: Fruit
//!     description: Seasonal fruit
//!     products:
//!       - id: 1
//!         name: Apple
//!         price: "1.20"
//!         image: /static/img/apple.jpg
//! ```
//!
//! Rows are upserted by ID inside one transaction, so re-running the same
//! file is harmless. With `--clear` every existing category and product is
//! deleted first.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

use ebag_core::{CategoryId, ProductId};

use super::{CommandError, connect};

/// Maximum lengths of the `VARCHAR` name columns.
const MAX_CATEGORY_NAME_LEN: usize = 100;
const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Top-level seed file.
#[derive(Debug, Deserialize)]
pub struct CatalogSeed {
    pub categories: Vec<CategorySeed>,
}

/// A category and its products.
#[derive(Debug, Deserialize)]
pub struct CategorySeed {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// A product inside a category.
#[derive(Debug, Deserialize)]
pub struct ProductSeed {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

impl CatalogSeed {
    fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}

/// Check the seed for problems the database would reject or silently accept.
///
/// Returns one message per problem.
#[must_use]
pub fn validate(seed: &CatalogSeed) -> Vec<String> {
    let mut errors = Vec::new();
    let mut category_ids = HashSet::new();
    let mut product_ids = HashSet::new();

    for category in &seed.categories {
        if category.id.as_i32() < 1 {
            errors.push(format!("category {}: id must be positive", category.id));
        }
        if !category_ids.insert(category.id) {
            errors.push(format!("category {}: duplicate id", category.id));
        }
        if category.name.trim().is_empty() || category.name.len() > MAX_CATEGORY_NAME_LEN {
            errors.push(format!(
                "category {}: name must be 1-{MAX_CATEGORY_NAME_LEN} characters",
                category.id
            ));
        }

        for product in &category.products {
            if product.id.as_i32() < 1 {
                errors.push(format!("product {}: id must be positive", product.id));
            }
            if !product_ids.insert(product.id) {
                errors.push(format!("product {}: duplicate id", product.id));
            }
            if product.name.trim().is_empty() || product.name.len() > MAX_PRODUCT_NAME_LEN {
                errors.push(format!(
                    "product {}: name must be 1-{MAX_PRODUCT_NAME_LEN} characters",
                    product.id
                ));
            }
            if product.price.is_sign_negative() || product.price.scale() > 2 {
                errors.push(format!(
                    "product {}: price must be non-negative with at most 2 decimals",
                    product.id
                ));
            }
        }
    }

    errors
}

/// Seed the catalog from `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or a database statement fails (in which case nothing is written).
pub async fn run(file: &Path, clear: bool) -> Result<(), CommandError> {
    info!(path = %file.display(), "Loading catalog from file");

    // Read and validate before connecting to the database
    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| CommandError::Io {
            path: file.display().to_string(),
            source,
        })?;
    let seed: CatalogSeed = serde_yaml::from_str(&content)?;

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CommandError::Invalid(errors.len()));
    }

    let pool = connect().await?;
    let mut tx = pool.begin().await?;

    if clear {
        info!("Clearing existing catalog");
        sqlx::query("TRUNCATE storefront.product, storefront.category RESTART IDENTITY")
            .execute(&mut *tx)
            .await?;
    }

    for category in &seed.categories {
        upsert_category(&mut tx, category).await?;
        for product in &category.products {
            upsert_product(&mut tx, category.id, product).await?;
        }
    }

    // Keep SERIAL sequences ahead of the explicit IDs
    for table in ["storefront.category", "storefront.product"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), COALESCE(MAX(id), 1)) FROM {table}"
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Seeding complete!");
    info!("  Categories: {}", seed.categories.len());
    info!("  Products: {}", seed.product_count());

    Ok(())
}

async fn upsert_category(
    tx: &mut Transaction<'_, Postgres>,
    category: &CategorySeed,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO storefront.category (id, name, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name, description = EXCLUDED.description
        ",
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.description)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn upsert_product(
    tx: &mut Transaction<'_, Postgres>,
    category_id: CategoryId,
    product: &ProductSeed,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO storefront.product (id, category_id, name, description, price, image)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE
        SET category_id = EXCLUDED.category_id,
            name = EXCLUDED.name,
            description = EXCLUDED.description,
            price = EXCLUDED.price,
            image = EXCLUDED.image
        ",
    )
    .bind(product.id)
    .bind(category_id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.image)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
