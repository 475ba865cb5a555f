//! Catalog records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ebag_core::{CategoryId, ProductId};

/// A product category (`storefront.category`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

/// A product for sale (`storefront.product`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image path or URL, if the product has one.
    pub image: Option<String>,
}
