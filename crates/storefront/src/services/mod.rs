//! Business logic services for storefront.
//!
//! - `catalog` - Read access to categories and products, with caching

pub mod catalog;

pub use catalog::{Catalog, PgCatalog};
