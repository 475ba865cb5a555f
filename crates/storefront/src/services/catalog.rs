//! Catalog access for route handlers.
//!
//! Handlers talk to the [`Catalog`] trait so they can be exercised against an
//! in-memory catalog in tests. [`PgCatalog`] is the production implementation
//! backed by [`CatalogRepository`], caching category pages and listings for a
//! configurable TTL. Product lookups for cart updates always hit the database.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use ebag_core::{CategoryId, ProductId};

use crate::db::{CatalogRepository, RepositoryError};
use crate::models::{Category, Product};

/// Read-only view of the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All categories ordered by ID.
    async fn categories(&self) -> Result<Vec<Category>, RepositoryError>;

    /// A single category.
    async fn category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    /// Products of a category ordered by ID.
    async fn products_in_category(&self, id: CategoryId)
    -> Result<Vec<Product>, RepositoryError>;

    /// Products with the given IDs, keyed by ID. Unknown IDs are absent.
    async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Categories,
    Category(CategoryId),
    CategoryProducts(CategoryId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Categories(Arc<Vec<Category>>),
    Category(Option<Category>),
    Products(Arc<Vec<Product>>),
}

/// `PostgreSQL`-backed catalog with a read-through cache.
#[derive(Clone)]
pub struct PgCatalog {
    inner: Arc<PgCatalogInner>,
}

struct PgCatalogInner {
    pool: PgPool,
    cache: Cache<CacheKey, CacheValue>,
}

impl PgCatalog {
    /// Create a catalog over `pool`, caching reads for `ttl`.
    #[must_use]
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .build();

        Self {
            inner: Arc::new(PgCatalogInner { pool, cache }),
        }
    }

    fn repository(&self) -> CatalogRepository<'_> {
        CatalogRepository::new(&self.inner.pool)
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories.as_ref().clone());
        }

        let categories = self.repository().list_categories().await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(Arc::new(categories.clone())),
            )
            .await;

        Ok(categories)
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        if let Some(CacheValue::Category(category)) =
            self.inner.cache.get(&CacheKey::Category(id)).await
        {
            debug!("Cache hit for category");
            return Ok(category);
        }

        let category = self.repository().get_category(id).await?;

        self.inner
            .cache
            .insert(CacheKey::Category(id), CacheValue::Category(category.clone()))
            .await;

        Ok(category)
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn products_in_category(
        &self,
        id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::CategoryProducts(id)).await
        {
            debug!("Cache hit for category products");
            return Ok(products.as_ref().clone());
        }

        let products = self.repository().products_in_category(id).await?;

        self.inner
            .cache
            .insert(
                CacheKey::CategoryProducts(id),
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;

        Ok(products)
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, RepositoryError> {
        let products = self.repository().products_by_ids(ids).await?;
        Ok(products.into_iter().map(|p| (p.id, p)).collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.repository().ping().await
    }
}

/// In-memory catalog for handler tests.
#[cfg(test)]
pub mod memory {
    use super::{
        Catalog, Category, CategoryId, HashMap, Product, ProductId, RepositoryError, async_trait,
    };

    /// Catalog holding fixed categories and products.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryCatalog {
        pub categories: Vec<Category>,
        pub products: Vec<Product>,
    }

    #[async_trait]
    impl Catalog for MemoryCatalog {
        async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
            Ok(self.categories.clone())
        }

        async fn category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
            Ok(self.categories.iter().find(|c| c.id == id).cloned())
        }

        async fn products_in_category(
            &self,
            id: CategoryId,
        ) -> Result<Vec<Product>, RepositoryError> {
            Ok(self
                .products
                .iter()
                .filter(|p| p.category_id == id)
                .cloned()
                .collect())
        }

        async fn products_by_ids(
            &self,
            ids: &[ProductId],
        ) -> Result<HashMap<ProductId, Product>, RepositoryError> {
            Ok(self
                .products
                .iter()
                .filter(|p| ids.contains(&p.id))
                .map(|p| (p.id, p.clone()))
                .collect())
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Ok(())
        }
    }
}
