//! Repository Layer
//!
//! Traits describing what the HTTP layer needs from persistence, with one
//! store-backed implementation each. Handlers only ever see the traits.

mod category;
mod product;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    Category, CategoryWithChildren, NewCategory, NewProduct, Page, PageRequest, Product,
    ProductChanges,
};
use crate::store::{CatalogStore, ProductFilter};
use crate::validation::RecordLookup;

pub use category::StoreCategoryRepository;
pub use product::StoreProductRepository;

pub type RepoResult<T> = std::result::Result<T, StoreError>;

/// Read access to categories, plus inserts for seeding.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Top-level categories with their direct children.
    async fn all(&self) -> RepoResult<Vec<CategoryWithChildren>>;

    async fn exists(&self, id: i64) -> RepoResult<bool>;

    async fn count(&self) -> RepoResult<usize>;

    async fn create(&self, new: NewCategory) -> RepoResult<Category>;
}

/// Full CRUD over products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, filter: &ProductFilter, page: PageRequest) -> RepoResult<Page<Product>>;

    async fn find(&self, id: i64) -> RepoResult<Product>;

    /// Whether another product (not `ignore`) already uses `sku`.
    async fn sku_taken(&self, sku: &str, ignore: Option<i64>) -> RepoResult<bool>;

    async fn create(&self, new: NewProduct) -> RepoResult<Product>;

    async fn update(&self, id: i64, changes: ProductChanges) -> RepoResult<Product>;

    async fn delete(&self, id: i64) -> RepoResult<()>;
}

/// Pair of repositories answering the validator's store lookups.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl Repositories {
    /// Database-backed repositories sharing one connection pool.
    pub fn from_store(store: CatalogStore) -> Self {
        Self {
            categories: Arc::new(StoreCategoryRepository::new(store.clone())),
            products: Arc::new(StoreProductRepository::new(store)),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

#[async_trait]
impl RecordLookup for Repositories {
    async fn sku_taken(&self, sku: &str, ignore: Option<i64>) -> RepoResult<bool> {
        self.products.sku_taken(sku, ignore).await
    }

    async fn category_exists(&self, id: i64) -> RepoResult<bool> {
        self.categories.exists(id).await
    }
}
