use async_trait::async_trait;

use super::{ProductRepository, RepoResult};
use crate::models::{NewProduct, Page, PageRequest, Product, ProductChanges};
use crate::store::{CatalogStore, ProductFilter};

/// [`ProductRepository`] over the catalog database.
#[derive(Debug, Clone)]
pub struct StoreProductRepository {
    store: CatalogStore,
}

impl StoreProductRepository {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn list(&self, filter: &ProductFilter, page: PageRequest) -> RepoResult<Page<Product>> {
        self.store.query_products(filter, page).await
    }

    async fn find(&self, id: i64) -> RepoResult<Product> {
        self.store.find_product(id).await
    }

    async fn sku_taken(&self, sku: &str, ignore: Option<i64>) -> RepoResult<bool> {
        self.store.sku_taken(sku, ignore).await
    }

    async fn create(&self, new: NewProduct) -> RepoResult<Product> {
        self.store.insert_product(new).await
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> RepoResult<Product> {
        self.store.update_product(id, changes).await
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.store.delete_product(id).await
    }
}
