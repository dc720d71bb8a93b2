use async_trait::async_trait;

use super::{CategoryRepository, RepoResult};
use crate::models::{Category, CategoryWithChildren, NewCategory};
use crate::store::CatalogStore;

/// [`CategoryRepository`] over the catalog database.
#[derive(Debug, Clone)]
pub struct StoreCategoryRepository {
    store: CatalogStore,
}

impl StoreCategoryRepository {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for StoreCategoryRepository {
    async fn all(&self) -> RepoResult<Vec<CategoryWithChildren>> {
        self.store.top_level_categories().await
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        self.store.category_exists(id).await
    }

    async fn count(&self) -> RepoResult<usize> {
        self.store.category_count().await
    }

    async fn create(&self, new: NewCategory) -> RepoResult<Category> {
        self.store.insert_category(new).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> StoreCategoryRepository {
        StoreCategoryRepository::new(CatalogStore::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_parent_with_child() {
        let repo = repo().await;
        let parent = repo
            .create(NewCategory::top_level("Parent Category"))
            .await
            .unwrap();
        repo.create(NewCategory::child_of(parent.id, "Child Category"))
            .await
            .unwrap();

        let categories = repo.all().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category.name, "Parent Category");
        assert_eq!(categories[0].children.len(), 1);
        assert_eq!(categories[0].children[0].name, "Child Category");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = repo().await;
        let c = repo.create(NewCategory::top_level("Only")).await.unwrap();
        assert!(repo.exists(c.id).await.unwrap());
        assert!(!repo.exists(c.id + 1).await.unwrap());
    }
}
