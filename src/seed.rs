//! Demo data seeding
//!
//! Fills an empty store with five top-level categories and ten child
//! categories spread across them, so the listing endpoint has something to
//! show on a fresh start.

use tracing::info;

use crate::error::StoreError;
use crate::models::NewCategory;
use crate::repository::CategoryRepository;

const PARENTS: [&str; 5] = ["Electronics", "Home & Garden", "Books", "Sports", "Toys"];

const CHILDREN: [&str; 10] = [
    "Phones",
    "Furniture",
    "Fiction",
    "Cycling",
    "Board Games",
    "Laptops",
    "Kitchen",
    "Science",
    "Running",
    "Puzzles",
];

/// Seeds demo categories unless the store already holds some.
///
/// Returns the number of categories inserted.
pub async fn seed_demo_categories(categories: &dyn CategoryRepository) -> Result<usize, StoreError> {
    if categories.count().await? > 0 {
        info!("categories present, skipping demo seed");
        return Ok(0);
    }

    let mut parent_ids = Vec::with_capacity(PARENTS.len());
    for name in PARENTS {
        parent_ids.push(categories.create(NewCategory::top_level(name)).await?.id);
    }

    for (i, name) in CHILDREN.iter().enumerate() {
        let parent = parent_ids[i % parent_ids.len()];
        categories.create(NewCategory::child_of(parent, *name)).await?;
    }

    let inserted = PARENTS.len() + CHILDREN.len();
    info!(inserted, "seeded demo categories");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::StoreCategoryRepository;
    use crate::store::CatalogStore;

    async fn repo() -> StoreCategoryRepository {
        StoreCategoryRepository::new(CatalogStore::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_seed_shape() {
        let repo = repo().await;

        assert_eq!(seed_demo_categories(&repo).await.unwrap(), 15);

        let tree = repo.all().await.unwrap();
        assert_eq!(tree.len(), 5);
        assert!(tree.iter().all(|t| t.children.len() == 2));
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_store() {
        let repo = repo().await;
        repo.create(NewCategory::top_level("Existing")).await.unwrap();

        assert_eq!(seed_demo_categories(&repo).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
