//! Data Store Module
//!
//! SQLite database holding the `categories` and `products` tables. The schema
//! in `migrations/` owns the integrity rules: ids are auto-assigned,
//! `products.sku` is unique, and `products.category_id` /
//! `categories.parent_category_id` must point at an existing category.
//! Constraint failures reported by the database are mapped onto
//! [`StoreError`] variants here.

mod filter;

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use tracing::info;

use crate::error::StoreError;
use crate::models::{
    Category, CategoryWithChildren, NewCategory, NewProduct, Page, PageRequest, Product,
    ProductChanges,
};

pub use filter::{CategoryFilter, ProductFilter};

const CATEGORIES: &str = "categories";
const PRODUCTS: &str = "products";

type StoreResult<T> = std::result::Result<T, StoreError>;

// == Constraints ==
/// Which columns a failed write on `table` can blame.
struct Constraints {
    table: &'static str,
    unique: Option<&'static str>,
    foreign_key: &'static str,
}

const CATEGORY_WRITE: Constraints = Constraints {
    table: CATEGORIES,
    unique: None,
    foreign_key: "parent_category_id",
};

const PRODUCT_WRITE: Constraints = Constraints {
    table: PRODUCTS,
    unique: Some("sku"),
    foreign_key: "category_id",
};

impl Constraints {
    fn classify(&self, err: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db) = &err {
            if let (true, Some(column)) = (db.is_unique_violation(), self.unique) {
                return StoreError::UniqueViolation {
                    table: self.table,
                    column,
                };
            }
            if db.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation {
                    table: self.table,
                    column: self.foreign_key,
                };
            }
        }
        StoreError::from(err)
    }
}

// == Catalog Store ==
/// Connection pool over the catalog database.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    /// Opens the database at `url` and runs pending migrations.
    ///
    /// An in-memory database only lives as long as its connection, so it is
    /// always served by a single connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        info!(url, "database ready");

        Ok(Self { pool })
    }

    /// A fresh, empty in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // == Categories ==
    /// Inserts a category; the parent must exist.
    pub async fn insert_category(&self, new: NewCategory) -> StoreResult<Category> {
        let now = Utc::now();
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, parent_category_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(new.name)
        .bind(new.parent_category_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CATEGORY_WRITE.classify(e))
    }

    pub async fn category_exists(&self, id: i64) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn category_count(&self) -> StoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    /// Top-level categories ordered by id, each with its direct children.
    ///
    /// Only one level is loaded; grandchildren are never read.
    pub async fn top_level_categories(&self) -> StoreResult<Vec<CategoryWithChildren>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT c.* FROM categories c \
             LEFT JOIN categories p ON p.id = c.parent_category_id \
             WHERE c.parent_category_id IS NULL OR p.parent_category_id IS NULL \
             ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await?;

        let (top_level, nested): (Vec<_>, Vec<_>) =
            rows.into_iter().partition(Category::is_top_level);

        let mut children: BTreeMap<i64, Vec<Category>> = BTreeMap::new();
        for category in nested {
            if let Some(parent) = category.parent_category_id {
                children.entry(parent).or_default().push(category);
            }
        }

        Ok(top_level
            .into_iter()
            .map(|category| CategoryWithChildren {
                children: children.remove(&category.id).unwrap_or_default(),
                category,
            })
            .collect())
    }

    // == Products ==
    pub async fn insert_product(&self, new: NewProduct) -> StoreResult<Product> {
        let now = Utc::now();
        sqlx::query_as::<_, Product>(
            "INSERT INTO products \
             (name, description, sku, price, category_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(new.name)
        .bind(new.description)
        .bind(new.sku)
        .bind(new.price)
        .bind(new.category_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PRODUCT_WRITE.classify(e))
    }

    pub async fn find_product(&self, id: i64) -> StoreResult<Product> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::RowNotFound { table: PRODUCTS, id })
    }

    /// Whether a product other than `ignore` uses `sku`.
    pub async fn sku_taken(&self, sku: &str, ignore: Option<i64>) -> StoreResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE sku = ? AND id IS NOT ?")
                .bind(sku)
                .bind(ignore)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Writes the supplied fields of `changes` to product `id`.
    pub async fn update_product(&self, id: i64, changes: ProductChanges) -> StoreResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
             name = COALESCE(?, name), \
             description = COALESCE(?, description), \
             sku = COALESCE(?, sku), \
             price = COALESCE(?, price), \
             category_id = COALESCE(?, category_id), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.sku)
        .bind(changes.price)
        .bind(changes.category_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PRODUCT_WRITE.classify(e))?
        .ok_or(StoreError::RowNotFound { table: PRODUCTS, id })
    }

    pub async fn delete_product(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound { table: PRODUCTS, id });
        }
        Ok(())
    }

    /// Filtered, id-ordered page of products.
    ///
    /// `total` and `data` are read inside one transaction.
    pub async fn query_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Product>> {
        let mut tx = self.pool.begin().await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        filter.push_where(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;

        let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM products");
        filter.push_where(&mut select);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);
        let data = select
            .build_query_as::<Product>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page::new(data, page, total as u64))
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
