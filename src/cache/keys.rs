//! Cache key layout
//!
//! Every key starts with its namespace so a whole family can be evicted by
//! prefix:
//!
//! - `categories:all`
//! - `products:item:<id>`
//! - `products:list:category=<id>:search=<text>:page=<n>`

use std::fmt;

use crate::store::ProductFilter;

/// Key families that are invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Categories,
    Products,
    /// Only the product listings, not single products
    ProductLists,
}

impl Namespace {
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Categories => "categories:",
            Namespace::Products => "products:",
            Namespace::ProductLists => "products:list:",
        }
    }
}

/// A fully built cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn all_categories() -> Self {
        Self(format!("{}all", Namespace::Categories.prefix()))
    }

    pub fn product(id: i64) -> Self {
        Self(format!("{}item:{id}", Namespace::Products.prefix()))
    }

    /// One page of one filter combination; absent filters render empty.
    pub fn product_list(filter: &ProductFilter, page: u64) -> Self {
        let search = filter.search.as_deref().unwrap_or_default();

        Self(format!(
            "{}category={}:search={search}:page={page}",
            Namespace::ProductLists.prefix(),
            filter.category
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub fn in_namespace(&self, namespace: Namespace) -> bool {
        self.0.starts_with(namespace.prefix())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CategoryFilter;

    #[test]
    fn test_key_layout() {
        assert_eq!(CacheKey::all_categories().as_str(), "categories:all");
        assert_eq!(CacheKey::product(7).as_str(), "products:item:7");
        assert_eq!(
            CacheKey::product_list(&ProductFilter::default(), 1).as_str(),
            "products:list:category=:search=:page=1"
        );
        assert_eq!(
            CacheKey::product_list(&ProductFilter::new(CategoryFilter::Id(3), Some("oak".into())), 2)
                .as_str(),
            "products:list:category=3:search=oak:page=2"
        );
        assert_eq!(
            CacheKey::product_list(
                &ProductFilter::new(CategoryFilter::parse(Some("abc")), None),
                1
            )
            .as_str(),
            "products:list:category=abc:search=:page=1"
        );
    }

    #[test]
    fn test_distinct_filters_and_pages_get_distinct_keys() {
        let none = ProductFilter::default();
        let cat = ProductFilter::by_category(1);
        let search = ProductFilter::by_search("1");

        assert_ne!(CacheKey::product_list(&none, 1), CacheKey::product_list(&none, 2));
        assert_ne!(CacheKey::product_list(&none, 1), CacheKey::product_list(&cat, 1));
        assert_ne!(CacheKey::product_list(&cat, 1), CacheKey::product_list(&search, 1));
    }

    #[test]
    fn test_namespaces() {
        let list = CacheKey::product_list(&ProductFilter::default(), 1);
        assert!(list.in_namespace(Namespace::Products));
        assert!(list.in_namespace(Namespace::ProductLists));

        let item = CacheKey::product(1);
        assert!(item.in_namespace(Namespace::Products));
        assert!(!item.in_namespace(Namespace::ProductLists));

        assert!(!CacheKey::all_categories().in_namespace(Namespace::Products));
    }
}
