//! Product listing filter

use std::fmt;

use sqlx::{QueryBuilder, Sqlite};

/// How a listing is restricted by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No restriction
    #[default]
    Any,
    /// Exact match on `category_id`
    Id(i64),
    /// A value that can never be a category id; matches no product
    Unmatched(String),
}

impl CategoryFilter {
    /// Reads a raw `category_id` query value.
    ///
    /// Blank and `0` select every category. Anything that is not an integer
    /// is kept as-is and matches nothing.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategoryFilter::Any,
            Some(raw) => match raw.parse::<i64>() {
                Ok(0) => CategoryFilter::Any,
                Ok(id) => CategoryFilter::Id(id),
                Err(_) => CategoryFilter::Unmatched(raw.to_string()),
            },
        }
    }
}

/// Renders the value as it appears in cache keys; `Any` renders empty.
impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::Any => Ok(()),
            CategoryFilter::Id(id) => write!(f, "{id}"),
            CategoryFilter::Unmatched(raw) => f.write_str(raw),
        }
    }
}

/// Filters applied to a product listing. Both groups combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    pub category: CategoryFilter,
    /// Case-insensitive substring of `name` OR `description`
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn new(category: CategoryFilter, search: Option<String>) -> Self {
        Self {
            category,
            search: search.filter(|s| !s.is_empty()),
        }
    }

    pub fn by_category(category_id: i64) -> Self {
        Self::new(CategoryFilter::Id(category_id), None)
    }

    pub fn by_search(search: impl Into<String>) -> Self {
        Self::new(CategoryFilter::Any, Some(search.into()))
    }

    /// Appends the `WHERE` clause for this filter to `query`.
    pub(crate) fn push_where(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        query.push(" WHERE 1 = 1");

        match &self.category {
            CategoryFilter::Any => {}
            CategoryFilter::Id(id) => {
                query.push(" AND category_id = ").push_bind(*id);
            }
            CategoryFilter::Unmatched(_) => {
                query.push(" AND 1 = 0");
            }
        }

        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            query
                .push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
    }
}

/// Escapes LIKE wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
