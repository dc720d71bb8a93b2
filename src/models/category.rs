//! Category model
//!
//! Categories form a self-referencing tree through `parent_category_id`.
//! Listings only ever expose one level of that tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// `None` marks a top-level category
    pub parent_category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_category_id.is_none()
    }
}

/// A top-level category with its direct children loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

/// Input for inserting a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub parent_category_id: Option<i64>,
}

impl NewCategory {
    pub fn top_level(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_category_id: None,
        }
    }

    pub fn child_of(parent_id: i64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_category_id: Some(parent_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, parent: Option<i64>) -> Category {
        let now = Utc::now();
        Category {
            id,
            name: format!("Category {id}"),
            parent_category_id: parent,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_with_children_serializes_flat() {
        let tree = CategoryWithChildren {
            category: category(1, None),
            children: vec![category(2, Some(1))],
        };
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json["id"], 1);
        assert!(json["parent_category_id"].is_null());
        assert_eq!(json["children"][0]["id"], 2);
        assert_eq!(json["children"][0]["parent_category_id"], 1);
        assert!(json["children"][0].get("children").is_none());
    }

    #[test]
    fn test_with_children_round_trips_through_cache_encoding() {
        let tree = CategoryWithChildren {
            category: category(1, None),
            children: vec![category(2, Some(1)), category(3, Some(1))],
        };
        let encoded = serde_json::to_string(&tree).unwrap();
        let decoded: CategoryWithChildren = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, tree);
    }

    #[test]
    fn test_new_category_constructors() {
        assert!(NewCategory::top_level("Tools").parent_category_id.is_none());
        assert_eq!(NewCategory::child_of(4, "Saws").parent_category_id, Some(4));
        assert!(category(1, None).is_top_level());
        assert!(!category(2, Some(1)).is_top_level());
    }
}
