//! Product model and write inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::validation::{as_id, as_number};

/// A product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub category_id: i64,
}

impl NewProduct {
    /// Extracts a product from a payload that already passed
    /// [`create_product_rules`](crate::validation::create_product_rules).
    ///
    /// Returns `None` when a required field is missing or mistyped.
    pub fn from_validated(payload: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            name: payload.get("name")?.as_str()?.to_string(),
            description: string_field(payload, "description"),
            sku: payload.get("sku")?.as_str()?.to_string(),
            price: as_number(payload.get("price")?)?,
            category_id: as_id(payload.get("category_id")?)?,
        })
    }
}

/// A partial update. `None` keeps the stored value.
///
/// A JSON `null` and an absent key both map to `None`, so a description
/// cannot be cleared through an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
}

impl ProductChanges {
    /// Extracts the supplied fields from a payload that already passed
    /// [`update_product_rules`](crate::validation::update_product_rules).
    pub fn from_validated(payload: &Map<String, Value>) -> Self {
        Self {
            name: string_field(payload, "name"),
            description: string_field(payload, "description"),
            sku: string_field(payload, "sku"),
            price: payload.get("price").and_then(as_number),
            category_id: payload.get("category_id").and_then(as_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn string_field(payload: &Map<String, Value>, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Desk Lamp".to_string(),
            description: Some("Warm LED light".to_string()),
            sku: "LAMP-1".to_string(),
            price: 25.0,
            category_id: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_product_from_payload() {
        let payload = json!({
            "name": "Chair",
            "sku": "CH-1",
            "price": "49.90",
            "category_id": "2"
        });
        let new = NewProduct::from_validated(payload.as_object().unwrap()).unwrap();

        assert_eq!(new.name, "Chair");
        assert_eq!(new.description, None);
        assert_eq!(new.price, 49.9);
        assert_eq!(new.category_id, 2);
    }

    #[test]
    fn test_changes_treat_null_as_absent() {
        let payload = json!({ "description": null, "price": 10 });
        let changes = ProductChanges::from_validated(payload.as_object().unwrap());

        assert_eq!(changes.description, None);
        assert_eq!(changes.price, Some(10.0));
        assert!(!changes.is_empty());
        assert!(ProductChanges::from_validated(&Map::new()).is_empty());
    }

    #[test]
    fn test_product_json_fields() {
        let json = serde_json::to_value(product()).unwrap();
        for field in [
            "id",
            "name",
            "description",
            "sku",
            "price",
            "category_id",
            "created_at",
            "updated_at",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
