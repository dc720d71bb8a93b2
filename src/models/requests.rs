//! Request DTOs for the catalog API
//!
//! Product write bodies are taken as raw JSON objects and checked by the
//! rules in [`crate::validation`]; only the listing query is typed here.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::store::{CategoryFilter, ProductFilter};

/// Query string of `GET /v1/products`.
///
/// Empty values (`?search=`) are treated as absent. `category_id` and `page`
/// are kept as text so that malformed values narrow or default the listing
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl ProductQuery {
    /// Requested page number, defaulting to 1.
    pub fn page_number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(
            CategoryFilter::parse(self.category_id.as_deref()),
            self.search.clone(),
        )
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Turns a raw request body into a field map.
///
/// Anything that is not a JSON object (unparseable bytes, an empty body, an
/// array) yields an empty map, so the `required` rules report it field by
/// field.
pub fn into_payload(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
