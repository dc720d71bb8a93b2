//! Request Validation
//!
//! Declarative, rule-based validation of JSON payloads. Each field carries a
//! list of [`Rule`]s; failures are collected per field into
//! [`ValidationErrors`], which serializes as `{"field": ["message", ...]}`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, StoreError};

// == Validation Errors ==
/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error set holding one message for one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

// == Rules ==
/// A single validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Field must be present, non-null and not a blank string
    Required,
    /// Skip every other rule when the field is absent
    Sometimes,
    /// A `null` value passes and skips the remaining rules
    Nullable,
    /// Value must be a JSON string
    String,
    /// Value must be a number or a numeric string
    Numeric,
    /// No other product may already use this sku (optionally ignoring one id)
    UniqueSku { ignore: Option<i64> },
    /// Value must be the id of an existing category
    ExistsCategory,
}

/// Rules attached to one field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(field: &'static str, rules: Vec<Rule>) -> Self {
        Self { field, rules }
    }
}

/// Rule set for creating a product.
pub fn create_product_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("name", vec![Rule::Required, Rule::String]),
        FieldRules::new("description", vec![Rule::Nullable, Rule::String]),
        FieldRules::new(
            "sku",
            vec![Rule::Required, Rule::String, Rule::UniqueSku { ignore: None }],
        ),
        FieldRules::new("price", vec![Rule::Required, Rule::Numeric]),
        FieldRules::new("category_id", vec![Rule::Required, Rule::ExistsCategory]),
    ]
}

/// Rule set for a partial update of product `id`.
pub fn update_product_rules(id: i64) -> Vec<FieldRules> {
    vec![
        FieldRules::new("name", vec![Rule::Sometimes, Rule::String]),
        FieldRules::new("description", vec![Rule::Nullable, Rule::String]),
        FieldRules::new(
            "sku",
            vec![
                Rule::Sometimes,
                Rule::String,
                Rule::UniqueSku { ignore: Some(id) },
            ],
        ),
        FieldRules::new("price", vec![Rule::Sometimes, Rule::Numeric]),
        FieldRules::new("category_id", vec![Rule::Sometimes, Rule::ExistsCategory]),
    ]
}

// == Record Lookup ==
/// Store lookups needed by the database-backed rules.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn sku_taken(&self, sku: &str, ignore: Option<i64>) -> Result<bool, StoreError>;
    async fn category_exists(&self, id: i64) -> Result<bool, StoreError>;
}

// == Validate ==
/// Runs `rules` against `payload`.
///
/// Returns `AppError::Validation` when any field fails, and
/// `AppError::Internal` when a lookup against the store fails.
pub async fn validate(
    payload: &Map<String, Value>,
    rules: &[FieldRules],
    lookup: &dyn RecordLookup,
) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();

    for field_rules in rules {
        validate_field(payload, field_rules, lookup, &mut errors).await?;
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

async fn validate_field(
    payload: &Map<String, Value>,
    field_rules: &FieldRules,
    lookup: &dyn RecordLookup,
    errors: &mut ValidationErrors,
) -> Result<(), AppError> {
    let field = field_rules.field;
    let label = field.replace('_', " ");
    let value = payload.get(field);
    let rules = &field_rules.rules;

    if rules.contains(&Rule::Sometimes) && value.is_none() {
        return Ok(());
    }

    if rules.contains(&Rule::Required) && is_missing(value) {
        errors.add(field, format!("The {label} field is required."));
        return Ok(());
    }

    let value = match value {
        Some(value) => value,
        None => return Ok(()),
    };

    if value.is_null() && rules.contains(&Rule::Nullable) {
        return Ok(());
    }

    let mut type_ok = true;
    for rule in rules {
        match rule {
            Rule::String if !value.is_string() => {
                errors.add(field, format!("The {label} field must be a string."));
                type_ok = false;
            }
            Rule::Numeric if as_number(value).is_none() => {
                errors.add(field, format!("The {label} field must be a number."));
                type_ok = false;
            }
            Rule::UniqueSku { ignore } if type_ok => {
                if let Some(sku) = value.as_str() {
                    let taken = lookup
                        .sku_taken(sku, *ignore)
                        .await
                        .map_err(AppError::from)?;
                    if taken {
                        errors.add(field, format!("The {label} has already been taken."));
                    }
                }
            }
            Rule::ExistsCategory if type_ok => {
                let exists = match as_id(value) {
                    Some(id) => lookup.category_exists(id).await.map_err(AppError::from)?,
                    None => false,
                };
                if !exists {
                    errors.add(field, format!("The selected {label} is invalid."));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Absent, null, or a blank string.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

// == Value Coercion ==
/// Reads a JSON number or numeric string as `f64`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Reads a JSON integer or integer string as an id.
pub fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
