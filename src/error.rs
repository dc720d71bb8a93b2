//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror. Store and cache errors are
//! translated once, at the HTTP boundary, into [`AppError`] responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

// == App Error Enum ==
/// Error returned by every HTTP handler.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more input fields failed validation
    #[error("The given data was invalid")]
    Validation(ValidationErrors),

    /// The requested row does not exist
    #[error("{0}")]
    NotFound(String),

    /// Anything else; `detail` is exposed to the caller as-is
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl AppError {
    /// Builds an internal error with a caller-facing message and raw detail.
    pub fn internal(message: impl Into<String>, detail: impl ToString) -> Self {
        AppError::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Replaces the caller-facing message of an internal error.
    ///
    /// Validation and not-found errors pass through untouched.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            AppError::Internal { detail, .. } => AppError::Internal {
                message: message.into(),
                detail,
            },
            other => other,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            AppError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message, "error": detail })),
            )
                .into_response(),
        }
    }
}

// == Store Error Enum ==
/// Failures raised by the data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint was violated
    #[error("Duplicate value for unique column {table}.{column}")]
    UniqueViolation {
        table: &'static str,
        column: &'static str,
    },

    /// A foreign key pointed at a missing row
    #[error("Foreign key {table}.{column} references a missing row")]
    ForeignKeyViolation {
        table: &'static str,
        column: &'static str,
    },

    /// No row with the given id
    #[error("No row in {table} with id {id}")]
    RowNotFound { table: &'static str, id: i64 },

    /// The database could not run the statement
    #[error("Data store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { column, .. } => {
                AppError::Validation(ValidationErrors::single(
                    column,
                    format!("The {} has already been taken.", column.replace('_', " ")),
                ))
            }
            StoreError::ForeignKeyViolation { column, .. } => {
                AppError::Validation(ValidationErrors::single(
                    column,
                    format!("The selected {} is invalid.", column.replace('_', " ")),
                ))
            }
            StoreError::RowNotFound { table, .. } => {
                AppError::NotFound(format!("{} not found.", entity_label(table)))
            }
            StoreError::Unavailable(_) => AppError::internal("Server error.", err),
        }
    }
}

/// Maps a table name onto the entity name used in messages.
fn entity_label(table: &str) -> &str {
    match table {
        "products" => "Product",
        "categories" => "Category",
        other => other,
    }
}

// == Cache Error Enum ==
/// Failures raised by the cache store. Never surfaced to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key longer than the allowed maximum
    #[error("Key exceeds maximum length of {0} bytes")]
    KeyTooLong(usize),

    /// Serialized value larger than the allowed maximum
    #[error("Value exceeds maximum size of {0} bytes")]
    ValueTooLarge(usize),

    /// Cache is full and eviction failed
    #[error("Cache is full and eviction failed")]
    CacheFull,

    /// Value could not be encoded or decoded
    #[error("Cache codec error: {0}")]
    Codec(String),
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = AppError::NotFound("Product not found.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Product not found.");
    }

    #[tokio::test]
    async fn test_internal_response_exposes_detail() {
        let response = AppError::internal("Boom.", "pool timed out").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Boom.");
        assert_eq!(json["error"], "pool timed out");
    }

    #[tokio::test]
    async fn test_unique_violation_becomes_field_error() {
        let err: AppError = StoreError::UniqueViolation {
            table: "products",
            column: "sku",
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["errors"]["sku"][0], "The sku has already been taken.");
    }

    #[test]
    fn test_row_not_found_message() {
        let err: AppError = StoreError::RowNotFound {
            table: "products",
            id: 7,
        }
        .into();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Product not found."));
    }

    #[test]
    fn test_with_message_only_touches_internal() {
        let err = AppError::internal("Server error.", "x").with_message("Update failed.");
        assert!(matches!(err, AppError::Internal { ref message, .. } if message == "Update failed."));

        let err = AppError::NotFound("Product not found.".to_string()).with_message("ignored");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
