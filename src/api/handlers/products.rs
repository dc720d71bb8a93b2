//! Product handlers
//!
//! Reads go through the cache; writes go to the repository and then evict
//! the cache entries they could have made stale:
//!
//! - create: the whole `products:` namespace
//! - update / delete: the product's own entry and every listing page

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::api::AppState;
use crate::cache::{CacheKey, Namespace};
use crate::error::{AppError, Result};
use crate::models::requests::into_payload;
use crate::models::{
    DataResponse, MessageResponse, NewProduct, Page, PageRequest, Product, ProductChanges,
    ProductQuery,
};
use crate::validation::{create_product_rules, update_product_rules, validate};

const PRODUCT_NOT_FOUND: &str = "Product not found.";
const UPDATE_FAILED: &str = "An error occurred while updating the product.";

/// Path ids that are not integers cannot name a product.
fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

/// Evicts everything an update or delete of `id` could have made stale.
async fn evict_product(state: &AppState, id: i64) {
    state.cache.forget(&CacheKey::product(id)).await;
    state.cache.forget_namespace(Namespace::ProductLists).await;
}

/// Handler for GET /v1/products
///
/// Filtered, paginated listing. Each filter combination and page is cached
/// under its own key.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Page<Product>>> {
    let filter = query.filter();
    let page = PageRequest::new(query.page_number(), state.settings.products_per_page);
    let key = CacheKey::product_list(&filter, page.page);
    let products = state.repos.products.clone();

    let listing = state
        .cache
        .remember(&key, state.settings.product_list_ttl, move || async move {
            products.list(&filter, page).await.map_err(AppError::from)
        })
        .await?;

    Ok(Json(listing))
}

/// Handler for GET /v1/products/:id
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    let products = state.repos.products.clone();

    let product = state
        .cache
        .remember(&CacheKey::product(id), state.settings.product_ttl, move || async move {
            products.find(id).await.map_err(AppError::from)
        })
        .await?;

    Ok(Json(product))
}

/// Handler for POST /v1/products
///
/// The body is read as raw bytes: a missing or unparseable JSON body is
/// validated as an empty object.
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataResponse<Product>>)> {
    let payload = into_payload(&body);
    validate(&payload, &create_product_rules(), &state.repos).await?;

    let new = NewProduct::from_validated(&payload)
        .ok_or_else(|| AppError::internal("Server error.", "validated payload is incomplete"))?;
    let product = state.repos.products.create(new).await?;

    let evicted = state.cache.forget_namespace(Namespace::Products).await;
    info!(id = product.id, sku = %product.sku, evicted, "product created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Product created successfully.", product)),
    ))
}

/// Handler for PUT /v1/products/:id
///
/// Partial update: only the supplied fields change. A payload with nothing
/// to change leaves the row and the cache untouched.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<DataResponse<Product>>> {
    let id = parse_id(&id)?;
    let payload = into_payload(&body);
    validate(&payload, &update_product_rules(id), &state.repos)
        .await
        .map_err(|e| e.with_message(UPDATE_FAILED))?;

    let changes = ProductChanges::from_validated(&payload);
    let changed = !changes.is_empty();
    let product = if changed {
        state.repos.products.update(id, changes).await
    } else {
        state.repos.products.find(id).await
    }
    .map_err(|e| AppError::from(e).with_message(UPDATE_FAILED))?;

    if changed {
        evict_product(&state, id).await;
        info!(id, "product updated");
    }

    Ok(Json(DataResponse::new(
        "Product updated successfully.",
        product,
    )))
}

/// Handler for DELETE /v1/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.repos.products.delete(id).await?;

    evict_product(&state, id).await;
    info!(id, "product deleted");

    Ok(Json(MessageResponse::new("Product deleted successfully.")))
}
