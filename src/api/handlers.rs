//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Handlers only decode
//! the request and shape the response; the work happens in
//! [`ProductService`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheClient, MemoryCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::requests::parse_object;
use crate::models::{DeleteRequest, HealthResponse, ListQuery, Page, Product};
use crate::pagination::Pagination;
use crate::service::ProductService;
use crate::store::{MemoryProductStore, ProductStore};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    /// Creates a new AppState over the given collaborators.
    pub fn new(
        store: Arc<dyn ProductStore>,
        cache: Arc<dyn CacheClient>,
        pagination: Pagination,
    ) -> Self {
        Self {
            products: ProductService::new(store, cache, pagination),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the in-memory store and cache.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryProductStore::new()),
            Arc::new(MemoryCache::new()),
            config.pagination(),
        )
    }
}

/// Path ids that are not integers name no product.
fn parse_id(raw: &str) -> Result<u64> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// Handler for GET /products
///
/// The query string is decoded by hand so repeated keys keep their last
/// value instead of rejecting the request.
pub async fn list_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<Product>>> {
    let query = ListQuery::from_query(uri.query());
    let listing = state.products.list_products(&query).await?;

    let path = uri.path();
    let raw_query = uri.query();
    Ok(Json(Page {
        count: listing.count,
        next: listing.page.next_link(path, raw_query, listing.count),
        previous: listing.page.previous_link(path, raw_query),
        results: listing.results,
    }))
}

/// Handler for POST /products
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>)> {
    let payload = parse_object(&body)?;
    let product = state.products.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.products.get_product(parse_id(&id)?).await?;
    Ok(Json(product))
}

/// Handler for PUT /products/:id
pub async fn put_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>> {
    update(state, &id, &body, false).await
}

/// Handler for PATCH /products/:id
pub async fn patch_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>> {
    update(state, &id, &body, true).await
}

async fn update(state: AppState, id: &str, body: &[u8], partial: bool) -> Result<Json<Product>> {
    let id = parse_id(id)?;
    let payload = parse_object(body)?;
    let product = state.products.update_product(id, &payload, partial).await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
///
/// The optional JSON body's `id` selects the cache entry to drop.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let request = DeleteRequest::from_body(&body)?;
    state.products.delete_product(id, &request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
