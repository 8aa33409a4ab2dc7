//! Single-product retrieve, update and delete
//!
//! Update and delete keep the `product_data_{id}` cache entry in step with
//! the store. Only a successful store operation touches the cache.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::ProductService;
use crate::cache::{product_cache_key, CacheError};
use crate::error::{ApiError, Result};
use crate::models::serializer::validate_payload;
use crate::models::{CachedProduct, DeleteRequest, Product};
use crate::store::StoreError;

impl ProductService {
    /// Reads one product straight from the store.
    pub async fn get_product(&self, id: u64) -> Result<Product> {
        self.store.get(id).await?.ok_or(ApiError::NotFound)
    }

    /// Updates one product, then overwrites its cache entry.
    ///
    /// `partial` allows required fields to be omitted (PATCH).
    pub async fn update_product(
        &self,
        id: u64,
        payload: &Map<String, Value>,
        partial: bool,
    ) -> Result<Product> {
        // Missing products answer 404 before any field is looked at.
        self.get_product(id).await?;

        let changes = validate_payload(payload, partial).map_err(ApiError::Validation)?;

        // The store checks the sale window against the row it writes.
        let product = self
            .store
            .update(id, changes)
            .await
            .map_err(|err| match err {
                StoreError::Constraint(errors) => ApiError::Validation(errors),
                other => ApiError::Store(other),
            })?
            .ok_or(ApiError::NotFound)?;

        let key = product_cache_key(id);
        let cached = serde_json::to_value(CachedProduct::from(&product))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        self.cache.set(&key, cached).await?;
        debug!("Cached {} after update", key);

        info!("Updated product {}", id);
        Ok(product)
    }

    /// Deletes one product, then drops the cache entry named by the body.
    ///
    /// The cache key comes from the request body's `id`, not from `id`.
    /// A body without an id leaves the cache untouched.
    pub async fn delete_product(&self, id: u64, request: &DeleteRequest) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(ApiError::NotFound);
        }
        info!("Deleted product {}", id);

        match &request.id {
            Some(cache_id) => {
                let key = product_cache_key(cache_id);
                match self.cache.delete(&key).await {
                    Ok(removed) => debug!("Dropped {} after delete (present: {})", key, removed),
                    // No entry can exist under a key the cache refuses.
                    Err(CacheError::InvalidKey(reason)) => {
                        warn!("Skipped cache delete for product {}: {}", id, reason)
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            None => warn!(
                "Deleted product {} without an id in the body; cache left as is",
                id
            ),
        }
        Ok(())
    }
}
