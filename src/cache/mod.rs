//! Cache Module
//!
//! Key-value cache seam used to mirror product data after updates.
//! Handlers receive a [`CacheClient`] through application state;
//! [`MemoryCache`] is the bundled backend.

mod memory;

use std::fmt::Display;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Prefix of the per-product cache key
pub const PRODUCT_KEY_PREFIX: &str = "product_data_";

/// Builds the cache key holding the projection of product `id`.
pub fn product_cache_key(id: impl Display) -> String {
    format!("{}{}", PRODUCT_KEY_PREFIX, id)
}

// == Cache Error ==
/// Failure reported by a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key rejected by the backend
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Backend could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == Cache Client Trait ==
/// Minimal key-value client. Entries never expire on their own.
#[async_trait]
pub trait CacheClient: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Stores `value`, replacing any previous entry.
    async fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;

    /// Returns false if the key was not present.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_cache_key() {
        assert_eq!(product_cache_key(7), "product_data_7");
        assert_eq!(product_cache_key("7"), "product_data_7");
    }
}
