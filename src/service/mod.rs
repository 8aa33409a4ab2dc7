//! Product Service Module
//!
//! Request-scoped catalog operations over the injected store and cache.
//! Listing lives in `query`, creation in `create`, and single-product
//! retrieve/update/delete with cache sync in `lifecycle`.

mod create;
mod lifecycle;
mod query;


use std::sync::Arc;

use crate::cache::CacheClient;
use crate::pagination::Pagination;
use crate::store::ProductStore;

pub use create::{check_price, CANNOT_BE_ZERO_OR_BELOW, MUST_BE_A_NUMBER};
pub use query::Listing;

// == Product Service ==
/// Catalog operations. Cheap to clone; collaborators are shared.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn CacheClient>,
    pagination: Pagination,
}

impl ProductService {
    /// Creates a service over the given collaborators.
    pub fn new(
        store: Arc<dyn ProductStore>,
        cache: Arc<dyn CacheClient>,
        pagination: Pagination,
    ) -> Self {
        Self {
            store,
            cache,
            pagination,
        }
    }
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService")
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
