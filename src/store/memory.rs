//! In-memory product store
//!
//! Ordered map keyed by id behind a tokio RwLock, with a monotonically
//! increasing id sequence.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ProductFilter, ProductStore, StoreError};
use crate::models::serializer::check_sale_window;
use crate::models::{NewProduct, Product, ProductChanges};

#[derive(Debug)]
struct Rows {
    products: BTreeMap<u64, Product>,
    /// Next id to hand out; ids are never reused
    next_id: u64,
}

// == Memory Product Store ==
/// Process-local [`ProductStore`].
#[derive(Debug)]
pub struct MemoryProductStore {
    rows: RwLock<Rows>,
}

impl MemoryProductStore {
    /// Creates an empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the number of stored products.
    pub async fn len(&self) -> usize {
        self.rows.read().await.products.len()
    }

    /// Returns true if the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.products.is_empty()
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut rows = self.rows.write().await;
        let id = rows.next_id;
        rows.next_id += 1;

        let product = product.with_id(id);
        rows.products.insert(id, product.clone());
        debug!("Inserted product {}", id);
        Ok(product)
    }

    async fn get(&self, id: u64) -> Result<Option<Product>, StoreError> {
        Ok(self.rows.read().await.products.get(&id).cloned())
    }

    async fn update(
        &self,
        id: u64,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let mut rows = self.rows.write().await;
        let Some(product) = rows.products.get_mut(&id) else {
            return Ok(None);
        };
        check_sale_window(&changes, Some(&*product)).map_err(StoreError::Constraint)?;
        product.apply(&changes);
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.rows.write().await.products.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        offset: usize,
        limit: usize,
    ) -> Result<(usize, Vec<Product>), StoreError> {
        let rows = self.rows.read().await;
        let matching: Vec<&Product> = rows
            .products
            .values()
            .filter(|product| filter.matches(product))
            .collect();

        let count = matching.len();
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((count, page))
    }
}
