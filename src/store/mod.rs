//! Product Store Module
//!
//! The persistence seam of the catalog. Handlers and services only see the
//! [`ProductStore`] trait; [`MemoryProductStore`] is the bundled backend.

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::FieldErrors;
use crate::models::{NewProduct, Product, ProductChanges};

pub use memory::MemoryProductStore;

// == Store Error ==
/// Failure reported by a persistence backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not be reached or refused the operation
    #[error("Product store unavailable: {0}")]
    Unavailable(String),

    /// Changes would leave the stored row invalid; nothing was written
    #[error("Constraint violated: {0:?}")]
    Constraint(FieldErrors),
}

// == Product Filter ==
/// Row filter applied before pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Exact id match
    pub id: Option<u64>,
    /// Lowercase terms that must all appear in name or description
    pub search_terms: Vec<String>,
    /// Keep only products whose sale window contains this instant
    pub on_sale_at: Option<DateTime<Utc>>,
}

impl ProductFilter {
    /// Filter that keeps only products on sale at `at`.
    pub fn on_sale(at: DateTime<Utc>) -> Self {
        Self {
            on_sale_at: Some(at),
            ..Self::default()
        }
    }

    /// Returns true when `product` passes every configured condition.
    pub fn matches(&self, product: &Product) -> bool {
        if self.id.is_some_and(|id| id != product.id) {
            return false;
        }
        if self.on_sale_at.is_some_and(|at| !product.is_on_sale(at)) {
            return false;
        }
        product.matches_terms(&self.search_terms)
    }
}

// == Product Store Trait ==
/// Persistence operations over products.
///
/// `list` returns the total match count alongside the requested slice,
/// ordered by ascending id.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    async fn get(&self, id: u64) -> Result<Option<Product>, StoreError>;

    /// Applies `changes` and returns the stored result, or `None` if absent.
    ///
    /// The sale window is checked against the row as stored at write time;
    /// a reversed window fails with [`StoreError::Constraint`].
    async fn update(&self, id: u64, changes: ProductChanges)
        -> Result<Option<Product>, StoreError>;

    /// Returns false if no product had this id.
    async fn delete(&self, id: u64) -> Result<bool, StoreError>;

    async fn list(
        &self,
        filter: &ProductFilter,
        offset: usize,
        limit: usize,
    ) -> Result<(usize, Vec<Product>), StoreError>;
}
