//! Product listing
//!
//! Id/search filtering, the on-sale switch, and pagination.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::ProductService;
use crate::error::Result;
use crate::models::{ListQuery, Product};
use crate::pagination::PageRequest;
use crate::store::ProductFilter;

/// One page of products plus what is needed to link its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Total matches before pagination
    pub count: usize,
    pub page: PageRequest,
    pub results: Vec<Product>,
}

impl ProductService {
    /// Lists products as of the current time.
    pub async fn list_products(&self, query: &ListQuery) -> Result<Listing> {
        self.list_products_at(query, Utc::now()).await
    }

    /// Lists products, evaluating the sale window at `now`.
    ///
    /// When `on_sale` is present it replaces the id and search filters
    /// entirely: `"true"` (any case) keeps only products on sale at `now`,
    /// any other value lists everything.
    pub async fn list_products_at(&self, query: &ListQuery, now: DateTime<Utc>) -> Result<Listing> {
        let page = self
            .pagination
            .resolve(query.limit.as_deref(), query.offset.as_deref());

        let filter = match query.on_sale.as_deref() {
            None => ProductFilter {
                id: query.id_filter()?,
                search_terms: query.search_terms(),
                on_sale_at: None,
            },
            Some(flag) if flag.eq_ignore_ascii_case("true") => ProductFilter::on_sale(now),
            Some(_) => ProductFilter::default(),
        };
        debug!(?filter, limit = page.limit, offset = page.offset, "Listing products");

        let (count, results) = self.store.list(&filter, page.offset, page.limit).await?;
        Ok(Listing {
            count,
            page,
            results,
        })
    }
}
