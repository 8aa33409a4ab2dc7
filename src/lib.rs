//! Product Catalog - A small product catalog API
//!
//! Lists, searches, and paginates products, filters by sale window, and
//! keeps a per-product cache entry in step with updates and deletes.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use service::ProductService;
