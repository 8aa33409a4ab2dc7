//! Request and Response models for the catalog API
//!
//! This module defines the product entity, payload validation, and the DTOs
//! used for serializing/deserializing HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;
pub mod serializer;

// Re-export commonly used types
pub use product::{CachedProduct, NewProduct, Product, ProductChanges};
pub use requests::{DeleteRequest, ListQuery};
pub use responses::{HealthResponse, Page};
