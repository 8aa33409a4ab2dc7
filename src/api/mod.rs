//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /products` - List, search, and paginate products
//! - `POST /products` - Create a product
//! - `GET /products/:id` - Retrieve a product
//! - `PUT /products/:id` - Replace a product's fields
//! - `PATCH /products/:id` - Update some of a product's fields
//! - `DELETE /products/:id` - Delete a product
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
