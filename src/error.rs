//! Error types for the catalog API
//!
//! Provides unified error handling using thiserror. Every error maps onto an
//! HTTP status and a JSON body shaped like the field errors clients expect.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::cache::CacheError;
use crate::store::StoreError;

/// Field name to list of messages, as returned for 400 responses.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

// == Api Error Enum ==
/// Unified error type for the catalog API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Price pre-check failed on create
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// One or more payload fields failed validation
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// No product with the requested id
    #[error("Not found")]
    NotFound,

    /// Request body could not be read as JSON
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Persistence collaborator failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Cache collaborator failure
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Builds a validation error carrying a single message for one field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        ApiError::Validation(errors)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidPrice(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "price": message }))).into_response()
            }
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Not found." })),
            )
                .into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": message }))).into_response()
            }
            ApiError::Store(StoreError::Constraint(errors)) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Store(err) => {
                error!("Product store failure: {}", err);
                internal_error(err.to_string())
            }
            ApiError::Cache(err) => {
                error!("Cache failure: {}", err);
                internal_error(err.to_string())
            }
            ApiError::Internal(message) => {
                error!("Internal error: {}", message);
                internal_error(message)
            }
        }
    }
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": message })),
    )
        .into_response()
}

// == Result Type Alias ==
/// Convenience Result type for the catalog API.
pub type Result<T> = std::result::Result<T, ApiError>;
