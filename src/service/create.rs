//! Product creation
//!
//! A price pre-check with its own flat error body, then full payload
//! validation and a single insert. Creation never touches the cache.

use serde_json::{Map, Value};
use tracing::info;

use super::ProductService;
use crate::error::{ApiError, Result};
use crate::models::serializer::{check_sale_window, validate_payload};
use crate::models::Product;

/// Message for a price that does not parse as a number
pub const MUST_BE_A_NUMBER: &str = "Must be a number";
/// Message for a zero or negative price
pub const CANNOT_BE_ZERO_OR_BELOW: &str = "Cannot be 0 or below";

/// Rejects a present, non-null `price` that is not a positive number.
///
/// Numeric strings may carry surrounding whitespace; booleans count as 1
/// and 0. A missing or null price passes and is left to field validation.
pub fn check_price(payload: &Map<String, Value>) -> Result<()> {
    let parsed = match payload.get("price") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(_) => None,
    };

    match parsed {
        None => Err(ApiError::InvalidPrice(MUST_BE_A_NUMBER.to_string())),
        Some(price) if price <= 0.0 => {
            Err(ApiError::InvalidPrice(CANNOT_BE_ZERO_OR_BELOW.to_string()))
        }
        Some(_) => Ok(()),
    }
}

impl ProductService {
    /// Validates `payload` and inserts the new product.
    pub async fn create_product(&self, payload: &Map<String, Value>) -> Result<Product> {
        check_price(payload)?;

        let changes = validate_payload(payload, false).map_err(ApiError::Validation)?;
        check_sale_window(&changes, None).map_err(ApiError::Validation)?;
        let new_product = changes.into_new().ok_or_else(|| {
            ApiError::field(crate::error::NON_FIELD_ERRORS, "Incomplete product data.")
        })?;

        let product = self.store.insert(new_product).await?;
        info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }
}
