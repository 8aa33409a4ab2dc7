//! Request DTOs for the catalog API
//!
//! Defines the typed shape of query strings and request bodies.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::cache::{product_cache_key, MAX_KEY_LENGTH, PRODUCT_KEY_PREFIX};
use crate::error::{ApiError, Result, NON_FIELD_ERRORS};

/// Query string of `GET /products`.
///
/// Every field stays a raw string so malformed values can fall back to
/// defaults or produce field errors instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Exact id filter
    pub id: Option<String>,
    /// Free-text search over name and description
    pub search: Option<String>,
    /// Sale-window switch, compared case-insensitively with `"true"`
    pub on_sale: Option<String>,
    /// Page size
    pub limit: Option<String>,
    /// Index of the first result
    pub offset: Option<String>,
}

impl ListQuery {
    /// Decodes a raw query string. A repeated key keeps its last value;
    /// unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "id" => &mut parsed.id,
                "search" => &mut parsed.search,
                "on_sale" => &mut parsed.on_sale,
                "limit" => &mut parsed.limit,
                "offset" => &mut parsed.offset,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        parsed
    }

    /// Parses the `id` filter. Blank means no filter.
    pub fn id_filter(&self) -> Result<Option<u64>> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::field("id", "Enter a whole number.")),
        }
    }

    /// Splits the search string into lowercase terms on whitespace and commas.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

/// Body of `DELETE /products/{id}`.
///
/// Only `id` is read, and it selects the cache entry to drop.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub id: Option<String>,
}

impl DeleteRequest {
    /// Reads the optional body. An empty body carries no id.
    ///
    /// A string id is used exactly as sent. An id whose cache key would be
    /// longer than [`MAX_KEY_LENGTH`] is rejected here, before anything is
    /// deleted.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let payload = parse_object(body)?;
        let id = match payload.get("id") {
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };

        if let Some(id) = &id {
            if product_cache_key(id).len() > MAX_KEY_LENGTH {
                return Err(ApiError::field(
                    "id",
                    format!(
                        "Ensure this field has no more than {} characters.",
                        MAX_KEY_LENGTH - PRODUCT_KEY_PREFIX.len()
                    ),
                ));
            }
        }
        Ok(Self { id })
    }
}

/// Parses a request body that must be a JSON object.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("JSON parse error - {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::field(
            NON_FIELD_ERRORS,
            "Invalid data. Expected a dictionary.",
        )),
    }
}
