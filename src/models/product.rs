//! Product entity
//!
//! The single persisted entity of the catalog plus the value types used to
//! create and change it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// == Product ==
/// A catalog product as persisted and as returned on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-generated identifier, never changes
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Always strictly positive, rendered as a decimal string
    pub price: Decimal,
    pub sale_start: Option<DateTime<Utc>>,
    pub sale_end: Option<DateTime<Utc>>,
}

impl Product {
    // == Sale Window ==
    /// Returns true when both sale bounds are set and `at` falls inside them.
    ///
    /// Both bounds are inclusive.
    pub fn is_on_sale(&self, at: DateTime<Utc>) -> bool {
        match (self.sale_start, self.sale_end) {
            (Some(start), Some(end)) => start <= at && at <= end,
            _ => false,
        }
    }

    // == Search ==
    /// Returns true when every term appears in the name or the description.
    ///
    /// Terms are expected to be lowercase already.
    pub fn matches_terms(&self, terms: &[String]) -> bool {
        let name = self.name.to_lowercase();
        let description = self.description.to_lowercase();
        terms
            .iter()
            .all(|term| name.contains(term.as_str()) || description.contains(term.as_str()))
    }

    /// Applies the fields present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: &ProductChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(sale_start) = changes.sale_start {
            self.sale_start = sale_start;
        }
        if let Some(sale_end) = changes.sale_end {
            self.sale_end = sale_end;
        }
    }
}

// == New Product ==
/// Validated fields for a product that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sale_start: Option<DateTime<Utc>>,
    pub sale_end: Option<DateTime<Utc>>,
}

impl NewProduct {
    /// Attaches the store-generated id.
    pub fn with_id(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            sale_start: self.sale_start,
            sale_end: self.sale_end,
        }
    }
}

// == Product Changes ==
/// Validated field updates. `None` means "leave as is".
///
/// The sale bounds are doubly optional: `Some(None)` clears the bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sale_start: Option<Option<DateTime<Utc>>>,
    pub sale_end: Option<Option<DateTime<Utc>>>,
}

impl ProductChanges {
    /// Converts a complete set of changes into a [`NewProduct`].
    ///
    /// Returns `None` if a required field is missing.
    pub fn into_new(self) -> Option<NewProduct> {
        Some(NewProduct {
            name: self.name?,
            description: self.description?,
            price: self.price?,
            sale_start: self.sale_start.flatten(),
            sale_end: self.sale_end.flatten(),
        })
    }
}

// == Cached Product ==
/// The projection of a product kept in the cache after an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl From<&Product> for CachedProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::str::FromStr;

    fn product() -> Product {
        Product {
            id: 1,
            name: "Walnut Desk".to_string(),
            description: "Solid hardwood, oiled finish".to_string(),
            price: Decimal::from_str("249.00").unwrap(),
            sale_start: None,
            sale_end: None,
        }
    }

    #[test]
    fn test_on_sale_bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let mut p = product();
        p.sale_start = Some(start);
        p.sale_end = Some(end);

        assert!(p.is_on_sale(start));
        assert!(p.is_on_sale(end));
        assert!(p.is_on_sale(start + Duration::days(10)));
        assert!(!p.is_on_sale(start - Duration::seconds(1)));
        assert!(!p.is_on_sale(end + Duration::seconds(1)));
    }

    #[test]
    fn test_on_sale_requires_both_bounds() {
        let now = Utc::now();
        let mut p = product();
        p.sale_start = Some(now - Duration::days(1));
        assert!(!p.is_on_sale(now));

        p.sale_start = None;
        p.sale_end = Some(now + Duration::days(1));
        assert!(!p.is_on_sale(now));
    }

    #[test]
    fn test_matches_terms_across_fields() {
        let p = product();
        assert!(p.matches_terms(&["walnut".to_string(), "oiled".to_string()]));
        assert!(p.matches_terms(&[]));
        assert!(!p.matches_terms(&["walnut".to_string(), "chrome".to_string()]));
    }

    #[test]
    fn test_apply_partial_changes() {
        let mut p = product();
        let changes = ProductChanges {
            price: Some(Decimal::from_str("199.99").unwrap()),
            sale_end: Some(None),
            ..Default::default()
        };
        p.apply(&changes);
        assert_eq!(p.price.to_string(), "199.99");
        assert_eq!(p.name, "Walnut Desk");
        assert!(p.sale_end.is_none());
    }

    #[test]
    fn test_into_new_requires_all_fields() {
        let partial = ProductChanges {
            name: Some("Lamp".to_string()),
            ..Default::default()
        };
        assert!(partial.into_new().is_none());
    }

    #[test]
    fn test_product_serializes_price_as_string() {
        let json = serde_json::to_value(product()).unwrap();
        assert_eq!(json["price"], "249.00");
        assert!(json["sale_start"].is_null());
    }
}
