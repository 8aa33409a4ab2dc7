//! Product payload validation
//!
//! Turns an arbitrary JSON object into validated [`ProductChanges`], collecting
//! every field error instead of stopping at the first one.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{FieldErrors, NON_FIELD_ERRORS};
use crate::models::{Product, ProductChanges};

// == Field Limits ==
/// Maximum length of a product name, in characters
pub const MAX_NAME_LENGTH: usize = 200;
/// Maximum number of digits in a price
pub const PRICE_MAX_DIGITS: u32 = 10;
/// Maximum number of decimal places in a price
pub const PRICE_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_NUMBER: &str = "A valid number is required.";
const NOT_POSITIVE: &str = "Ensure this value is greater than 0.";
const BAD_DATETIME: &str = "Datetime has wrong format. Use RFC 3339.";
const SALE_ORDER: &str = "Sale start must not be after sale end.";

/// Validates `payload` into product changes.
///
/// With `partial` unset every required field must be present, as for create
/// and full update. Unknown keys, including `id`, are ignored.
pub fn validate_payload(
    payload: &Map<String, Value>,
    partial: bool,
) -> Result<ProductChanges, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut changes = ProductChanges::default();

    for field in ["name", "description"] {
        match payload.get(field) {
            None if !partial => push(&mut errors, field, REQUIRED),
            None => {}
            Some(value) => match text_field(field, value) {
                Ok(text) => {
                    if field == "name" {
                        changes.name = Some(text);
                    } else {
                        changes.description = Some(text);
                    }
                }
                Err(message) => push(&mut errors, field, &message),
            },
        }
    }

    match payload.get("price") {
        None if !partial => push(&mut errors, "price", REQUIRED),
        None => {}
        Some(value) => match price_field(value) {
            Ok(price) => changes.price = Some(price),
            Err(message) => push(&mut errors, "price", &message),
        },
    }

    // Optional on create, so absence is never an error.
    for field in ["sale_start", "sale_end"] {
        let Some(value) = payload.get(field) else {
            continue;
        };
        match datetime_field(value) {
            Ok(at) => {
                if field == "sale_start" {
                    changes.sale_start = Some(at);
                } else {
                    changes.sale_end = Some(at);
                }
            }
            Err(message) => push(&mut errors, field, message),
        }
    }

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Checks that the sale window `changes` would leave behind is ordered.
///
/// `existing` is the product being updated, or `None` on create.
pub fn check_sale_window(
    changes: &ProductChanges,
    existing: Option<&Product>,
) -> Result<(), FieldErrors> {
    let start = changes
        .sale_start
        .unwrap_or_else(|| existing.and_then(|p| p.sale_start));
    let end = changes
        .sale_end
        .unwrap_or_else(|| existing.and_then(|p| p.sale_end));

    match (start, end) {
        (Some(start), Some(end)) if start > end => {
            let mut errors = FieldErrors::new();
            push(&mut errors, NON_FIELD_ERRORS, SALE_ORDER);
            Err(errors)
        }
        _ => Ok(()),
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

fn text_field(field: &str, value: &Value) -> Result<String, String> {
    let text = match value {
        Value::Null => return Err(NOT_NULL.to_string()),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(NOT_STRING.to_string()),
    };

    if text.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if field == "name" && text.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_NAME_LENGTH
        ));
    }
    Ok(text)
}

/// Parses a price from a JSON number or numeric string.
///
/// The result is rescaled to two decimal places so it always renders as
/// e.g. `"20.00"`.
pub fn price_field(value: &Value) -> Result<Decimal, String> {
    let raw = match value {
        Value::Null => return Err(NOT_NULL.to_string()),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(NOT_NUMBER.to_string()),
    };

    let price = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| NOT_NUMBER.to_string())?;

    let normalized = price.normalize();
    let scale = normalized.scale();
    let mantissa_digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    let total_digits = mantissa_digits.max(scale);

    if total_digits > PRICE_MAX_DIGITS {
        return Err(format!(
            "Ensure that there are no more than {} digits in total.",
            PRICE_MAX_DIGITS
        ));
    }
    if scale > PRICE_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    }
    let whole_digits = mantissa_digits.saturating_sub(scale);
    if whole_digits > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES
        ));
    }
    if normalized <= Decimal::ZERO {
        return Err(NOT_POSITIVE.to_string());
    }

    let mut price = normalized;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

fn datetime_field(value: &Value) -> Result<Option<DateTime<Utc>>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|at| Some(at.with_timezone(&Utc)))
            .map_err(|_| BAD_DATETIME),
        _ => Err(BAD_DATETIME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_full_payload_validates() {
        let payload = object(json!({
            "name": "  Desk Lamp ",
            "description": "Brass, adjustable arm",
            "price": "39.5",
            "sale_start": "2024-06-01T00:00:00Z",
            "sale_end": null
        }));
        let changes = validate_payload(&payload, false).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Desk Lamp"));
        assert_eq!(changes.price.unwrap().to_string(), "39.50");
        assert!(changes.sale_start.unwrap().is_some());
        assert_eq!(changes.sale_end, Some(None));
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let errors = validate_payload(&object(json!({ "name": "Lamp" })), false).unwrap_err();
        assert_eq!(errors["description"], vec![REQUIRED.to_string()]);
        assert_eq!(errors["price"], vec![REQUIRED.to_string()]);
        assert!(!errors.contains_key("name"));
        assert!(!errors.contains_key("sale_start"));
    }

    #[test]
    fn test_partial_payload_skips_missing() {
        let changes = validate_payload(&object(json!({ "price": 12 })), true).unwrap();
        assert_eq!(changes.price.unwrap().to_string(), "12.00");
        assert!(changes.name.is_none());
    }

    #[test]
    fn test_blank_and_null_text() {
        let payload = object(json!({ "name": "   ", "description": null, "price": "1" }));
        let errors = validate_payload(&payload, false).unwrap_err();
        assert_eq!(errors["name"], vec![NOT_BLANK.to_string()]);
        assert_eq!(errors["description"], vec![NOT_NULL.to_string()]);
    }

    #[test]
    fn test_name_length_limit() {
        let payload = object(json!({ "name": "x".repeat(MAX_NAME_LENGTH + 1) }));
        let errors = validate_payload(&payload, true).unwrap_err();
        assert!(errors["name"][0].contains("200 characters"));
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(price_field(&json!("abc")).unwrap_err(), NOT_NUMBER);
        assert_eq!(price_field(&json!([1])).unwrap_err(), NOT_NUMBER);
        assert_eq!(price_field(&json!("0.00")).unwrap_err(), NOT_POSITIVE);
        assert!(price_field(&json!("1.999")).unwrap_err().contains("decimal places"));
        assert!(price_field(&json!("12345678901")).unwrap_err().contains("digits"));
        assert_eq!(price_field(&json!(9.99)).unwrap().to_string(), "9.99");
        assert_eq!(price_field(&json!("1e2")).unwrap().to_string(), "100.00");
    }

    #[test]
    fn test_price_whole_digit_limit() {
        for raw in ["123456789", "1234567890", "123456789.5"] {
            let message = price_field(&json!(raw)).unwrap_err();
            assert_eq!(
                message,
                "Ensure that there are no more than 8 digits before the decimal point."
            );
        }
        assert_eq!(price_field(&json!("12345678.99")).unwrap().to_string(), "12345678.99");
        assert_eq!(price_field(&json!(12345678)).unwrap().to_string(), "12345678.00");
    }

    #[test]
    fn test_bad_datetime() {
        let errors =
            validate_payload(&object(json!({ "sale_start": "next tuesday" })), true).unwrap_err();
        assert_eq!(errors["sale_start"], vec![BAD_DATETIME.to_string()]);
    }

    #[test]
    fn test_sale_window_order() {
        let payload = object(json!({
            "sale_start": "2024-06-10T00:00:00Z",
            "sale_end": "2024-06-01T00:00:00Z"
        }));
        let changes = validate_payload(&payload, true).unwrap();
        let errors = check_sale_window(&changes, None).unwrap_err();
        assert!(errors.contains_key(NON_FIELD_ERRORS));
    }

    #[test]
    fn test_sale_window_uses_existing_bounds() {
        let existing = Product {
            id: 3,
            name: "Lamp".to_string(),
            description: "Brass".to_string(),
            price: Decimal::from_str("10.00").unwrap(),
            sale_start: Some("2024-06-01T00:00:00Z".parse().unwrap()),
            sale_end: Some("2024-06-30T00:00:00Z".parse().unwrap()),
        };
        let early_end = ProductChanges {
            sale_end: Some(Some("2024-05-01T00:00:00Z".parse().unwrap())),
            ..Default::default()
        };
        assert!(check_sale_window(&early_end, Some(&existing)).is_err());

        let cleared = ProductChanges {
            sale_start: Some(None),
            sale_end: Some(Some("2024-05-01T00:00:00Z".parse().unwrap())),
            ..Default::default()
        };
        assert!(check_sale_window(&cleared, Some(&existing)).is_ok());
    }
}
