//! Decoding of persisted cart records.
//!
//! Stored carts are untrusted: they may come from an older release, another
//! script, or a hand-edited file. Decoding is therefore tolerant. The value
//! must be a JSON array, and each element is normalized into a well-formed
//! [`LineItem`]:
//!
//! | field   | sources, in order        | fallback                    |
//! |---------|--------------------------|-----------------------------|
//! | `id`    | `id`, `name`             | random token                |
//! | `name`  | `name`, `productName`    | [`PLACEHOLDER_NAME`]        |
//! | `price` | `price`, `p`             | `0`                         |
//! | `image` | `image`, `imgSrc`        | empty                       |
//! | `qty`   | `qty`, `quantity`        | `1`                         |
//!
//! `productName`, `p`, `imgSrc` and `quantity` are field names from an
//! earlier storage format. They are still read but never written.

use serde_json::{Map, Value};
use thiserror::Error;

use spiceaura_core::{Cart, LineItem, PLACEHOLDER_NAME, ProductId};

const ID_FIELDS: &[&str] = &["id", "name"];
const NAME_FIELDS: &[&str] = &["name", "productName"];
const PRICE_FIELDS: &[&str] = &["price", "p"];
const IMAGE_FIELDS: &[&str] = &["image", "imgSrc"];
const QTY_FIELDS: &[&str] = &["qty", "quantity"];

/// Why a stored value could not be decoded as a cart.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The value is valid JSON but not an array.
    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),
}

/// Decode a stored value into a cart.
///
/// Elements that are not JSON objects are skipped. Elements that resolve to
/// an ID already seen are merged into the earlier line.
///
/// # Errors
///
/// Returns [`DecodeError`] if the value is not JSON or not an array.
pub fn decode_cart(raw: &str) -> Result<Cart, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(records) => Ok(records.iter().filter_map(normalize_record).collect()),
        other => Err(DecodeError::NotAnArray(json_kind(&other))),
    }
}

/// Encode a cart into its stored form.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_cart(cart: &Cart) -> serde_json::Result<String> {
    serde_json::to_string(cart)
}

/// Normalize one stored record, or `None` if it is not an object.
#[must_use]
pub fn normalize_record(value: &Value) -> Option<LineItem> {
    let Value::Object(record) = value else {
        tracing::debug!(kind = json_kind(value), "Skipping non-object cart record");
        return None;
    };

    let id = first_text(record, ID_FIELDS).map_or_else(ProductId::generate, ProductId::new);
    let name = first_text(record, NAME_FIELDS).unwrap_or_else(|| PLACEHOLDER_NAME.to_owned());
    let price = first_present(record, PRICE_FIELDS)
        .and_then(coerce_number)
        .unwrap_or(0.0);
    let image = first_present(record, IMAGE_FIELDS)
        .and_then(Value::as_str)
        .unwrap_or_default();
    let qty = first_present(record, QTY_FIELDS)
        .and_then(coerce_number)
        .and_then(to_quantity)
        .unwrap_or(1);

    Some(LineItem::new(id, name, price, image, qty))
}

/// First field in `keys` that is present and not `null`.
fn first_present<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

/// First field in `keys` holding usable text: a non-empty string or a number.
fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            // Whole floats print without a fraction, so `1.0` and `1` share a key
            Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Coerce a JSON value to a finite number.
///
/// Numbers pass through, numeric strings are parsed (a blank string is `0`),
/// booleans are `1`/`0`. Everything else is not a number.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

/// Whole quantity of at least one, truncating fractions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_quantity(n: f64) -> Option<u32> {
    (n >= 1.0).then(|| n.min(f64::from(u32::MAX)).trunc() as u32)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
