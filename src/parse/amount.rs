//! Currency amount normalization.
//!
//! An XML element such as `<AmountPaid currencyID="USD">6.00</AmountPaid>`
//! converts to `{ "_": "6.00", "$": { "currencyID": "USD" } }`. This module
//! rewrites that into `{ "amount": 6, "currencyID": "USD" }`.

use serde_json::{Map, Value};

use crate::parse::scalar::cast_amount;
use crate::parse::shape::{is_amount_pair, ATTRIBUTES_KEY, TEXT_KEY};

/// Key the amount text is moved to.
pub const AMOUNT_KEY: &str = "amount";

/// Normalizes an amount structure, or an array of them.
///
/// Nodes that are not `{ "_", "$" }` pairs are returned unchanged, which
/// covers endpoints that already return plain numeric amounts.
///
/// # Example
///
/// ```rust
/// use ebay_api::parse::normalize_amount;
/// use serde_json::json;
///
/// let node = json!({"_": "100.00", "$": {"currencyID": "USD"}});
/// assert_eq!(normalize_amount(node), json!({"amount": 100, "currencyID": "USD"}));
/// ```
#[must_use]
pub fn normalize_amount(node: Value) -> Value {
    match node {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_amount).collect()),
        node if is_amount_pair(&node) => match node {
            Value::Object(map) => Value::Object(rewrite_pair(map)),
            other => other,
        },
        other => other,
    }
}

fn rewrite_pair(map: Map<String, Value>) -> Map<String, Value> {
    let mut amount = Value::Null;
    let mut attributes = Map::new();
    let mut out = Map::new();

    for (key, value) in map {
        match key.as_str() {
            TEXT_KEY => amount = cast_amount(value),
            ATTRIBUTES_KEY => {
                if let Value::Object(attrs) = value {
                    attributes = attrs;
                }
            }
            _ => {
                out.insert(key, value);
            }
        }
    }

    out.insert(AMOUNT_KEY.to_string(), amount);
    out.extend(attributes);
    out
}
