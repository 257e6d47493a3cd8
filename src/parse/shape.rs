//! Recognized node shapes in XML-derived JSON.
//!
//! Every transform the flattener applies is keyed off one of these shapes,
//! so each shape can be detected and tested on its own.

use serde_json::{Map, Value};

/// Key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "$";
/// Key holding an element's text content when it also has attributes.
pub const TEXT_KEY: &str = "_";
/// Key holding the value of a `{ "@key": K, "__value__": V }` pair.
pub const PAIR_VALUE_KEY: &str = "__value__";

const AMOUNT_MARKERS: [&str; 4] = ["Amount", "Cost", "Price", "Subtotal"];

/// Shape of a node, optionally seen through the field name that holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    /// A string, number, boolean or null.
    PlainValue,
    /// `{ "@<name>": K, "__value__": V }`, rewritten to `{ K: V }`.
    ValuePair,
    /// `{ "_": amount, "$": { currencyID, .. } }` under an amount-named field.
    AmountPair,
    /// `<X>Array: [ { X: [..] } ]`, rewritten to `Xs: [..]`.
    WrappedArray,
    /// Any other object.
    GenericObject,
    /// Any other array.
    GenericArray,
}

/// Classifies a node by structure alone.
#[must_use]
pub fn classify(node: &Value) -> NodeShape {
    match node {
        Value::Array(_) => NodeShape::GenericArray,
        Value::Object(map) if is_value_pair(map) => NodeShape::ValuePair,
        Value::Object(_) => NodeShape::GenericObject,
        _ => NodeShape::PlainValue,
    }
}

/// Classifies a node held under the field `name`.
///
/// Field-name based shapes (wrapped arrays, amounts) take precedence over
/// the structural ones.
#[must_use]
pub fn classify_field(name: &str, value: &Value) -> NodeShape {
    if wrapped_item_name(name).is_some_and(|item| is_wrapped_array(item, value)) {
        return NodeShape::WrappedArray;
    }
    if is_amount_field(name) && holds_amounts(value) {
        return NodeShape::AmountPair;
    }
    classify(value)
}

/// Returns the singular item name for `<X>Array` fields.
#[must_use]
pub fn wrapped_item_name(field: &str) -> Option<&str> {
    field.strip_suffix("Array").filter(|item| !item.is_empty())
}

/// Returns the field name a wrapped array is renamed to: `Order` becomes `Orders`.
#[must_use]
pub fn plural_name(item: &str) -> String {
    format!("{item}s")
}

/// Returns `true` for field names matching `Amount|Cost|Price|Subtotal`.
#[must_use]
pub fn is_amount_field(field: &str) -> bool {
    AMOUNT_MARKERS.iter().any(|marker| field.contains(marker))
}

/// Returns `true` for `{ "@<name>": K, "__value__": V }`.
#[must_use]
pub fn is_value_pair(map: &Map<String, Value>) -> bool {
    if map.len() != 2 {
        return false;
    }
    let mut keys = map.keys();
    matches!(
        (keys.next(), keys.next()),
        (Some(first), Some(second)) if first.starts_with('@') && second == PAIR_VALUE_KEY
    )
}

/// Returns `true` for `{ "_": amount, "$": { .. } }`, possibly with other keys.
#[must_use]
pub fn is_amount_pair(node: &Value) -> bool {
    node.as_object().is_some_and(|map| {
        map.contains_key(TEXT_KEY) && map.get(ATTRIBUTES_KEY).is_some_and(Value::is_object)
    })
}

/// Returns `true` for the leftovers of empty XML elements.
#[must_use]
pub fn is_blank(node: &Value) -> bool {
    match node {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Unwraps a single-element array to its element.
#[must_use]
pub fn collapse_single(node: Value) -> Value {
    match node {
        Value::Array(mut items) if items.len() == 1 => items.pop().unwrap_or(Value::Null),
        other => other,
    }
}

fn holds_amounts(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items.iter().all(is_amount_pair),
        other => is_amount_pair(other),
    }
}

fn is_wrapped_array(item: &str, value: &Value) -> bool {
    let container = match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        Value::Array(_) => return false,
        other => other,
    };
    match container {
        Value::Object(map) if map.len() == 1 => map.contains_key(item),
        other => is_blank(other),
    }
}
