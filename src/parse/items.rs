//! Item extraction from parsed responses.

use serde_json::Value;

use crate::parse::flatten::{flatten, Depth};
use crate::parse::shape::{collapse_single, is_blank};

/// Pulls the item list out of a parsed response.
///
/// Looks in, by order of preference:
///
/// 1. `Item` (Trading and Shopping single-item calls)
/// 2. the first `searchResult`'s `item` list (Finding)
/// 3. `itemRecommendations.item` (Merchandising)
///
/// Each item is fully flattened. Returns an empty list when none of the
/// locations hold items.
///
/// # Example
///
/// ```rust
/// use ebay_api::parse::parse_items_from_response;
/// use serde_json::json;
///
/// let data = json!({"searchResult": [{"item": [
///     {"itemId": ["1"], "title": ["Lamp"]},
///     {"itemId": ["2"], "title": ["Desk"]}
/// ]}]});
///
/// let items = parse_items_from_response(&data);
/// assert_eq!(items, vec![
///     json!({"itemId": 1, "title": "Lamp"}),
///     json!({"itemId": 2, "title": "Desk"}),
/// ]);
/// ```
#[must_use]
pub fn parse_items_from_response(data: &Value) -> Vec<Value> {
    let items = if let Some(item) = data.get("Item") {
        as_list(item.clone())
    } else if let Some(results) = data.get("searchResult") {
        first_entry(results)
            .and_then(|result| result.get("item"))
            .map_or_else(Vec::new, |items| as_list(items.clone()))
    } else if let Some(recommendations) = data.get("itemRecommendations") {
        first_entry(recommendations)
            .and_then(|r| r.get("item"))
            .map_or_else(Vec::new, |items| as_list(items.clone()))
    } else {
        Vec::new()
    };

    items
        .into_iter()
        .filter(|item| !is_blank(item))
        .map(|item| flatten(item, Depth::Unlimited, None))
        .collect()
}

fn first_entry(node: &Value) -> Option<&Value> {
    match node {
        Value::Array(entries) => entries.first(),
        other if is_blank(other) => None,
        other => Some(other),
    }
}

fn as_list(node: Value) -> Vec<Value> {
    match node {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => match collapse_single(other) {
            Value::Array(items) => items,
            single => vec![single],
        },
    }
}
