//! Finding API item filters.

use serde::Serialize;
use serde_json::{Map, Value};

/// An `itemFilter` entry for Finding API calls.
///
/// Converts into the params shape expected by both the XML body builder
/// and the URL-format encoder.
///
/// # Example
///
/// ```rust
/// use ebay_api::ItemFilter;
/// use serde_json::{json, Value};
///
/// let filter = ItemFilter::new("MaxPrice", "25.00").with_param("Currency", "USD");
///
/// assert_eq!(
///     Value::from(filter),
///     json!({"name": "MaxPrice", "value": "25.00", "paramName": "Currency", "paramValue": "USD"})
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    name: String,
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    param_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    param_value: Option<String>,
}

impl ItemFilter {
    /// Creates a filter. `value` may be a single value or an array of values.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            param_name: None,
            param_value: None,
        }
    }

    /// Sets the filter's additional parameter (e.g. `Currency` for `MaxPrice`).
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.param_name = Some(name.into());
        self.param_value = Some(value.into());
        self
    }

    /// Returns the filter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the filter value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

impl From<ItemFilter> for Value {
    fn from(filter: ItemFilter) -> Self {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(filter.name));
        map.insert("value".to_string(), filter.value);
        if let Some(name) = filter.param_name {
            map.insert("paramName".to_string(), Value::String(name));
        }
        if let Some(value) = filter.param_value {
            map.insert("paramValue".to_string(), Value::String(value));
        }
        Self::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_without_param() {
        let filter = ItemFilter::new("Condition", vec!["New", "Used"]);
        assert_eq!(filter.name(), "Condition");
        assert_eq!(
            Value::from(filter),
            json!({"name": "Condition", "value": ["New", "Used"]})
        );
    }

    #[test]
    fn test_serialize_matches_conversion() {
        let filter = ItemFilter::new("MaxPrice", 25).with_param("Currency", "USD");
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            Value::from(filter)
        );
    }
}
