//! Depth-bounded flattening of XML-derived JSON trees.
//!
//! XML converters wrap every child element in an array, so a plain
//! `<Total>5</Total>` arrives as `"Total": ["5"]`. The [`Flattener`] walks
//! the tree top-down and rewrites it into the shape a caller expects:
//!
//! - single-element arrays collapse to their element, except for fields the
//!   [`ArrayFieldPolicy`] protects
//! - `<X>Array: [{ X: [..] }]` becomes `Xs: [..]`
//! - `{ "@key": K, "__value__": V }` becomes `{ K: V }`
//! - amounts become `{ "amount": n, "currencyID": .. }`
//! - string leaves are coerced per the [`ScalarCoercion`] policy
//!
//! Recursion is bounded by a caller-supplied [`Depth`] and by
//! [`MAX_RECURSION_DEPTH`]. Nodes past the bound are returned untouched.

use serde_json::{Map, Value};
use tracing::trace;

use crate::context::RequestContext;
use crate::parse::amount::normalize_amount;
use crate::parse::policy::ArrayFieldPolicy;
use crate::parse::scalar::ScalarCoercion;
use crate::parse::shape::{
    classify, classify_field, collapse_single, is_blank, plural_name, wrapped_item_name,
    NodeShape, PAIR_VALUE_KEY,
};

/// Hard ceiling on recursion, applied even when the depth is unlimited.
pub const MAX_RECURSION_DEPTH: u32 = 100;

/// How far below the root the flattener normalizes.
///
/// The root is at depth 0 and each object field or array element is one
/// level deeper than its parent. A node deeper than the limit is returned
/// unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Normalize nodes up to and including this depth.
    Limited(u32),
    /// Normalize the whole tree (still bounded by [`MAX_RECURSION_DEPTH`]).
    #[default]
    Unlimited,
}

impl Depth {
    /// Converts a signed depth; any negative value means unlimited.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ebay_api::Depth;
    ///
    /// assert_eq!(Depth::from_signed(-1), Depth::Unlimited);
    /// assert_eq!(Depth::from_signed(3), Depth::Limited(3));
    /// ```
    #[must_use]
    pub fn from_signed(depth: i64) -> Self {
        u32::try_from(depth).map_or(Self::Unlimited, Self::Limited)
    }

    /// Returns `true` if a node at `depth` is normalized.
    #[must_use]
    pub const fn allows(self, depth: u32) -> bool {
        if depth > MAX_RECURSION_DEPTH {
            return false;
        }
        match self {
            Self::Limited(max) => depth <= max,
            Self::Unlimited => true,
        }
    }
}

/// Tree flattener bound to an array-field policy, a coercion policy and an
/// optional request context.
///
/// # Example
///
/// ```rust
/// use ebay_api::{ArrayFieldPolicy, Depth, Flattener, ScalarCoercion};
/// use serde_json::json;
///
/// let coercion = ScalarCoercion::default();
/// let flattener = Flattener::new(ArrayFieldPolicy::builtin(), &coercion, None);
///
/// let tree = json!({"Total": ["5"], "NameValueList": [{"Name": ["Color"]}]});
/// assert_eq!(
///     flattener.flatten(tree, Depth::Unlimited),
///     json!({"Total": 5, "NameValueList": [{"Name": "Color"}]})
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Flattener<'a> {
    policy: &'a ArrayFieldPolicy,
    coercion: &'a ScalarCoercion,
    context: Option<&'a RequestContext>,
}

impl<'a> Flattener<'a> {
    /// Creates a flattener.
    #[must_use]
    pub const fn new(
        policy: &'a ArrayFieldPolicy,
        coercion: &'a ScalarCoercion,
        context: Option<&'a RequestContext>,
    ) -> Self {
        Self {
            policy,
            coercion,
            context,
        }
    }

    /// Flattens `node`, normalizing nodes no deeper than `max_depth`.
    #[must_use]
    pub fn flatten(&self, node: Value, max_depth: Depth) -> Value {
        trace!(?max_depth, "Flattening response tree");
        self.flatten_node(node, 0, max_depth, None)
    }

    fn flatten_node(&self, node: Value, depth: u32, max_depth: Depth, field: Option<&str>) -> Value {
        if !max_depth.allows(depth) {
            return node;
        }

        let node = collapse_single(node);
        match classify(&node) {
            NodeShape::ValuePair => rewrite_value_pair(node),
            NodeShape::GenericArray => match node {
                Value::Array(items) => Value::Array(
                    items
                        .into_iter()
                        .map(|item| self.flatten_node(item, depth + 1, max_depth, field))
                        .collect(),
                ),
                other => other,
            },
            NodeShape::GenericObject => match node {
                Value::Object(map) => Value::Object(self.flatten_object(map, depth, max_depth)),
                other => other,
            },
            NodeShape::PlainValue | NodeShape::AmountPair | NodeShape::WrappedArray => match node {
                Value::String(text) => self.coercion.coerce(field, text),
                other => other,
            },
        }
    }

    fn flatten_object(&self, map: Map<String, Value>, depth: u32, max_depth: Depth) -> Map<String, Value> {
        let mut out = Map::new();

        for (key, value) in map {
            match classify_field(&key, &value) {
                NodeShape::WrappedArray => {
                    let (name, items) = self.unwrap_wrapped_array(&key, value, depth + 1);
                    out.insert(name, items);
                }
                NodeShape::AmountPair => {
                    let value = if self.policy.is_protected(&key, self.context) {
                        value
                    } else {
                        collapse_single(value)
                    };
                    out.insert(key, normalize_amount(value));
                }
                _ if self.policy.is_protected(&key, self.context) => {
                    let value = self.flatten_protected(value, depth + 1, max_depth, &key);
                    out.insert(key, value);
                }
                _ => {
                    let value = self.flatten_node(value, depth + 1, max_depth, Some(&key));
                    out.insert(key, value);
                }
            }
        }

        out
    }

    /// Flattens a protected field's value while keeping it an array.
    fn flatten_protected(&self, value: Value, depth: u32, max_depth: Depth, field: &str) -> Value {
        if !max_depth.allows(depth) {
            return value;
        }

        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        Value::Array(
            items
                .into_iter()
                .map(|item| self.flatten_node(item, depth + 1, max_depth, Some(field)))
                .collect(),
        )
    }

    /// Rewrites `<X>Array: [{ X: [..] }]` to `("Xs", [..])`.
    ///
    /// Items are flattened with unlimited depth. Blank items are dropped, so
    /// an empty wrapper yields an empty array.
    fn unwrap_wrapped_array(&self, field: &str, value: Value, depth: u32) -> (String, Value) {
        let item_name = wrapped_item_name(field).unwrap_or(field);
        let plural = plural_name(item_name);

        let items = match collapse_single(value) {
            Value::Object(mut container) => container.remove(item_name),
            _ => None,
        };
        let items = match items {
            Some(Value::Array(items)) => items,
            Some(item) => vec![item],
            None => Vec::new(),
        };

        let flattened = items
            .into_iter()
            .filter(|item| !is_blank(item))
            .map(|item| self.flatten_node(item, depth + 1, Depth::Unlimited, Some(item_name)))
            .collect();

        (plural, Value::Array(flattened))
    }
}

/// Rewrites `{ "@key": K, "__value__": V }` to `{ K: V }`. `V` is kept verbatim.
fn rewrite_value_pair(node: Value) -> Value {
    let Value::Object(map) = node else {
        return node;
    };

    let mut key = None;
    let mut value = Value::Null;
    for (name, entry) in map {
        if name == PAIR_VALUE_KEY {
            value = entry;
        } else {
            key = Some(match entry {
                Value::String(text) => text,
                other => other.to_string(),
            });
        }
    }

    let mut out = Map::new();
    out.insert(key.unwrap_or_default(), value);
    Value::Object(out)
}

/// Flattens `node` with the built-in array-field policy and default coercion.
///
/// # Example
///
/// ```rust
/// use ebay_api::{flatten, Depth};
/// use serde_json::json;
///
/// let tree = json!({"a": [{"b": ["x"]}]});
/// assert_eq!(flatten(tree, Depth::Unlimited, None), json!({"a": {"b": "x"}}));
/// ```
#[must_use]
pub fn flatten(node: Value, max_depth: Depth, context: Option<&RequestContext>) -> Value {
    let coercion = ScalarCoercion::default();
    Flattener::new(ArrayFieldPolicy::builtin(), &coercion, context).flatten(node, max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceName;
    use serde_json::json;

    fn flatten_plain(node: Value, max_depth: Depth) -> Value {
        let policy = ArrayFieldPolicy::new();
        let coercion = ScalarCoercion::disabled();
        Flattener::new(&policy, &coercion, None).flatten(node, max_depth)
    }

    #[test]
    fn test_depth_from_signed() {
        assert_eq!(Depth::from_signed(-5), Depth::Unlimited);
        assert_eq!(Depth::from_signed(0), Depth::Limited(0));
        assert_eq!(Depth::from_signed(10), Depth::Limited(10));
    }

    #[test]
    fn test_depth_allows_respects_hard_ceiling() {
        assert!(Depth::Unlimited.allows(MAX_RECURSION_DEPTH));
        assert!(!Depth::Unlimited.allows(MAX_RECURSION_DEPTH + 1));
        assert!(!Depth::Limited(500).allows(MAX_RECURSION_DEPTH + 1));
        assert!(Depth::Limited(2).allows(2));
        assert!(!Depth::Limited(2).allows(3));
    }

    #[test]
    fn test_collapses_single_element_arrays() {
        let tree = json!({"a": [{"b": ["x"]}]});
        assert_eq!(flatten_plain(tree, Depth::Unlimited), json!({"a": {"b": "x"}}));
    }

    #[test]
    fn test_keeps_multi_element_arrays() {
        let tree = json!({"a": ["x", "y"], "b": []});
        assert_eq!(
            flatten_plain(tree, Depth::Unlimited),
            json!({"a": ["x", "y"], "b": []})
        );
    }

    #[test]
    fn test_value_pair_is_rewritten_without_recursion() {
        let tree = json!({"ItemSpecific": {"@name": "Color", "__value__": ["Red"]}});
        assert_eq!(
            flatten_plain(tree, Depth::Unlimited),
            json!({"ItemSpecific": {"Color": ["Red"]}})
        );
    }

    #[test]
    fn test_value_pair_inside_single_element_array() {
        let tree = json!([{"@key": "foo", "__value__": "bar"}]);
        assert_eq!(flatten_plain(tree, Depth::Unlimited), json!({"foo": "bar"}));
    }

    #[test]
    fn test_wrapped_array_is_renamed_and_kept() {
        let tree = json!({
            "OrderArray": [{"Order": [{"OrderID": ["123"]}, {"OrderID": ["456"]}]}]
        });
        assert_eq!(
            flatten_plain(tree, Depth::Unlimited),
            json!({"Orders": [{"OrderID": "123"}, {"OrderID": "456"}]})
        );
    }

    #[test]
    fn test_wrapped_array_with_one_item_stays_array() {
        let tree = json!({"OrderArray": [{"Order": [{"OrderID": ["123"]}]}]});
        assert_eq!(
            flatten_plain(tree, Depth::Unlimited),
            json!({"Orders": [{"OrderID": "123"}]})
        );
    }

    #[test]
    fn test_blank_wrapped_array_becomes_empty() {
        let tree = json!({"OrderArray": [""]});
        assert_eq!(flatten_plain(tree, Depth::Unlimited), json!({"Orders": []}));
    }

    #[test]
    fn test_wrapped_array_items_ignore_depth_limit() {
        let tree = json!({"OrderArray": [{"Order": [{"Buyer": [{"Name": ["x"]}]}]}]});
        assert_eq!(
            flatten_plain(tree, Depth::Limited(0)),
            json!({"Orders": [{"Buyer": {"Name": "x"}}]})
        );
    }

    #[test]
    fn test_suffix_protected_field_stays_array() {
        let tree = json!({"NameValueList": [{"Name": ["Brand"], "Value": ["Sony"]}]});
        let policy = ArrayFieldPolicy::new();
        let coercion = ScalarCoercion::disabled();
        let flattened = Flattener::new(&policy, &coercion, None).flatten(tree, Depth::Unlimited);
        assert_eq!(
            flattened,
            json!({"NameValueList": [{"Name": "Brand", "Value": "Sony"}]})
        );
    }

    #[test]
    fn test_listed_field_is_wrapped_when_scalar() {
        let context = RequestContext::new(ServiceName::Trading, "GetOrders").unwrap();
        let coercion = ScalarCoercion::disabled();
        let flattener = Flattener::new(ArrayFieldPolicy::builtin(), &coercion, Some(&context));

        let tree = json!({"TaxDetails": {"Imposition": "SalesTax"}});
        assert_eq!(
            flattener.flatten(tree, Depth::Unlimited),
            json!({"TaxDetails": [{"Imposition": "SalesTax"}]})
        );
    }

    #[test]
    fn test_amount_fields_are_normalized() {
        let tree = json!({
            "AmountPaid": [{"_": "6.00", "$": {"currencyID": "USD"}}],
            "ShippingServiceCost": [{"_": "0.0", "$": {"currencyID": "USD"}}]
        });
        assert_eq!(
            flatten_plain(tree, Depth::Unlimited),
            json!({
                "AmountPaid": {"amount": 6, "currencyID": "USD"},
                "ShippingServiceCost": {"amount": 0, "currencyID": "USD"}
            })
        );
    }

    #[test]
    fn test_amount_field_without_amount_shape_is_flattened() {
        let tree = json!({"AmountPaid": ["6.00"]});
        assert_eq!(flatten_plain(tree.clone(), Depth::Unlimited), json!({"AmountPaid": "6.00"}));
        assert_eq!(flatten(tree, Depth::Unlimited, None), json!({"AmountPaid": 6}));
    }

    #[test]
    fn test_depth_limit_leaves_deep_nodes_untouched() {
        let tree = json!({"L1": [{"L2": [{"L3": ["deep"]}]}]});
        assert_eq!(
            flatten_plain(tree, Depth::Limited(1)),
            json!({"L1": {"L2": [{"L3": ["deep"]}]}})
        );
    }

    #[test]
    fn test_zero_depth_only_collapses_root() {
        let tree = json!([{"a": ["x"]}]);
        assert_eq!(flatten_plain(tree, Depth::Limited(0)), json!({"a": ["x"]}));
    }

    #[test]
    fn test_scalar_coercion_uses_field_name() {
        let policy = ArrayFieldPolicy::new();
        let coercion = ScalarCoercion::default().with_exempt_field("ItemID");
        let flattener = Flattener::new(&policy, &coercion, None);

        let tree = json!({"ItemID": ["0123"], "Quantity": ["2"], "IsMultiLegShipping": ["false"]});
        assert_eq!(
            flattener.flatten(tree, Depth::Unlimited),
            json!({"ItemID": "0123", "Quantity": 2, "IsMultiLegShipping": false})
        );
    }

    #[test]
    fn test_hard_ceiling_stops_runaway_nesting() {
        let mut tree = json!("leaf");
        for _ in 0..150 {
            tree = json!({ "n": [tree] });
        }
        let flattened = flatten_plain(tree, Depth::Unlimited);

        let mut node = &flattened;
        let mut levels = 0;
        while let Some(next) = node.get("n") {
            node = next;
            levels += 1;
        }
        assert!(node.is_array(), "nodes past the ceiling keep their wrapper");
        assert!(levels > 40);
    }
}
