//! Array-field policy: which response fields must stay arrays.
//!
//! XML has no way to say "this element repeats", so a field holding one
//! element looks the same as a scalar field. The flattener collapses
//! single-element arrays, and this policy names the fields that must never
//! be collapsed:
//!
//! - any field whose name ends in `Array` or `List`
//! - fields listed for the request's `(service, operation)` pair
//!
//! The per-operation table is plain data. The built-in table ships in
//! `known_array_fields.json` and is parsed once; callers add entries with
//! [`ArrayFieldPolicy::with_fields`] or [`ArrayFieldPolicy::merge`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::context::RequestContext;

const BUILTIN_TABLE: &str = include_str!("known_array_fields.json");

/// Lookup table of array fields keyed by service name, then operation name.
///
/// # Example
///
/// ```rust
/// use ebay_api::{ArrayFieldPolicy, RequestContext, ServiceName};
///
/// let context = RequestContext::new(ServiceName::Trading, "GetOrders").unwrap();
/// let policy = ArrayFieldPolicy::builtin();
///
/// assert!(policy.is_protected("TaxDetails", Some(&context)));
/// assert!(policy.is_protected("ItemArray", None));
/// assert!(!policy.is_protected("Buyer", Some(&context)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ArrayFieldPolicy {
    table: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl ArrayFieldPolicy {
    /// Creates an empty policy (only the `Array`/`List` suffix rule applies).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in policy table, parsed on first use.
    ///
    /// # Panics
    ///
    /// Panics if the bundled table is not valid JSON. The table is compiled
    /// into the crate and covered by tests.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<ArrayFieldPolicy> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_TABLE).expect("Bundled array-field table is invalid JSON")
        })
    }

    /// Parses a policy table from JSON of the form
    /// `{ "Service": { "Operation": ["Field", ...] } }`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document does not have that shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds protected fields for one `(service, operation)` pair.
    #[must_use]
    pub fn with_fields<I, S>(
        mut self,
        service: impl Into<String>,
        op_type: impl Into<String>,
        fields: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .entry(service.into())
            .or_default()
            .entry(op_type.into())
            .or_default()
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds every entry of `other` to this policy.
    pub fn merge(&mut self, other: &Self) {
        for (service, operations) in &other.table {
            let target = self.table.entry(service.clone()).or_default();
            for (op_type, fields) in operations {
                target
                    .entry(op_type.clone())
                    .or_default()
                    .extend(fields.iter().cloned());
            }
        }
    }

    /// Returns the listed fields for a `(service, operation)` pair, if any.
    #[must_use]
    pub fn fields_for(&self, service: &str, op_type: &str) -> Option<&BTreeSet<String>> {
        self.table.get(service)?.get(op_type)
    }

    /// Returns `true` if `field` must always remain an array.
    #[must_use]
    pub fn is_protected(&self, field: &str, context: Option<&RequestContext>) -> bool {
        if has_array_suffix(field) {
            return true;
        }

        context
            .and_then(|ctx| self.fields_for(ctx.service_name().as_str(), ctx.op_type()))
            .is_some_and(|fields| fields.contains(field))
    }
}

/// Returns `true` for names following the `*Array` / `*List` convention.
#[must_use]
pub fn has_array_suffix(field: &str) -> bool {
    field.ends_with("Array") || field.ends_with("List")
}

/// Checks `field` against the built-in policy.
#[must_use]
pub fn is_protected_array_field(field: &str, context: Option<&RequestContext>) -> bool {
    ArrayFieldPolicy::builtin().is_protected(field, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceName;

    fn trading_get_orders() -> RequestContext {
        RequestContext::new(ServiceName::Trading, "GetOrders").unwrap()
    }

    #[test]
    fn test_builtin_table_parses() {
        let policy = ArrayFieldPolicy::builtin();
        let fields = policy.fields_for("Trading", "GetOrders").unwrap();
        assert!(fields.contains("TaxDetails"));
        assert!(fields.contains("Transactions"));
        assert!(policy
            .fields_for("Shopping", "GetMultipleItems")
            .unwrap()
            .contains("Item"));
    }

    #[test]
    fn test_suffix_rule_applies_without_context() {
        assert!(is_protected_array_field("OrderArray", None));
        assert!(is_protected_array_field("NameValueList", None));
        assert!(!is_protected_array_field("Arrays", None));
        assert!(!is_protected_array_field("listing", None));
    }

    #[test]
    fn test_listed_fields_only_apply_to_their_operation() {
        let get_orders = trading_get_orders();
        let get_item = RequestContext::new(ServiceName::Trading, "GetItem").unwrap();

        assert!(is_protected_array_field("TaxDetails", Some(&get_orders)));
        assert!(!is_protected_array_field("TaxDetails", Some(&get_item)));
        assert!(!is_protected_array_field("TaxDetails", None));
    }

    #[test]
    fn test_with_fields_extends_without_touching_builtin() {
        let policy = ArrayFieldPolicy::new().with_fields("Finding", "findItemsByKeywords", [
            "item",
            "galleryURL",
        ]);
        let context =
            RequestContext::new(ServiceName::Finding, "findItemsByKeywords").unwrap();

        assert!(policy.is_protected("item", Some(&context)));
        assert!(!ArrayFieldPolicy::builtin().is_protected("item", Some(&context)));
    }

    #[test]
    fn test_merge_combines_tables() {
        let mut policy = ArrayFieldPolicy::builtin().clone();
        policy.merge(&ArrayFieldPolicy::new().with_fields("Trading", "GetOrders", ["Extra"]));

        let fields = policy.fields_for("Trading", "GetOrders").unwrap();
        assert!(fields.contains("Extra"));
        assert!(fields.contains("TaxDetails"));
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        assert!(ArrayFieldPolicy::from_json(r#"{"Trading": ["GetOrders"]}"#).is_err());
    }
}
