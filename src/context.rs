//! Per-call request context.
//!
//! A [`RequestContext`] is built once for each API call and passed by
//! reference through flattening and envelope parsing. It carries no
//! credentials, so it can be attached to errors as-is for diagnostics.

use serde_json::Value;

use crate::config::ServiceName;
use crate::error::ConfigError;
use crate::parse::Depth;

/// Immutable description of one API call.
///
/// # Example
///
/// ```rust
/// use ebay_api::{Depth, RequestContext, ServiceName};
/// use serde_json::json;
///
/// let context = RequestContext::new(ServiceName::Trading, "GetOrders")
///     .unwrap()
///     .with_parse_depth(Depth::Limited(3))
///     .with_params(json!({"NumberOfDays": 30}));
///
/// assert_eq!(context.op_type(), "GetOrders");
/// assert_eq!(context.envelope_key(), "GetOrdersResponse");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestContext {
    service_name: ServiceName,
    op_type: String,
    parse_depth: Depth,
    params: Value,
}

impl RequestContext {
    /// Creates a context for `op_type` on `service_name` with unlimited parse depth.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOpType`] if the operation name is empty.
    pub fn new(service_name: ServiceName, op_type: impl Into<String>) -> Result<Self, ConfigError> {
        let op_type = op_type.into();
        if op_type.trim().is_empty() {
            return Err(ConfigError::MissingOpType);
        }

        Ok(Self {
            service_name,
            op_type,
            parse_depth: Depth::Unlimited,
            params: Value::Null,
        })
    }

    /// Sets how deep the flattener normalizes the response.
    #[must_use]
    pub const fn with_parse_depth(mut self, depth: Depth) -> Self {
        self.parse_depth = depth;
        self
    }

    /// Records the request parameters, for diagnostics.
    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Returns the service name.
    #[must_use]
    pub const fn service_name(&self) -> &ServiceName {
        &self.service_name
    }

    /// Returns the operation name (e.g. `GetOrders`).
    #[must_use]
    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    /// Returns the parse depth.
    #[must_use]
    pub const fn parse_depth(&self) -> Depth {
        self.parse_depth
    }

    /// Returns the request parameters.
    #[must_use]
    pub const fn params(&self) -> &Value {
        &self.params
    }

    /// Returns the expected response envelope key, `<opType>Response`.
    #[must_use]
    pub fn envelope_key(&self) -> String {
        format!("{}Response", self.op_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_empty_op_type() {
        assert!(matches!(
            RequestContext::new(ServiceName::Trading, " "),
            Err(ConfigError::MissingOpType)
        ));
    }

    #[test]
    fn test_defaults() {
        let context = RequestContext::new(ServiceName::Shopping, "GetSingleItem").unwrap();
        assert_eq!(context.parse_depth(), Depth::Unlimited);
        assert_eq!(context.params(), &Value::Null);
        assert_eq!(context.envelope_key(), "GetSingleItemResponse");
    }

    #[test]
    fn test_builder_methods_return_new_values() {
        let base = RequestContext::new(ServiceName::Trading, "GetOrders").unwrap();
        let limited = base
            .clone()
            .with_parse_depth(Depth::Limited(2))
            .with_params(json!({"NumberOfDays": "30"}));

        assert_eq!(base.parse_depth(), Depth::Unlimited);
        assert_eq!(limited.parse_depth(), Depth::Limited(2));
        assert_eq!(limited.params()["NumberOfDays"], "30");
    }
}
