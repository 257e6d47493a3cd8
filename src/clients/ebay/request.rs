//! Per-call request description for [`EbayClient`](super::EbayClient).

use serde_json::{Map, Value};

use crate::config::{AuthToken, ServiceName};
use crate::context::RequestContext;
use crate::error::ConfigError;
use crate::parse::Depth;

/// One call to an eBay service.
///
/// The same request drives XML calls and URL-format calls; the client
/// method picks the wire format.
///
/// # Example
///
/// ```rust
/// use ebay_api::{Depth, EbayRequest, ServiceName};
/// use serde_json::json;
///
/// let request = EbayRequest::builder(ServiceName::Trading, "GetOrders")
///     .param("NumberOfDays", 30)
///     .param("OrderRole", "Seller")
///     .parse_depth(Depth::Limited(4))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.op_type(), "GetOrders");
/// assert_eq!(request.params(), &json!({"NumberOfDays": 30, "OrderRole": "Seller"}));
/// ```
#[derive(Clone, Debug)]
pub struct EbayRequest {
    service: ServiceName,
    op_type: String,
    params: Value,
    version: Option<String>,
    auth_token: Option<AuthToken>,
    headers: Vec<(String, String)>,
    parse_depth: Option<Depth>,
}

impl EbayRequest {
    /// Creates a builder for a call to `op_type` on `service`.
    #[must_use]
    pub fn builder(service: ServiceName, op_type: impl Into<String>) -> EbayRequestBuilder {
        EbayRequestBuilder::new(service, op_type)
    }

    /// Returns the target service.
    #[must_use]
    pub const fn service(&self) -> &ServiceName {
        &self.service
    }

    /// Returns the operation name.
    #[must_use]
    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    /// Returns the call parameters (an object, or null when none were set).
    #[must_use]
    pub const fn params(&self) -> &Value {
        &self.params
    }

    /// Returns the version override, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the auth token override, if any.
    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    /// Returns the extra headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the parse depth override, if any.
    #[must_use]
    pub const fn parse_depth(&self) -> Option<Depth> {
        self.parse_depth
    }

    /// Builds the parsing context, using `default_depth` unless overridden.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOpType`] if the operation name is empty.
    pub fn context(&self, default_depth: Depth) -> Result<RequestContext, ConfigError> {
        Ok(RequestContext::new(self.service.clone(), self.op_type.clone())?
            .with_parse_depth(self.parse_depth.unwrap_or(default_depth))
            .with_params(self.params.clone()))
    }
}

/// Builder for [`EbayRequest`].
#[derive(Debug)]
pub struct EbayRequestBuilder {
    service: ServiceName,
    op_type: String,
    params: Map<String, Value>,
    version: Option<String>,
    auth_token: Option<AuthToken>,
    headers: Vec<(String, String)>,
    parse_depth: Option<Depth>,
}

impl EbayRequestBuilder {
    fn new(service: ServiceName, op_type: impl Into<String>) -> Self {
        Self {
            service,
            op_type: op_type.into(),
            params: Map::new(),
            version: None,
            auth_token: None,
            headers: Vec::new(),
            parse_depth: None,
        }
    }

    /// Merges every field of `params` (an object) into the call parameters.
    /// Non-object values are ignored.
    #[must_use]
    pub fn params(mut self, params: Value) -> Self {
        if let Value::Object(map) = params {
            self.params.extend(map);
        }
        self
    }

    /// Sets a single call parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Overrides the service's default version (or Trading compatibility level).
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Overrides the configured auth token for this call.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Adds an extra header, applied after the service defaults.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Overrides the configured parse depth for this call.
    #[must_use]
    pub const fn parse_depth(mut self, depth: Depth) -> Self {
        self.parse_depth = Some(depth);
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOpType`] if the operation name is empty.
    pub fn build(self) -> Result<EbayRequest, ConfigError> {
        if self.op_type.trim().is_empty() {
            return Err(ConfigError::MissingOpType);
        }

        let params = if self.params.is_empty() {
            Value::Null
        } else {
            Value::Object(self.params)
        };

        Ok(EbayRequest {
            service: self.service,
            op_type: self.op_type,
            params,
            version: self.version,
            auth_token: self.auth_token,
            headers: self.headers,
            parse_depth: self.parse_depth,
        })
    }
}
