//! Configuration types for the eBay API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for communication with eBay's traditional (XML and URL
//! format) web services.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EbayConfig`]: The main configuration struct holding all client settings
//! - [`EbayConfigBuilder`]: A builder for constructing [`EbayConfig`] instances
//! - [`AppId`], [`DevId`]: Validated application credentials
//! - [`CertId`], [`AuthToken`]: Validated secrets with masked debug output
//! - [`EndpointUrl`]: A validated base URL overriding every service endpoint
//! - [`ServiceName`]: The eBay web service a request targets
//! - [`Country`]: The eBay site (domain extension, site id, global id)
//!
//! # Example
//!
//! ```rust
//! use ebay_api::{AppId, AuthToken, Country, EbayConfig};
//!
//! let config = EbayConfig::builder()
//!     .app_id(AppId::new("my-app-id").unwrap())
//!     .auth_token(AuthToken::new("v^1.1#i^1#...").unwrap())
//!     .country(Country::Uk)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.site_id(), "3");
//! ```

mod newtypes;
mod service;

pub use newtypes::{AppId, AuthToken, CertId, DevId, EndpointUrl};
pub use service::{Country, ServiceName};

use crate::error::ConfigError;
use crate::parse::{ArrayFieldPolicy, Depth, ScalarCoercion};

/// Configuration for the eBay API client.
///
/// # Thread Safety
///
/// `EbayConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use ebay_api::{AppId, Depth, EbayConfig};
///
/// let config = EbayConfig::builder()
///     .app_id(AppId::new("my-app-id").unwrap())
///     .sandbox(true)
///     .parse_depth(Depth::Limited(5))
///     .build()
///     .unwrap();
///
/// assert!(config.sandbox());
/// assert_eq!(config.global_id(), "EBAY-US");
/// ```
#[derive(Clone, Debug)]
pub struct EbayConfig {
    app_id: AppId,
    dev_id: Option<DevId>,
    cert_id: Option<CertId>,
    auth_token: Option<AuthToken>,
    country: Country,
    site_id: Option<String>,
    global_id: Option<String>,
    sandbox: bool,
    user_agent_prefix: Option<String>,
    endpoint: Option<EndpointUrl>,
    parse_depth: Depth,
    scalar_coercion: ScalarCoercion,
    array_fields: ArrayFieldPolicy,
}

impl EbayConfig {
    /// Creates a new builder for constructing an `EbayConfig`.
    #[must_use]
    pub fn builder() -> EbayConfigBuilder {
        EbayConfigBuilder::new()
    }

    /// Returns the application id.
    #[must_use]
    pub const fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Returns the developer id, if configured.
    #[must_use]
    pub const fn dev_id(&self) -> Option<&DevId> {
        self.dev_id.as_ref()
    }

    /// Returns the certificate id, if configured.
    #[must_use]
    pub const fn cert_id(&self) -> Option<&CertId> {
        self.cert_id.as_ref()
    }

    /// Returns the default user auth token, if configured.
    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    /// Returns the eBay site.
    #[must_use]
    pub const fn country(&self) -> Country {
        self.country
    }

    /// Returns the numeric site id: the override if set, otherwise the
    /// country's site.
    #[must_use]
    pub fn site_id(&self) -> &str {
        self.site_id
            .as_deref()
            .unwrap_or_else(|| self.country.site_id())
    }

    /// Returns the global id: the override if set, otherwise the country's.
    #[must_use]
    pub fn global_id(&self) -> &str {
        self.global_id
            .as_deref()
            .unwrap_or_else(|| self.country.global_id())
    }

    /// Returns whether requests go to sandbox endpoints.
    #[must_use]
    pub const fn sandbox(&self) -> bool {
        self.sandbox
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the endpoint override, if configured.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&EndpointUrl> {
        self.endpoint.as_ref()
    }

    /// Returns the default parse depth for requests that do not set one.
    #[must_use]
    pub const fn parse_depth(&self) -> Depth {
        self.parse_depth
    }

    /// Returns the scalar coercion policy.
    #[must_use]
    pub const fn scalar_coercion(&self) -> &ScalarCoercion {
        &self.scalar_coercion
    }

    /// Returns the extra array-field entries added to the built-in table.
    #[must_use]
    pub const fn array_fields(&self) -> &ArrayFieldPolicy {
        &self.array_fields
    }
}

// Verify EbayConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EbayConfig>();
};

/// Builder for constructing [`EbayConfig`] instances.
///
/// The only required field is `app_id`.
///
/// # Defaults
///
/// - `country`: [`Country::Us`]
/// - `sandbox`: `false`
/// - `parse_depth`: [`Depth::Unlimited`]
/// - `scalar_coercion`: enabled, no exemptions
/// - `array_fields`: empty (the built-in table always applies)
/// - everything else: `None`
#[derive(Debug, Default)]
pub struct EbayConfigBuilder {
    app_id: Option<AppId>,
    dev_id: Option<DevId>,
    cert_id: Option<CertId>,
    auth_token: Option<AuthToken>,
    country: Option<Country>,
    site_id: Option<String>,
    global_id: Option<String>,
    sandbox: Option<bool>,
    user_agent_prefix: Option<String>,
    endpoint: Option<EndpointUrl>,
    parse_depth: Option<Depth>,
    scalar_coercion: Option<ScalarCoercion>,
    array_fields: Option<ArrayFieldPolicy>,
}

impl EbayConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application id (required).
    #[must_use]
    pub fn app_id(mut self, app_id: AppId) -> Self {
        self.app_id = Some(app_id);
        self
    }

    /// Sets the developer id (Trading API).
    #[must_use]
    pub fn dev_id(mut self, dev_id: DevId) -> Self {
        self.dev_id = Some(dev_id);
        self
    }

    /// Sets the certificate id (Trading API).
    #[must_use]
    pub fn cert_id(mut self, cert_id: CertId) -> Self {
        self.cert_id = Some(cert_id);
        self
    }

    /// Sets the default user auth token sent with XML requests.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Sets the eBay site.
    #[must_use]
    pub const fn country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    /// Overrides the numeric site id derived from the country.
    #[must_use]
    pub fn site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Overrides the global id derived from the country.
    #[must_use]
    pub fn global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = Some(global_id.into());
        self
    }

    /// Sends requests to sandbox endpoints.
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sends every request to this base URL, keeping each service's path.
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the default parse depth.
    #[must_use]
    pub const fn parse_depth(mut self, depth: Depth) -> Self {
        self.parse_depth = Some(depth);
        self
    }

    /// Sets the scalar coercion policy.
    #[must_use]
    pub fn scalar_coercion(mut self, coercion: ScalarCoercion) -> Self {
        self.scalar_coercion = Some(coercion);
        self
    }

    /// Adds array-field entries on top of the built-in table.
    #[must_use]
    pub fn array_fields(mut self, policy: ArrayFieldPolicy) -> Self {
        self.array_fields = Some(policy);
        self
    }

    /// Builds the [`EbayConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `app_id` is not set.
    pub fn build(self) -> Result<EbayConfig, ConfigError> {
        let app_id = self
            .app_id
            .ok_or(ConfigError::MissingRequiredField { field: "app_id" })?;

        Ok(EbayConfig {
            app_id,
            dev_id: self.dev_id,
            cert_id: self.cert_id,
            auth_token: self.auth_token,
            country: self.country.unwrap_or_default(),
            site_id: self.site_id,
            global_id: self.global_id,
            sandbox: self.sandbox.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
            endpoint: self.endpoint,
            parse_depth: self.parse_depth.unwrap_or_default(),
            scalar_coercion: self.scalar_coercion.unwrap_or_default(),
            array_fields: self.array_fields.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_id() -> AppId {
        AppId::new("test-app").unwrap()
    }

    #[test]
    fn test_builder_requires_app_id() {
        let result = EbayConfigBuilder::new().sandbox(true).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "app_id" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = EbayConfig::builder().app_id(app_id()).build().unwrap();

        assert_eq!(config.country(), Country::Us);
        assert_eq!(config.site_id(), "0");
        assert_eq!(config.global_id(), "EBAY-US");
        assert!(!config.sandbox());
        assert_eq!(config.parse_depth(), Depth::Unlimited);
        assert!(config.scalar_coercion().is_enabled());
        assert!(config.auth_token().is_none());
        assert!(config.dev_id().is_none());
        assert!(config.cert_id().is_none());
        assert!(config.endpoint().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_overrides_win_over_country_defaults() {
        let config = EbayConfig::builder()
            .app_id(app_id())
            .country(Country::Uk)
            .site_id("77")
            .build()
            .unwrap();

        assert_eq!(config.site_id(), "77");
        assert_eq!(config.global_id(), "EBAY-GB");
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EbayConfig>();
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config = EbayConfig::builder()
            .app_id(app_id())
            .cert_id(CertId::new("super-secret-cert").unwrap())
            .auth_token(AuthToken::new("super-secret-token").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("EbayConfig"));
        assert!(!debug_str.contains("super-secret"));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let policy = ArrayFieldPolicy::new().with_fields("Trading", "GetItem", ["PictureURL"]);
        let config = EbayConfig::builder()
            .app_id(app_id())
            .dev_id(DevId::new("dev").unwrap())
            .cert_id(CertId::new("cert").unwrap())
            .global_id("EBAY-DE")
            .user_agent_prefix("MyApp/1.0")
            .endpoint(EndpointUrl::new("http://localhost:9000").unwrap())
            .parse_depth(Depth::Limited(4))
            .scalar_coercion(ScalarCoercion::disabled())
            .array_fields(policy.clone())
            .build()
            .unwrap();

        assert_eq!(config.dev_id().map(|id| id.as_ref()), Some("dev"));
        assert_eq!(config.global_id(), "EBAY-DE");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(
            config.endpoint().map(|url| url.as_ref()),
            Some("http://localhost:9000")
        );
        assert_eq!(config.parse_depth(), Depth::Limited(4));
        assert!(!config.scalar_coercion().is_enabled());
        assert_eq!(config.array_fields(), &policy);
    }
}
