//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated eBay application id (`AppID` / client id).
///
/// # Example
///
/// ```rust
/// use ebay_api::AppId;
///
/// let app_id = AppId::new("MyApp-1234").unwrap();
/// assert_eq!(app_id.as_ref(), "MyApp-1234");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppId(String);

impl AppId {
    /// Creates a new validated application id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyAppId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated developer id (`DevID`), required by the Trading API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevId(String);

impl DevId {
    /// Creates a new validated developer id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyCredential { field: "Dev ID" });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for DevId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated certificate id (`CertID`), required by the Trading API.
///
/// The `Debug` implementation masks the value.
#[derive(Clone, PartialEq, Eq)]
pub struct CertId(String);

impl CertId {
    /// Creates a new validated certificate id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyCredential { field: "Cert ID" });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for CertId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CertId(*****)")
    }
}

/// A validated user auth token (`eBayAuthToken`).
///
/// This newtype masks its value in debug output to prevent accidental
/// exposure in logs.
///
/// # Example
///
/// ```rust
/// use ebay_api::AuthToken;
///
/// let token = AuthToken::new("AgAAAA**secret").unwrap();
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyCredential {
                field: "Auth token",
            });
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// A validated base URL that replaces the per-service eBay endpoints.
///
/// Useful when requests go through a proxy, or against a local mock server.
/// Trailing slashes are removed.
///
/// # Example
///
/// ```rust
/// use ebay_api::EndpointUrl;
///
/// let url = EndpointUrl::new("http://localhost:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080");
/// assert_eq!(url.scheme(), "http");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpointUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }

        let host = url[scheme_end + 3..]
            .split([':', '/', '?', '#'])
            .next()
            .unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
