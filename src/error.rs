//! Error types for the eBay API client.
//!
//! This module contains error types used throughout the client for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use ebay_api::{AppId, ConfigError};
//!
//! let result = AppId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAppId)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Application id cannot be empty.
    #[error("App ID cannot be empty. Please provide a valid eBay application id.")]
    EmptyAppId,

    /// A credential value cannot be empty.
    #[error("{field} cannot be empty.")]
    EmptyCredential {
        /// The credential that was empty.
        field: &'static str,
    },

    /// Service name is missing or empty.
    #[error("Missing serviceName")]
    MissingServiceName,

    /// Operation name is missing or empty.
    #[error("Missing opType")]
    MissingOpType,

    /// Country code is not one the client knows a site for.
    #[error("Unsupported country '{country}'. Expected 'US' or 'UK'.")]
    UnsupportedCountry {
        /// The country code that was provided.
        country: String,
    },

    /// No sandbox endpoint is known for this service.
    #[error("Sandbox endpoint for {service} service not yet implemented. Please add.")]
    UnsupportedSandboxService {
        /// The service name.
        service: String,
    },

    /// The service has no URL-format (GET) interface.
    #[error("{service} does not support URL-format requests. Use an XML request instead.")]
    UnsupportedGetService {
        /// The service name.
        service: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.ebay.com').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_app_id_error_message() {
        let message = ConfigError::EmptyAppId.to_string();
        assert!(message.contains("App ID cannot be empty"));
    }

    #[test]
    fn test_missing_service_and_op_messages() {
        assert_eq!(ConfigError::MissingServiceName.to_string(), "Missing serviceName");
        assert_eq!(ConfigError::MissingOpType.to_string(), "Missing opType");
    }

    #[test]
    fn test_unsupported_sandbox_service_names_service() {
        let error = ConfigError::UnsupportedSandboxService {
            service: "BulkDataExchange".to_string(),
        };
        assert!(error.to_string().contains("BulkDataExchange"));
    }

    #[test]
    fn test_unsupported_get_service_names_service() {
        let error = ConfigError::UnsupportedGetService {
            service: "Trading".to_string(),
        };
        assert!(error.to_string().starts_with("Trading does not support"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "app_id" };
        let message = error.to_string();
        assert!(message.contains("app_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAppId;
        let _: &dyn std::error::Error = &error;
    }
}
