//! Classified error types for eBay API calls.
//!
//! Every call returns one of three kinds of failure:
//!
//! - [`EbayError::Client`]: the response could not be understood (missing
//!   envelope, malformed XML or JSON), or the request could not be built
//! - [`EbayError::Request`]: eBay rejected the call because of its input
//! - [`EbayError::System`]: eBay failed internally
//!
//! Transport and configuration failures are wrapped as [`EbayError::Http`]
//! and [`EbayError::Config`].
//!
//! Request and system errors carry a [`ResponseError`] with the parsed
//! envelope, so callers can still read data from calls that completed with
//! warnings.
//!
//! # Example
//!
//! ```rust,ignore
//! use ebay_api::EbayError;
//!
//! match client.xml_request(request).await {
//!     Ok(data) => println!("Orders: {}", data["Orders"]),
//!     Err(EbayError::Request(e)) => {
//!         println!("Bad request ({}): {}", e.severity_code, e.message);
//!         println!("Partial data: {}", e.data);
//!     }
//!     Err(EbayError::System(e)) => println!("eBay is having trouble: {}", e.message),
//!     Err(e) => println!("Client error: {e}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::clients::HttpError;
use crate::context::RequestContext;
use crate::error::ConfigError;

/// Severity of an eBay error record. `Error` outranks `Warning`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityCode {
    /// The call completed; the record is informational.
    Warning,
    /// The call failed.
    Error,
}

impl SeverityCode {
    /// Parses eBay's `SeverityCode` text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "Warning" => Some(Self::Warning),
            "Error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns the name as eBay spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for SeverityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an eBay error record. `SystemError` outranks
/// `RequestError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    /// The request was invalid.
    RequestError,
    /// eBay failed while processing a valid request.
    SystemError,
}

impl Classification {
    /// Parses eBay's `ErrorClassification` text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "RequestError" => Some(Self::RequestError),
            "SystemError" => Some(Self::SystemError),
            _ => None,
        }
    }

    /// Returns the name as eBay spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestError => "RequestError",
            Self::SystemError => "SystemError",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the HTTP exchange that produced an error.
///
/// The auth token is masked in `request_body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// The request URL.
    pub url: String,
    /// The request body, if any.
    pub request_body: Option<String>,
    /// The response status code.
    pub status_code: u16,
    /// The raw response body.
    pub response_body: String,
}

/// Details of an error reported in a response envelope.
#[derive(Clone, Debug)]
pub struct ResponseError {
    /// Composite message built from every error record.
    pub message: String,
    /// Highest severity across the records.
    pub severity_code: SeverityCode,
    /// Highest classification across the records.
    pub classification: Classification,
    /// The flattened error records.
    pub errors: Vec<Value>,
    /// The envelope's `Ack` value.
    pub details: Value,
    /// The call this error belongs to.
    pub context: RequestContext,
    /// The HTTP exchange, when the error came from a live call.
    pub exchange: Option<Exchange>,
    /// The flattened envelope.
    pub data: Value,
}

/// Error type for eBay API calls.
#[derive(Debug, Error)]
pub enum EbayError {
    /// The response could not be understood, or the request could not be built.
    #[error("{message}")]
    Client {
        /// What went wrong.
        message: String,
        /// Whatever was parsed before the failure.
        data: Option<Value>,
    },

    /// eBay reported a problem with the request.
    #[error("eBay API request error: {}", .0.message)]
    Request(Box<ResponseError>),

    /// eBay reported an internal failure.
    #[error("eBay API system error: {}", .0.message)]
    System(Box<ResponseError>),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The call was misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EbayError {
    /// Creates a [`EbayError::Client`] without data.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
            data: None,
        }
    }

    /// Wraps a [`ResponseError`] in the variant matching its classification.
    #[must_use]
    pub fn from_response(error: ResponseError) -> Self {
        match error.classification {
            Classification::SystemError => Self::System(Box::new(error)),
            Classification::RequestError => Self::Request(Box::new(error)),
        }
    }

    /// Returns the parsed data attached to this error, if any.
    ///
    /// For request and system errors this is the flattened envelope, which
    /// may hold results when eBay only raised warnings.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Client { data, .. } => data.as_ref(),
            Self::Request(e) | Self::System(e) => Some(&e.data),
            Self::Http(_) | Self::Config(_) => None,
        }
    }

    /// Returns the envelope error details for request and system errors.
    #[must_use]
    pub fn response_error(&self) -> Option<&ResponseError> {
        match self {
            Self::Request(e) | Self::System(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for failures on the caller's side of the wire:
    /// unparseable responses, transport failures and bad configuration.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. } | Self::Http(_) | Self::Config(_))
    }

    /// Returns `true` if eBay rejected the request.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Returns `true` if eBay failed internally.
    #[must_use]
    pub const fn is_system_error(&self) -> bool {
        matches!(self, Self::System(_))
    }

    /// Attaches an exchange snapshot to request and system errors.
    #[must_use]
    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        if let Self::Request(e) | Self::System(e) = &mut self {
            e.exchange = Some(exchange);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceName;
    use serde_json::json;

    fn response_error(classification: Classification) -> ResponseError {
        ResponseError {
            message: "Error: Invalid token (931)".to_string(),
            severity_code: SeverityCode::Error,
            classification,
            errors: vec![json!({"ErrorCode": 931})],
            details: json!("Failure"),
            context: RequestContext::new(ServiceName::Trading, "GetOrders").unwrap(),
            exchange: None,
            data: json!({"Ack": "Failure"}),
        }
    }

    #[test]
    fn test_severity_and_classification_ordering() {
        assert!(SeverityCode::Error > SeverityCode::Warning);
        assert!(Classification::SystemError > Classification::RequestError);
        assert_eq!(SeverityCode::parse("Warning"), Some(SeverityCode::Warning));
        assert_eq!(SeverityCode::parse("warning"), None);
        assert_eq!(Classification::parse("SystemError"), Some(Classification::SystemError));
    }

    #[test]
    fn test_from_response_picks_variant_by_classification() {
        let request = EbayError::from_response(response_error(Classification::RequestError));
        assert!(request.is_request_error());
        assert_eq!(
            request.to_string(),
            "eBay API request error: Error: Invalid token (931)"
        );

        let system = EbayError::from_response(response_error(Classification::SystemError));
        assert!(system.is_system_error());
        assert!(system.to_string().starts_with("eBay API system error: "));
    }

    #[test]
    fn test_data_accessor() {
        let error = EbayError::from_response(response_error(Classification::RequestError));
        assert_eq!(error.data(), Some(&json!({"Ack": "Failure"})));

        let client = EbayError::Client {
            message: "Response missing GetOrdersResponse element".to_string(),
            data: Some(json!({"Other": 1})),
        };
        assert!(client.is_client_error());
        assert_eq!(client.data(), Some(&json!({"Other": 1})));

        assert_eq!(EbayError::client("x").data(), None);
    }

    #[test]
    fn test_with_exchange_only_touches_response_errors() {
        let exchange = Exchange {
            url: "https://api.ebay.com/ws/api.dll".to_string(),
            request_body: Some("<x/>".to_string()),
            status_code: 200,
            response_body: "<y/>".to_string(),
        };

        let error = EbayError::from_response(response_error(Classification::RequestError))
            .with_exchange(exchange.clone());
        assert_eq!(
            error.response_error().and_then(|e| e.exchange.as_ref()),
            Some(&exchange)
        );

        let client = EbayError::client("x").with_exchange(exchange);
        assert!(client.response_error().is_none());
    }

    #[test]
    fn test_wrapped_errors_are_client_side() {
        let error = EbayError::from(ConfigError::MissingOpType);
        assert!(error.is_client_error());
        assert!(!error.is_request_error());
        assert_eq!(error.to_string(), "Missing opType");
    }
}
