//! HTTP-specific error types for the eBay API client.
//!
//! This module contains error types for the transport layer: unexpected
//! status codes, request validation failures and network errors.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Any response whose status is not 200
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use ebay_api::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.text()),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => {
//!         println!("Invalid request: {}", e);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a status other than 200.
///
/// eBay's XML services report call failures inside a 200 response, so any
/// other status indicates a transport or gateway problem. The raw body is
/// kept for diagnostics.
///
/// # Example
///
/// ```rust
/// use ebay_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 503,
///     message: "Bad response status code 503".to_string(),
///     body: "Service Unavailable".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Bad response status code 503");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message embedding the status code.
    pub message: String,
    /// The raw response body, decoded lossily as UTF-8.
    pub body: String,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST requests
/// - A body on a GET request
/// - An empty URL
///
/// # Example
///
/// ```rust
/// use ebay_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// println!("{}", error); // "Cannot use post without specifying data."
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET request was given a body.
    #[error("Cannot send data with {method}.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },

    /// The request URL is empty.
    #[error("Request URL cannot be empty.")]
    EmptyUrl,
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use ebay_api::HttpError;
///
/// let result = client.request(request).await;
/// match result {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* handle bad status */ }
///     Err(HttpError::InvalidRequest(e)) => { /* handle validation error */ }
///     Err(HttpError::Network(e)) => { /* handle network error */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// A response with a status other than 200.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
