//! HTTP client types for eBay API communication.
//!
//! This module provides the transport layer for eBay's traditional web
//! services and the [`ebay::EbayClient`] built on top of it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to an eBay endpoint
//! - [`HttpResponse`]: A raw response from an eBay endpoint
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`ebay::EbayClient`]: Higher-level client that builds eBay calls and
//!   parses their responses
//! - [`ebay::EbayError`]: Classified error type for eBay API calls
//!
//! # Example
//!
//! ```rust,ignore
//! use ebay_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(None);
//!
//! let request = HttpRequest::builder(HttpMethod::Post, "https://api.ebay.com/ws/api.dll")
//!     .header("X-EBAY-API-CALL-NAME", "GeteBayOfficialTime")
//!     .body(xml)
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Status Handling
//!
//! eBay delivers call results, including failed calls, with status 200.
//! Any other status is returned as [`HttpError::Response`] with the body
//! attached. There is no automatic retry.

pub mod ebay;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

// Re-export eBay client types at the clients module level
pub use ebay::{EbayClient, EbayError, EbayRequest, EbayRequestBuilder};
