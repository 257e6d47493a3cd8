//! eBay web services client.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that builds eBay requests and
//! parses their responses into flattened JSON.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EbayClient`]: The client with `xml_request()`, `xml_request_raw()`
//!   and `get_request()` methods
//! - [`EbayRequest`]: One call (service, operation, params and overrides)
//! - [`EbayError`]: Classified error type for eBay API calls
//!
//! # Example
//!
//! ```rust,ignore
//! use ebay_api::{AppId, EbayClient, EbayConfig, EbayRequest, ItemFilter, ServiceName};
//! use serde_json::json;
//!
//! let config = EbayConfig::builder()
//!     .app_id(AppId::new("my-app-id").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = EbayClient::new(&config);
//!
//! let request = EbayRequest::builder(ServiceName::Finding, "findItemsAdvanced")
//!     .param("keywords", "desk lamp")
//!     .param("itemFilter", json!([ItemFilter::new("MaxPrice", "25.00")]))
//!     .build()
//!     .unwrap();
//!
//! let data = client.get_request(request).await?;
//! let items = ebay_api::parse::parse_items_from_response(&data);
//! ```

mod client;
mod errors;
mod request;

pub use client::EbayClient;
pub use errors::{Classification, EbayError, Exchange, ResponseError, SeverityCode};
pub use request::{EbayRequest, EbayRequestBuilder};
