//! # eBay API Rust Client
//!
//! A Rust client for eBay's traditional web services (Trading, Shopping,
//! Finding, Merchandising and related XML/URL-format APIs), providing
//! type-safe configuration, request building and response flattening.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EbayConfig`] and [`EbayConfigBuilder`]
//! - Validated newtypes for credentials, with masked debug output for secrets
//! - Endpoint, header, XML body and query string builders per service
//! - XML-to-JSON conversion and depth-bounded flattening of responses
//! - Envelope parsing that classifies failures into request, system and
//!   client errors while keeping the parsed data
//! - An async client over `reqwest` for XML (POST) and URL-format (GET) calls
//!
//! ## Quick Start
//!
//! ```rust
//! use ebay_api::{AppId, AuthToken, Country, EbayConfig};
//!
//! // Create configuration using the builder pattern
//! let config = EbayConfig::builder()
//!     .app_id(AppId::new("your-app-id").unwrap())
//!     .auth_token(AuthToken::new("your-auth-token").unwrap())
//!     .country(Country::Us)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use ebay_api::{EbayClient, EbayError, EbayRequest, ServiceName};
//!
//! let client = EbayClient::new(&config);
//!
//! let request = EbayRequest::builder(ServiceName::Trading, "GetOrders")
//!     .param("CreateTimeFrom", "2015-10-01T00:00:00.000Z")
//!     .param("CreateTimeTo", "2015-10-10T00:00:00.000Z")
//!     .param("OrderRole", "Seller")
//!     .build()
//!     .unwrap();
//!
//! match client.xml_request(request).await {
//!     Ok(data) => println!("{} orders", data["Orders"].as_array().map_or(0, Vec::len)),
//!     Err(EbayError::Request(e)) => println!("Rejected: {}", e.message),
//!     Err(e) => println!("Failed: {e}"),
//! }
//! ```
//!
//! ## Parsing Responses Directly
//!
//! The parsing pipeline is usable without the client, e.g. for stored
//! responses:
//!
//! ```rust
//! use ebay_api::parse::xml_to_json;
//! use ebay_api::{parse_envelope, RequestContext, ServiceName};
//!
//! let xml = "<GetOrdersResponse>\
//!     <Ack>Success</Ack>\
//!     <OrderArray><Order><OrderID>123</OrderID></Order></OrderArray>\
//!     </GetOrdersResponse>";
//!
//! let context = RequestContext::new(ServiceName::Trading, "GetOrders").unwrap();
//! let data = parse_envelope(xml_to_json(xml).unwrap(), &context).unwrap();
//!
//! assert_eq!(data["Orders"][0]["OrderID"], 123);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Data survives errors**: Warning and failure responses still carry
//!   their parsed envelope

pub mod clients;
pub mod config;
pub mod context;
pub mod error;
pub mod parse;
pub mod request;

// Re-export public types at crate root for convenience
pub use config::{
    AppId, AuthToken, CertId, Country, DevId, EbayConfig, EbayConfigBuilder, EndpointUrl,
    ServiceName,
};
pub use context::RequestContext;
pub use error::ConfigError;

// Re-export client types
pub use clients::ebay::{
    Classification, EbayClient, EbayError, EbayRequest, EbayRequestBuilder, Exchange,
    ResponseError, SeverityCode,
};
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

// Re-export parsing entry points
pub use parse::{
    flatten, parse_envelope, ArrayFieldPolicy, Depth, Flattener, ResponseParser, ScalarCoercion,
};

// Re-export request builders
pub use request::{
    build_query_string, build_request_url, build_xml_body, default_headers, default_query_params,
    encode_params, ItemFilter,
};
