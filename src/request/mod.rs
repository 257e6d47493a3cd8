//! Building blocks for outgoing calls.
//!
//! - [`build_request_url`]: endpoint per service, site and environment
//! - [`default_headers`]: headers for XML calls
//! - [`build_xml_body`]: XML request bodies
//! - [`default_query_params`], [`encode_params`], [`build_query_string`]:
//!   URL-format (GET) calls
//! - [`ItemFilter`]: Finding API item filters

mod filters;
mod headers;
mod query;
mod urls;
mod xml_body;

pub use filters::ItemFilter;
pub use headers::default_headers;
pub use query::{build_query_string, default_query_params, encode_params};
pub use urls::{build_request_url, endpoint_path};
pub use xml_body::build_xml_body;
