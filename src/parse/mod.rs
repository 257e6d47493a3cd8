//! Response parsing.
//!
//! eBay answers in XML (or, for URL-format calls, JSON shaped like
//! converted XML). Turning that into something convenient happens in
//! three steps:
//!
//! 1. [`xml_to_json`] converts the document into a generic tree where every
//!    child element is an array
//! 2. the [`Flattener`] rewrites the tree: single-element arrays collapse,
//!    wrapped arrays unwrap, amounts and scalars get typed
//! 3. [`ResponseParser::parse_envelope`] finds the `<opType>Response`
//!    envelope and turns a non-`Success` acknowledgement into an error
//!
//! [`parse_items_from_response`] and [`parse_response_attachment`] help
//! with the payloads of search and bulk-data calls.

mod amount;
mod attachment;
mod envelope;
mod flatten;
mod items;
mod policy;
mod scalar;
pub mod shape;
mod xml;

pub use amount::normalize_amount;
pub use attachment::parse_response_attachment;
pub use envelope::{parse_envelope, ResponseParser};
pub use flatten::{flatten, Depth, Flattener, MAX_RECURSION_DEPTH};
pub use items::parse_items_from_response;
pub use policy::{has_array_suffix, is_protected_array_field, ArrayFieldPolicy};
pub use scalar::{cast_amount, parse_number, ScalarCoercion};
pub use shape::{classify, NodeShape};
pub use xml::{xml_to_json, MAX_ELEMENT_DEPTH};
