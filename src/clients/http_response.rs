//! HTTP response types for the eBay API client.
//!
//! This module provides the [`HttpResponse`] type. Bodies are kept as raw
//! bytes because some calls (bulk file transfers) return MIME multipart
//! payloads with binary attachments.

use std::borrow::Cow;
use std::collections::HashMap;

/// A response received from an eBay endpoint.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use ebay_api::clients::HttpResponse;
///
/// let mut headers = HashMap::new();
/// headers.insert("content-type".to_string(), vec!["text/xml".to_string()]);
///
/// let response = HttpResponse::new(200, headers, b"<Ack>Success</Ack>".to_vec());
/// assert!(response.is_ok());
/// assert_eq!(response.header("content-type"), Some("text/xml"));
/// assert_eq!(response.text(), "<Ack>Success</Ack>");
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for status 200, the only status eBay uses for
    /// delivered call results (including failed calls).
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code == 200
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_only_for_200() {
        assert!(HttpResponse::new(200, HashMap::new(), Vec::new()).is_ok());
        assert!(!HttpResponse::new(201, HashMap::new(), Vec::new()).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), Vec::new()).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["text/xml;charset=utf-8".to_string()],
        );
        let response = HttpResponse::new(200, headers, Vec::new());

        assert_eq!(response.header("Content-Type"), Some("text/xml;charset=utf-8"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_text_is_lossy_for_binary_bodies() {
        let response = HttpResponse::new(200, HashMap::new(), vec![b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }
}
