//! HTTP client for eBay API communication.
//!
//! This module provides the [`HttpClient`] type, a thin layer over
//! `reqwest` that applies default headers and turns any status other than
//! 200 into an [`HttpError`].

use std::collections::HashMap;

use tracing::debug;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::EbayConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to eBay endpoints.
///
/// The client handles:
/// - Default headers including User-Agent
/// - Header merging (request headers win over defaults)
/// - Status checking: eBay reports call failures inside a 200 response, so
///   every other status is an error
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use ebay_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(None);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "http://open.api.ebay.com/shopping?callname=GeteBayTime")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Optional configuration supplying `user_agent_prefix`
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use ebay_api::clients::HttpClient;
    ///
    /// let client = HttpClient::new(None);
    /// assert!(client.default_headers()["User-Agent"].contains("eBay API Library"));
    /// ```
    #[must_use]
    pub fn new(config: Option<&EbayConfig>) -> Self {
        let user_agent_prefix = config
            .and_then(EbayConfig::user_agent_prefix)
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}eBay API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_headers,
        }
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - A status other than 200 is received (`Response`)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = HttpRequest::builder(HttpMethod::Post, "https://api.ebay.com/ws/api.dll")
    ///     .body(xml)
    ///     .build()
    ///     .unwrap();
    ///
    /// let response = client.request(request).await?;
    /// println!("{}", response.text());
    /// ```
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        debug!(method = %request.http_method, url = %request.url, "Sending request");
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();
        let response = HttpResponse::new(code, res_headers, body);
        debug!(code, bytes = response.body.len(), "Received response");

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code,
            message: format!("Bad response status code {code}"),
            body: response.text().into_owned(),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppId;

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(None);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("eBay API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = EbayConfig::builder()
            .app_id(AppId::new("test-app").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new(Some(&config));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("eBay API Library"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[test]
    fn test_parse_response_headers_lowercases_and_groups() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.append("Content-Type", "text/xml".parse().unwrap());
        headers.append("Set-Cookie", "a=1".parse().unwrap());
        headers.append("Set-Cookie", "b=2".parse().unwrap());

        let parsed = HttpClient::parse_response_headers(&headers);
        assert_eq!(parsed["content-type"], vec!["text/xml".to_string()]);
        assert_eq!(parsed["set-cookie"].len(), 2);
    }
}
