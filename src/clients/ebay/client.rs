//! eBay API client implementation.
//!
//! This module provides the [`EbayClient`] type for calling eBay's
//! traditional web services over XML (POST) or URL format (GET).

use serde_json::{Map, Value};
use tracing::debug;

use crate::clients::ebay::{EbayError, EbayRequest, Exchange};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{EbayConfig, ServiceName};
use crate::error::ConfigError;
use crate::parse::{xml_to_json, ResponseParser};
use crate::request::{
    build_query_string, build_request_url, build_xml_body, default_headers, default_query_params,
    encode_params, endpoint_path,
};

const TOKEN_OPEN: &str = "<eBayAuthToken>";
const TOKEN_CLOSE: &str = "</eBayAuthToken>";
const TOKEN_MASK: &str = "*****";

/// Client for eBay's Trading, Shopping, Finding, Merchandising and
/// related services.
///
/// Every call goes through the same pipeline: build the request, send it,
/// convert the response into a JSON tree, then flatten it and check the
/// envelope's `Ack`. Anything but `Success` comes back as an
/// [`EbayError`] carrying the parsed data.
///
/// # Thread Safety
///
/// `EbayClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use ebay_api::{AppId, AuthToken, EbayClient, EbayConfig, EbayRequest, ServiceName};
///
/// let config = EbayConfig::builder()
///     .app_id(AppId::new("my-app-id").unwrap())
///     .auth_token(AuthToken::new("AgAAAA**...").unwrap())
///     .build()
///     .unwrap();
///
/// let client = EbayClient::new(&config);
///
/// let request = EbayRequest::builder(ServiceName::Trading, "GetOrders")
///     .param("NumberOfDays", 30)
///     .build()
///     .unwrap();
///
/// let data = client.xml_request(request).await?;
/// for order in data["Orders"].as_array().unwrap() {
///     println!("{}", order["OrderID"]);
/// }
/// ```
#[derive(Debug)]
pub struct EbayClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// Client configuration.
    config: EbayConfig,
    /// Response parser built from the configuration's policies.
    parser: ResponseParser,
}

// Verify EbayClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EbayClient>();
};

impl EbayClient {
    /// Creates a new client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see
    /// [`HttpClient::new`]).
    #[must_use]
    pub fn new(config: &EbayConfig) -> Self {
        Self {
            http_client: HttpClient::new(Some(config)),
            config: config.clone(),
            parser: ResponseParser::from_config(config),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &EbayConfig {
        &self.config
    }

    /// Returns the response parser.
    #[must_use]
    pub const fn parser(&self) -> &ResponseParser {
        &self.parser
    }

    /// Returns the endpoint for `service`, honoring the endpoint override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedSandboxService`] for sandbox calls
    /// to services without a known sandbox.
    pub fn service_url(&self, service: &ServiceName) -> Result<String, ConfigError> {
        let url = build_request_url(service, self.config.sandbox(), self.config.country())?;
        Ok(match self.config.endpoint() {
            Some(endpoint) => format!("{}{}", endpoint.as_ref(), endpoint_path(&url)),
            None => url,
        })
    }

    /// Builds the POST request for an XML call.
    ///
    /// The per-call auth token wins over the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Config`] for an unknown sandbox endpoint and
    /// [`EbayError::Client`] if the params cannot be written as XML.
    pub fn build_xml_http_request(&self, request: &EbayRequest) -> Result<HttpRequest, EbayError> {
        let url = self.service_url(request.service())?;
        let token = request.auth_token().or_else(|| self.config.auth_token());
        let body = build_xml_body(request.service(), request.op_type(), token, request.params())?;
        let headers = default_headers(
            &self.config,
            request.service(),
            request.op_type(),
            request.version(),
        );

        HttpRequest::builder(HttpMethod::Post, url)
            .header("Content-Type", "text/xml")
            .headers(headers)
            .headers(request.headers().iter().cloned())
            .body(body)
            .build()
            .map_err(|e| EbayError::Http(HttpError::from(e)))
    }

    /// Builds the GET request for a URL-format call.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Config`] if the service has no URL-format
    /// interface or no known sandbox.
    pub fn build_get_http_request(&self, request: &EbayRequest) -> Result<HttpRequest, EbayError> {
        let url = self.service_url(request.service())?;
        let mut pairs = default_query_params(
            &self.config,
            request.service(),
            request.op_type(),
            request.version(),
        )?;
        pairs.extend(encode_params(request.params()));

        let query = build_query_string(&pairs);
        let url = if url.ends_with('?') {
            format!("{url}{query}")
        } else {
            format!("{url}?{query}")
        };

        HttpRequest::builder(HttpMethod::Get, url)
            .headers(request.headers().iter().cloned())
            .build()
            .map_err(|e| EbayError::Http(HttpError::from(e)))
    }

    /// Makes an XML call and returns the flattened response envelope.
    ///
    /// # Errors
    ///
    /// - [`EbayError::Http`] for network failures and statuses other than 200
    /// - [`EbayError::Client`] if the response is not well-formed XML or has
    ///   no envelope
    /// - [`EbayError::Request`] or [`EbayError::System`] if `Ack` is not
    ///   `Success`; the error carries the parsed data and the exchange
    pub async fn xml_request(&self, request: EbayRequest) -> Result<Value, EbayError> {
        let context = request.context(self.config.parse_depth())?;
        let http_request = self.build_xml_http_request(&request)?;

        let url = http_request.url.clone();
        let request_body = http_request.body.as_deref().map(mask_auth_token);

        debug!(service = %request.service(), op_type = request.op_type(), "Sending XML request");
        let response = self.http_client.request(http_request).await?;

        let text = response.text();
        let tree = xml_to_json(&text)?;
        self.parser.parse_envelope(tree, &context).map_err(|e| {
            e.with_exchange(Exchange {
                url,
                request_body,
                status_code: response.code,
                response_body: text.into_owned(),
            })
        })
    }

    /// Makes an XML call and returns the raw response body.
    ///
    /// Used for calls whose response is not a plain XML document, such as
    /// FileTransfer downloads (see
    /// [`parse_response_attachment`](crate::parse::parse_response_attachment)).
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] for network failures and statuses other
    /// than 200.
    pub async fn xml_request_raw(&self, request: EbayRequest) -> Result<Vec<u8>, EbayError> {
        let http_request = self.build_xml_http_request(&request)?;

        debug!(service = %request.service(), op_type = request.op_type(), "Sending raw XML request");
        let response: HttpResponse = self.http_client.request(http_request).await?;
        Ok(response.body)
    }

    /// Makes a URL-format call with a JSON response and returns the
    /// flattened response envelope.
    ///
    /// # Errors
    ///
    /// - [`EbayError::Config`] for services without a URL-format interface
    /// - [`EbayError::Http`] for network failures and statuses other than 200
    /// - [`EbayError::Client`] if the response is not valid JSON or has no
    ///   envelope
    /// - [`EbayError::Request`] or [`EbayError::System`] if `Ack` is not
    ///   `Success`
    pub async fn get_request(&self, request: EbayRequest) -> Result<Value, EbayError> {
        let context = request.context(self.config.parse_depth())?;
        let http_request = self.build_get_http_request(&request)?;
        let url = http_request.url.clone();

        debug!(service = %request.service(), op_type = request.op_type(), "Sending URL-format request");
        let response = self.http_client.request(http_request).await?;

        let text = response.text();
        let root: Value = serde_json::from_str(&text)
            .map_err(|e| EbayError::client(format!("Error parsing JSON: {e}")))?;

        let envelope_key = context.envelope_key();
        let tree = match root {
            // Shopping answers without the envelope element.
            Value::Object(map)
                if *request.service() == ServiceName::Shopping
                    && !map.contains_key(&envelope_key) =>
            {
                let mut wrapped = Map::new();
                wrapped.insert(envelope_key, Value::Object(map));
                Value::Object(wrapped)
            }
            other => other,
        };

        self.parser.parse_envelope(tree, &context).map_err(|e| {
            e.with_exchange(Exchange {
                url,
                request_body: None,
                status_code: response.code,
                response_body: text.into_owned(),
            })
        })
    }
}

/// Replaces the content of every `eBayAuthToken` element with a mask.
fn mask_auth_token(body: &str) -> String {
    let mut masked = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(open) = rest.find(TOKEN_OPEN) {
        let content_start = open + TOKEN_OPEN.len();
        let Some(close) = rest[content_start..].find(TOKEN_CLOSE) else {
            break;
        };
        masked.push_str(&rest[..content_start]);
        masked.push_str(TOKEN_MASK);
        rest = &rest[content_start + close..];
    }

    masked.push_str(rest);
    masked
}
