//! Default HTTP headers for XML calls, per service.

use crate::config::{EbayConfig, ServiceName};

/// Returns the headers eBay expects on an XML call to `service`.
///
/// `version` overrides the service's default version (or Trading
/// compatibility level). Services without documented headers get none;
/// their calls carry everything in the XML body.
///
/// # Example
///
/// ```rust
/// use ebay_api::{default_headers, AppId, EbayConfig, ServiceName};
///
/// let config = EbayConfig::builder()
///     .app_id(AppId::new("my-app").unwrap())
///     .build()
///     .unwrap();
/// let headers = default_headers(&config, &ServiceName::Shopping, "GetSingleItem", None);
///
/// assert!(headers.contains(&("X-EBAY-API-CALL-NAME", "GetSingleItem".to_string())));
/// assert!(headers.contains(&("X-EBAY-API-VERSION", "897".to_string())));
/// ```
#[must_use]
pub fn default_headers(
    config: &EbayConfig,
    service: &ServiceName,
    op_type: &str,
    version: Option<&str>,
) -> Vec<(&'static str, String)> {
    let app_id = config.app_id().as_ref().to_string();
    let version = version.unwrap_or_else(|| service.default_version()).to_string();
    let op_type = op_type.to_string();

    match service {
        ServiceName::Finding => vec![
            ("X-EBAY-SOA-SECURITY-APPNAME", app_id),
            ("X-EBAY-SOA-REQUEST-DATA-FORMAT", "XML".to_string()),
            ("X-EBAY-SOA-RESPONSE-DATA-FORMAT", "XML".to_string()),
            ("X-EBAY-SOA-GLOBAL-ID", config.global_id().to_string()),
            ("X-EBAY-SOA-SERVICE-VERSION", version),
            ("X-EBAY-SOA-OPERATION-NAME", op_type),
        ],
        ServiceName::Product => vec![
            ("SERVICE-NAME", op_type.clone()),
            ("SECURITY-APPNAME", app_id),
            ("SERVICE-VERSION", version),
            ("OPERATION-NAME", op_type),
            ("GLOBAL-ID", config.global_id().to_string()),
            ("RESPONSE-DATA-FORMAT", "XML".to_string()),
        ],
        ServiceName::Merchandising => vec![
            ("X-EBAY-SOA-SERVICE-NAME", "MerchandisingService".to_string()),
            ("X-EBAY-SOA-OPERATION-NAME", op_type),
            ("EBAY-SOA-CONSUMER-ID", app_id),
            ("SERVICE-VERSION", version),
            ("X-EBAY-SOA-REQUEST-DATA-FORMAT", "XML".to_string()),
        ],
        ServiceName::Shopping => vec![
            ("X-EBAY-API-APP-ID", app_id),
            ("X-EBAY-API-CALL-NAME", op_type),
            ("X-EBAY-API-VERSION", version),
            ("X-EBAY-API-SITE-ID", config.site_id().to_string()),
            ("X-EBAY-API-REQUEST-ENCODING", "XML".to_string()),
            ("X-EBAY-API-RESPONSE-ENCODING", "XML".to_string()),
            ("Content-Type", "text/xml".to_string()),
        ],
        ServiceName::Trading => {
            let mut headers = vec![
                ("X-EBAY-API-APP-NAME", app_id),
                ("X-EBAY-API-CALL-NAME", op_type),
                ("X-EBAY-API-COMPATIBILITY-LEVEL", version),
                ("X-EBAY-API-SITEID", config.site_id().to_string()),
            ];
            if let Some(dev_id) = config.dev_id() {
                headers.push(("X-EBAY-API-DEV-NAME", dev_id.as_ref().to_string()));
            }
            if let Some(cert_id) = config.cert_id() {
                headers.push(("X-EBAY-API-CERT-NAME", cert_id.as_ref().to_string()));
            }
            headers
        }
        ServiceName::Signin | ServiceName::Other(_) => Vec::new(),
    }
}
