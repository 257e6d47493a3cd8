//! Query strings for URL-format (GET) calls.
//!
//! eBay's URL format spells nested input with dots and repeated input with
//! zero-based indexes:
//!
//! ```text
//! keywords=ipod&paginationInput.entriesPerPage=10
//! &itemFilter(0).name=MaxPrice&itemFilter(0).value=25
//! &outputSelector(0)=SellerInfo&outputSelector(1)=PictureURLSuperSize
//! ```

use serde_json::Value;

use crate::config::{EbayConfig, ServiceName};
use crate::error::ConfigError;

/// Returns the call parameters eBay expects in the query string of a
/// URL-format call to `service`, requesting a JSON response.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedGetService`] for services that only
/// accept XML calls.
pub fn default_query_params(
    config: &EbayConfig,
    service: &ServiceName,
    op_type: &str,
    version: Option<&str>,
) -> Result<Vec<(String, String)>, ConfigError> {
    let app_id = config.app_id().as_ref();
    let version = version.unwrap_or_else(|| service.default_version());

    let pairs: Vec<(&str, &str)> = match service {
        ServiceName::Finding | ServiceName::Product => vec![
            ("OPERATION-NAME", op_type),
            ("SERVICE-VERSION", version),
            ("SECURITY-APPNAME", app_id),
            ("GLOBAL-ID", config.global_id()),
            ("RESPONSE-DATA-FORMAT", "JSON"),
            ("REST-PAYLOAD", ""),
        ],
        ServiceName::Merchandising => vec![
            ("OPERATION-NAME", op_type),
            ("SERVICE-NAME", "MerchandisingService"),
            ("SERVICE-VERSION", version),
            ("CONSUMER-ID", app_id),
            ("RESPONSE-DATA-FORMAT", "JSON"),
            ("REST-PAYLOAD", ""),
        ],
        ServiceName::Shopping => vec![
            ("callname", op_type),
            ("responseencoding", "JSON"),
            ("appid", app_id),
            ("siteid", config.site_id()),
            ("version", version),
        ],
        ServiceName::Trading | ServiceName::Signin | ServiceName::Other(_) => {
            return Err(ConfigError::UnsupportedGetService {
                service: service.to_string(),
            });
        }
    };

    Ok(pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect())
}

/// Encodes request parameters as URL-format key/value pairs.
///
/// Objects nest with dots, arrays repeat with `(index)` suffixes, nulls
/// are skipped. A non-object root yields no pairs.
///
/// # Example
///
/// ```rust
/// use ebay_api::encode_params;
/// use serde_json::json;
///
/// let params = json!({
///     "keywords": "ipod",
///     "paginationInput": {"entriesPerPage": 10},
///     "itemFilter": [{"name": "MaxPrice", "value": "25"}]
/// });
///
/// assert_eq!(
///     encode_params(&params),
///     vec![
///         ("keywords".to_string(), "ipod".to_string()),
///         ("paginationInput.entriesPerPage".to_string(), "10".to_string()),
///         ("itemFilter(0).name".to_string(), "MaxPrice".to_string()),
///         ("itemFilter(0).value".to_string(), "25".to_string()),
///     ]
/// );
/// ```
#[must_use]
pub fn encode_params(params: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = params {
        for (key, value) in map {
            encode_value(key.clone(), value, &mut pairs);
        }
    }
    pairs
}

fn encode_value(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Bool(_) | Value::Number(_) => pairs.push((key, value.to_string())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                encode_value(format!("{key}({index})"), item, pairs);
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                encode_value(format!("{key}.{child}"), item, pairs);
            }
        }
    }
}

/// Joins pairs into a query string, percent-encoding values.
///
/// Keys are left as-is since eBay expects literal `(`, `)` and `.` in them.
#[must_use]
pub fn build_query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
