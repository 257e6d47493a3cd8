//! Endpoint URLs per service, site and environment.

use crate::config::{Country, ServiceName};
use crate::error::ConfigError;

/// Builds the endpoint URL for `service`.
///
/// Several of eBay's legacy sandboxes (and the production Finding, Product
/// and Shopping endpoints) are HTTP only.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedSandboxService`] when `sandbox` is set
/// for a service without a known sandbox endpoint.
///
/// # Example
///
/// ```rust
/// use ebay_api::{build_request_url, Country, ServiceName};
///
/// assert_eq!(
///     build_request_url(&ServiceName::Trading, false, Country::Us).unwrap(),
///     "https://api.ebay.com/ws/api.dll"
/// );
/// assert_eq!(
///     build_request_url(&ServiceName::Shopping, true, Country::Uk).unwrap(),
///     "http://open.api.sandbox.ebay.co.uk/shopping"
/// );
/// ```
pub fn build_request_url(
    service: &ServiceName,
    sandbox: bool,
    country: Country,
) -> Result<String, ConfigError> {
    let ext = country.extension();
    let sb = if sandbox { ".sandbox" } else { "" };

    let url = match service {
        ServiceName::Finding => {
            format!("http://svcs{sb}.ebay.{ext}/services/search/FindingService/v1")
        }
        ServiceName::Product => {
            format!("http://svcs{sb}.ebay.{ext}/services/marketplacecatalog/Product/v1")
        }
        ServiceName::Shopping => format!("http://open.api{sb}.ebay.{ext}/shopping"),
        ServiceName::Trading => format!("https://api{sb}.ebay.{ext}/ws/api.dll"),
        ServiceName::Merchandising if sandbox => {
            format!("http://svcs.sandbox.ebay.{ext}/MerchandisingService")
        }
        ServiceName::Merchandising => format!("https://svcs.ebay.{ext}/MerchandisingService"),
        ServiceName::Signin => format!("https://signin{sb}.ebay.{ext}/ws/eBayISAPI.dll"),
        ServiceName::Other(name) => {
            if sandbox {
                return Err(ConfigError::UnsupportedSandboxService {
                    service: name.clone(),
                });
            }
            format!("https://svcs.ebay.{ext}/{name}Service?")
        }
    };

    Ok(url)
}

/// Returns the path component of an endpoint URL, for use behind an
/// endpoint override.
///
/// `https://api.ebay.com/ws/api.dll` yields `/ws/api.dll`.
#[must_use]
pub fn endpoint_path(url: &str) -> &str {
    let after_scheme = url.find("://").map_or(url, |i| &url[i + 3..]);
    after_scheme
        .find('/')
        .map_or("", |i| &after_scheme[i..])
}
