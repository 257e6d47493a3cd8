//! eBay service and site definitions.
//!
//! This module provides the [`ServiceName`] enum naming the eBay web service
//! a request goes to, and the [`Country`] enum selecting the eBay site.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// An eBay web service.
///
/// Known services have dedicated variants; anything else (for example
/// `BulkDataExchange` or `FileTransfer`) is carried by `Other`.
///
/// # Example
///
/// ```rust
/// use ebay_api::ServiceName;
///
/// let service: ServiceName = "FindingService".parse().unwrap();
/// assert_eq!(service, ServiceName::Finding);
///
/// let service: ServiceName = "BulkDataExchange".parse().unwrap();
/// assert_eq!(service.to_string(), "BulkDataExchange");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ServiceName {
    /// The Finding API (search).
    Finding,
    /// The Shopping API (public item data).
    Shopping,
    /// The Trading API (authenticated seller/buyer operations).
    Trading,
    /// The Merchandising API (recommendations).
    Merchandising,
    /// The Product (marketplace catalog) API.
    Product,
    /// The sign-in pages used for user consent (not a real API).
    Signin,
    /// Any other service, by name without the `Service` suffix.
    Other(String),
}

impl ServiceName {
    /// Returns the service name as used in endpoint tables and policy lookups.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Finding => "Finding",
            Self::Shopping => "Shopping",
            Self::Trading => "Trading",
            Self::Merchandising => "Merchandising",
            Self::Product => "Product",
            Self::Signin => "Signin",
            Self::Other(name) => name,
        }
    }

    /// Returns the XML namespace used on request root elements.
    #[must_use]
    pub const fn xml_namespace(&self) -> &'static str {
        match self {
            Self::Finding => "http://www.ebay.com/marketplace/search/v1/services",
            _ => "urn:ebay:apis:eBLBaseComponents",
        }
    }

    /// Returns the default API version (or compatibility level) for this service.
    #[must_use]
    pub const fn default_version(&self) -> &'static str {
        match self {
            Self::Finding => "1.13.0",
            Self::Shopping => "897",
            Self::Trading => "775",
            _ => "1.5.0",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_suffix("Service").unwrap_or(name);
        if name.is_empty() {
            return Err(ConfigError::MissingServiceName);
        }

        Ok(match name {
            "Finding" => Self::Finding,
            "Shopping" => Self::Shopping,
            "Trading" => Self::Trading,
            "Merchandising" => Self::Merchandising,
            "Product" => Self::Product,
            "Signin" => Self::Signin,
            other => Self::Other(other.to_string()),
        })
    }
}

/// The eBay site a client talks to.
///
/// The country selects the endpoint domain extension and the default
/// site id / global id headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Country {
    /// ebay.com
    #[default]
    Us,
    /// ebay.co.uk
    Uk,
}

impl Country {
    /// Returns the domain extension for this site (`com`, `co.uk`).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Us => "com",
            Self::Uk => "co.uk",
        }
    }

    /// Returns the global id (`EBAY-US`, `EBAY-GB`).
    #[must_use]
    pub const fn global_id(self) -> &'static str {
        match self {
            Self::Us => "EBAY-US",
            Self::Uk => "EBAY-GB",
        }
    }

    /// Returns the numeric site id (`0`, `3`).
    #[must_use]
    pub const fn site_id(self) -> &'static str {
        match self {
            Self::Us => "0",
            Self::Uk => "3",
        }
    }
}

impl FromStr for Country {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "UK" | "GB" => Ok(Self::Uk),
            _ => Err(ConfigError::UnsupportedCountry {
                country: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_strips_service_suffix() {
        assert_eq!("Finding".parse::<ServiceName>().unwrap(), ServiceName::Finding);
        assert_eq!(
            "FindingService".parse::<ServiceName>().unwrap(),
            ServiceName::Finding
        );
        assert_eq!(
            "MerchandisingService".parse::<ServiceName>().unwrap(),
            ServiceName::Merchandising
        );
    }

    #[test]
    fn test_unknown_service_is_other() {
        let service: ServiceName = "FileTransfer".parse().unwrap();
        assert_eq!(service, ServiceName::Other("FileTransfer".to_string()));
        assert_eq!(service.to_string(), "FileTransfer");
    }

    #[test]
    fn test_empty_service_name_is_rejected() {
        assert!(matches!(
            "".parse::<ServiceName>(),
            Err(ConfigError::MissingServiceName)
        ));
        assert!("Service".parse::<ServiceName>().is_err());
    }

    #[test]
    fn test_namespaces_and_versions() {
        assert_eq!(
            ServiceName::Finding.xml_namespace(),
            "http://www.ebay.com/marketplace/search/v1/services"
        );
        assert_eq!(
            ServiceName::Trading.xml_namespace(),
            "urn:ebay:apis:eBLBaseComponents"
        );
        assert_eq!(ServiceName::Shopping.default_version(), "897");
        assert_eq!(ServiceName::Trading.default_version(), "775");
    }

    #[test]
    fn test_country_site_values() {
        assert_eq!(Country::default(), Country::Us);
        assert_eq!(Country::Us.extension(), "com");
        assert_eq!(Country::Uk.extension(), "co.uk");
        assert_eq!(Country::Uk.global_id(), "EBAY-GB");
        assert_eq!(Country::Uk.site_id(), "3");
    }

    #[test]
    fn test_country_parsing() {
        assert_eq!("us".parse::<Country>().unwrap(), Country::Us);
        assert_eq!("UK".parse::<Country>().unwrap(), Country::Uk);
        assert!(matches!(
            "DE".parse::<Country>(),
            Err(ConfigError::UnsupportedCountry { .. })
        ));
    }
}
