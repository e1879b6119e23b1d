//! MWS marketplace definitions.
//!
//! Each marketplace pairs the identifier sent as `MarketplaceId` with the
//! regional MWS endpoint that serves it.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// An Amazon marketplace reachable through MWS.
///
/// # Example
///
/// ```rust
/// use mws_api::Marketplace;
///
/// let ca = Marketplace::CA;
/// assert_eq!(ca.id(), "A2EUQ1WTGCTBG2");
/// assert_eq!(ca.host(), "mws.amazonservices.ca");
///
/// let de: Marketplace = "de".parse().unwrap();
/// assert_eq!(de.host(), "mws-eu.amazonservices.com");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Marketplace {
    country_code: &'static str,
    id: &'static str,
    host: &'static str,
}

impl Marketplace {
    /// Brazil.
    pub const BR: Self = Self::define("BR", "A2Q3Y263D00KWC", "mws.amazonservices.com");
    /// Canada.
    pub const CA: Self = Self::define("CA", "A2EUQ1WTGCTBG2", "mws.amazonservices.ca");
    /// Mexico.
    pub const MX: Self = Self::define("MX", "A1AM78C64UM0Y8", "mws.amazonservices.com.mx");
    /// United States.
    pub const US: Self = Self::define("US", "ATVPDKIKX0DER", "mws.amazonservices.com");
    /// United Arab Emirates.
    pub const AE: Self = Self::define("AE", "A2VIGQ35RCS4UG", "mws.amazonservices.ae");
    /// Germany.
    pub const DE: Self = Self::define("DE", "A1PA6795UKMFR9", "mws-eu.amazonservices.com");
    /// Egypt.
    pub const EG: Self = Self::define("EG", "ARBP9OOSHTCHU", "mws-eu.amazonservices.com");
    /// Spain.
    pub const ES: Self = Self::define("ES", "A1RKKUPIHCS9HS", "mws-eu.amazonservices.com");
    /// France.
    pub const FR: Self = Self::define("FR", "A13V1IB3VIYZZH", "mws-eu.amazonservices.com");
    /// United Kingdom.
    pub const GB: Self = Self::define("GB", "A1F83G8C2ARO7P", "mws-eu.amazonservices.com");
    /// India.
    pub const IN: Self = Self::define("IN", "A21TJRUUN4KGTP", "mws.amazonservices.in");
    /// Italy.
    pub const IT: Self = Self::define("IT", "APJ6JRA9NG5V4", "mws-eu.amazonservices.com");
    /// Netherlands.
    pub const NL: Self = Self::define("NL", "A1805IZSGTT6HS", "mws-eu.amazonservices.com");
    /// Saudi Arabia.
    pub const SA: Self = Self::define("SA", "A17E79C6D8DWNP", "mws-eu.amazonservices.com");
    /// Turkey.
    pub const TR: Self = Self::define("TR", "A33AVAJ2PDY3EV", "mws-eu.amazonservices.com");
    /// Singapore.
    pub const SG: Self = Self::define("SG", "A19VAU5U5O7RUS", "mws-fe.amazonservices.com");
    /// Australia.
    pub const AU: Self = Self::define("AU", "A39IBJ37TRP1C6", "mws.amazonservices.com.au");
    /// Japan.
    pub const JP: Self = Self::define("JP", "A1VC38T7YXB528", "mws.amazonservices.jp");

    const ALL: [Self; 18] = [
        Self::BR,
        Self::CA,
        Self::MX,
        Self::US,
        Self::AE,
        Self::DE,
        Self::EG,
        Self::ES,
        Self::FR,
        Self::GB,
        Self::IN,
        Self::IT,
        Self::NL,
        Self::SA,
        Self::TR,
        Self::SG,
        Self::AU,
        Self::JP,
    ];

    const fn define(country_code: &'static str, id: &'static str, host: &'static str) -> Self {
        Self {
            country_code,
            id,
            host,
        }
    }

    /// Returns every known marketplace.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Looks up a marketplace by its MWS marketplace id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.id == id)
    }

    /// Looks up a marketplace by its two-letter country code (case-insensitive).
    ///
    /// `UK` is accepted as an alias for `GB`.
    #[must_use]
    pub fn from_country_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        let code = if code == "UK" { "GB".to_string() } else { code };
        Self::ALL.iter().copied().find(|m| m.country_code == code)
    }

    /// Returns the two-letter country code.
    #[must_use]
    pub const fn country_code(&self) -> &'static str {
        self.country_code
    }

    /// Returns the marketplace id sent as `MarketplaceId`.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the MWS endpoint host for this marketplace.
    #[must_use]
    pub const fn host(&self) -> &'static str {
        self.host
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.country_code, self.id)
    }
}

impl FromStr for Marketplace {
    type Err = ConfigError;

    /// Parses either a country code or a marketplace id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_country_code(s)
            .or_else(|| Self::from_id(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMarketplace {
                marketplace: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_country_code_is_case_insensitive() {
        assert_eq!(Marketplace::from_country_code("us"), Some(Marketplace::US));
        assert_eq!(Marketplace::from_country_code("JP"), Some(Marketplace::JP));
        assert_eq!(Marketplace::from_country_code("uk"), Some(Marketplace::GB));
        assert_eq!(Marketplace::from_country_code("ZZ"), None);
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(
            Marketplace::from_id("A2EUQ1WTGCTBG2"),
            Some(Marketplace::CA)
        );
        assert_eq!(Marketplace::from_id("nope"), None);
    }

    #[test]
    fn test_from_str_accepts_code_or_id() {
        assert_eq!("fr".parse::<Marketplace>().unwrap(), Marketplace::FR);
        assert_eq!(
            "ATVPDKIKX0DER".parse::<Marketplace>().unwrap(),
            Marketplace::US
        );
        assert!(matches!(
            "Atlantis".parse::<Marketplace>(),
            Err(ConfigError::UnknownMarketplace { .. })
        ));
    }

    #[test]
    fn test_marketplace_ids_are_unique() {
        let ids: HashSet<_> = Marketplace::all().iter().map(Marketplace::id).collect();
        assert_eq!(ids.len(), Marketplace::all().len());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Marketplace::CA.to_string(), "CA (A2EUQ1WTGCTBG2)");
    }
}
