//! The Sellers section: which marketplaces a seller participates in.

use std::sync::Arc;

use serde_json::Value;

use crate::closed_enum;
use crate::clients::{GatewayError, HttpClient, HttpMethod, RequestMeta, RequestSpec, Resource};
use crate::parsing::{Decode, FieldPath, Fields, ParsingError};
use crate::sections::shared::{get_service_status, ServiceStatusResponse};

/// API version of the Sellers section.
pub const SELLERS_API_VERSION: &str = "2011-07-01";

closed_enum! {
    /// Whether a seller has suspended listings in a marketplace.
    pub enum HasSellerSuspendedListings {
        /// Some listings are suspended.
        Yes => "Yes",
        /// No listings are suspended.
        No => "No",
    }
}

/// A seller's participation in one marketplace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participation {
    /// The marketplace id.
    pub marketplace_id: String,
    /// The seller id.
    pub seller_id: String,
    /// Whether the seller has suspended listings there.
    pub has_seller_suspended_listings: HasSellerSuspendedListings,
}

impl Decode for Participation {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            marketplace_id: fields.required("MarketplaceId")?,
            seller_id: fields.required("SellerId")?,
            has_seller_suspended_listings: fields.required("HasSellerSuspendedListings")?,
        })
    }
}

/// A marketplace the seller can sell in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketplaceInfo {
    /// The marketplace id.
    pub marketplace_id: String,
    /// Display name, e.g. `Amazon.ca`.
    pub name: String,
    /// Two-letter country code.
    pub default_country_code: String,
    /// ISO 4217 currency code.
    pub default_currency_code: String,
    /// Locale, e.g. `en_CA`.
    pub default_language_code: String,
    /// Storefront domain.
    pub domain_name: String,
}

impl Decode for MarketplaceInfo {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            marketplace_id: fields.required("MarketplaceId")?,
            name: fields.required("Name")?,
            default_country_code: fields.required("DefaultCountryCode")?,
            default_currency_code: fields.required("DefaultCurrencyCode")?,
            default_language_code: fields.required("DefaultLanguageCode")?,
            domain_name: fields.required("DomainName")?,
        })
    }
}

/// Result of `ListMarketplaceParticipations` and its `ByNextToken` variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketplaceParticipations {
    /// Token for the next page, if there is one.
    pub next_token: Option<String>,
    /// Marketplaces the seller participates in.
    pub list_participations: Vec<Participation>,
    /// Details of those marketplaces.
    pub list_marketplaces: Vec<MarketplaceInfo>,
}

impl Decode for MarketplaceParticipations {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            next_token: fields.optional("NextToken")?,
            list_participations: fields.list("ListParticipations", "Participation")?,
            list_marketplaces: fields.list("ListMarketplaces", "Marketplace")?,
        })
    }
}

/// Client for the Sellers section.
#[derive(Clone, Debug)]
pub struct Sellers {
    client: Arc<HttpClient>,
}

impl Sellers {
    /// Creates the section over a shared gateway.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Lists the marketplaces the seller participates in.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn list_marketplace_participations(
        &self,
    ) -> Result<(MarketplaceParticipations, RequestMeta), GatewayError> {
        self.client
            .request(
                HttpMethod::Post,
                RequestSpec::new(
                    Resource::Sellers,
                    SELLERS_API_VERSION,
                    "ListMarketplaceParticipations",
                ),
            )
            .await
    }

    /// Fetches the next page of participations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn list_marketplace_participations_by_next_token(
        &self,
        next_token: &str,
    ) -> Result<(MarketplaceParticipations, RequestMeta), GatewayError> {
        self.client
            .request(
                HttpMethod::Post,
                RequestSpec::new(
                    Resource::Sellers,
                    SELLERS_API_VERSION,
                    "ListMarketplaceParticipationsByNextToken",
                )
                .parameter("NextToken", next_token),
            )
            .await
    }

    /// Returns the operational status of the Sellers section.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_service_status(
        &self,
    ) -> Result<(ServiceStatusResponse, RequestMeta), GatewayError> {
        get_service_status(&self.client, Resource::Sellers, SELLERS_API_VERSION).await
    }
}
