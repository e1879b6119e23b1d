//! Request description types for the MWS gateway.
//!
//! A domain section describes each call with a [`RequestSpec`]: which
//! [`Resource`] and API version it targets, the action name, and the logical
//! [`Parameters`]. The gateway consumes each `RequestSpec` exactly once.

use std::fmt;

use crate::clients::parameters::{ParameterValue, Parameters};

/// HTTP methods accepted by MWS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in a form-encoded body.
    Post,
}

impl HttpMethod {
    /// Returns the method name as it appears in the string to sign.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An MWS API section, which determines the request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Easy Ship.
    EasyShip,
    /// Feeds (served from `/`).
    Feeds,
    /// Finances.
    Finances,
    /// Fulfillment Inbound Shipment.
    FulfillmentInboundShipment,
    /// Fulfillment Inventory.
    FulfillmentInventory,
    /// Fulfillment Outbound Shipment.
    FulfillmentOutboundShipment,
    /// Merchant Fulfillment.
    MerchantFulfillment,
    /// Orders.
    Orders,
    /// Products.
    Products,
    /// Recommendations.
    Recommendations,
    /// Reports (served from `/`).
    Reports,
    /// Sellers.
    Sellers,
    /// Shipment Invoicing.
    ShipmentInvoicing,
    /// Subscriptions.
    Subscriptions,
}

impl Resource {
    /// Returns the resource name used in request paths.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EasyShip => "EasyShip",
            Self::Feeds => "Feeds",
            Self::Finances => "Finances",
            Self::FulfillmentInboundShipment => "FulfillmentInboundShipment",
            Self::FulfillmentInventory => "FulfillmentInventory",
            Self::FulfillmentOutboundShipment => "FulfillmentOutboundShipment",
            Self::MerchantFulfillment => "MerchantFulfillment",
            Self::Orders => "Orders",
            Self::Products => "Products",
            Self::Recommendations => "Recommendations",
            Self::Reports => "Reports",
            Self::Sellers => "Sellers",
            Self::ShipmentInvoicing => "ShipmentInvoicing",
            Self::Subscriptions => "Subscriptions",
        }
    }

    /// Returns the request path for this resource at `version`.
    ///
    /// ```rust
    /// use mws_api::clients::Resource;
    ///
    /// assert_eq!(Resource::Sellers.path("2011-07-01"), "/Sellers/2011-07-01");
    /// assert_eq!(Resource::Reports.path("2009-01-01"), "/");
    /// ```
    #[must_use]
    pub fn path(&self, version: &str) -> String {
        match self {
            Self::Feeds | Self::Reports => "/".to_string(),
            other => format!("/{}/{version}", other.name()),
        }
    }

    /// Returns the parameter name that carries the seller id.
    #[must_use]
    pub const fn seller_id_parameter(&self) -> &'static str {
        match self {
            Self::Feeds | Self::Reports => "Merchant",
            _ => "SellerId",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes one MWS call.
///
/// # Example
///
/// ```rust
/// use mws_api::clients::{RequestSpec, Resource};
///
/// let spec = RequestSpec::new(Resource::Sellers, "2011-07-01", "ListMarketplaceParticipations")
///     .parameter("MarketplaceId", "A2EUQ1WTGCTBG2");
///
/// assert_eq!(spec.action(), "ListMarketplaceParticipations");
/// assert_eq!(spec.parameters().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    resource: Resource,
    version: String,
    action: String,
    parameters: Parameters,
}

impl RequestSpec {
    /// Creates a spec with no parameters.
    #[must_use]
    pub fn new(resource: Resource, version: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource,
            version: version.into(),
            action: action.into(),
            parameters: Parameters::new(),
        }
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn parameters_from(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Adds a single parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    /// Returns the resource.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }

    /// Returns the API version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the action name.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the logical parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
