//! The composing MWS client.

use std::sync::{Arc, OnceLock};

use crate::clients::HttpClient;
use crate::config::MwsConfig;
use crate::sections::{FulfillmentInboundShipment, Sellers, Subscriptions};

/// Entry point to every MWS section.
///
/// Each section is constructed on first access and cached for the lifetime
/// of the client; all sections share one [`HttpClient`].
///
/// # Example
///
/// ```rust
/// use mws_api::{AwsAccessKeyId, Marketplace, Mws, MwsConfig, SecretKey, SellerId};
///
/// let config = MwsConfig::builder()
///     .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
///     .secret_key(SecretKey::new("secret").unwrap())
///     .seller_id(SellerId::new("A1SELLER").unwrap())
///     .marketplace(Marketplace::US)
///     .build()
///     .unwrap();
///
/// let mws = Mws::new(&config);
/// let sellers = mws.sellers();
/// assert!(std::ptr::eq(sellers, mws.sellers()));
/// ```
#[derive(Debug)]
pub struct Mws {
    client: Arc<HttpClient>,
    sellers: OnceLock<Sellers>,
    subscriptions: OnceLock<Subscriptions>,
    fulfillment_inbound_shipment: OnceLock<FulfillmentInboundShipment>,
}

// Verify Mws is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Mws>();
};

impl Mws {
    /// Creates a client that talks to MWS over the network.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn new(config: &MwsConfig) -> Self {
        Self::from_client(Arc::new(HttpClient::new(config)))
    }

    /// Creates a client over an existing gateway.
    #[must_use]
    pub const fn from_client(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            sellers: OnceLock::new(),
            subscriptions: OnceLock::new(),
            fulfillment_inbound_shipment: OnceLock::new(),
        }
    }

    /// Returns the shared gateway.
    #[must_use]
    pub const fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    /// The Sellers section.
    pub fn sellers(&self) -> &Sellers {
        self.sellers
            .get_or_init(|| Sellers::new(Arc::clone(&self.client)))
    }

    /// The Subscriptions section.
    pub fn subscriptions(&self) -> &Subscriptions {
        self.subscriptions
            .get_or_init(|| Subscriptions::new(Arc::clone(&self.client)))
    }

    /// The Fulfillment Inbound Shipment section.
    pub fn fulfillment_inbound_shipment(&self) -> &FulfillmentInboundShipment {
        self.fulfillment_inbound_shipment
            .get_or_init(|| FulfillmentInboundShipment::new(Arc::clone(&self.client)))
    }
}
