//! Domain sections of the MWS API.
//!
//! Each section is a thin layer over the [`HttpClient`](crate::clients::HttpClient)
//! gateway: it knows its resource, API version and actions, maps typed
//! parameters onto the wire names, and decodes typed results. Every call
//! returns the decoded result together with the
//! [`RequestMeta`](crate::clients::RequestMeta) of the final attempt.
//!
//! - [`Sellers`]: marketplace participations
//! - [`Subscriptions`]: notification destinations and subscriptions
//! - [`FulfillmentInboundShipment`]: inbound guidance, prep instructions, shipment
//!   plans, shipments, transport details and preorders
//!
//! Sections are usually reached through [`Mws`](crate::Mws).

pub mod fulfillment_inbound_shipment;
pub mod sellers;
mod shared;
pub mod subscriptions;

pub use fulfillment_inbound_shipment::FulfillmentInboundShipment;
pub use sellers::Sellers;
pub use shared::{ServiceMessage, ServiceStatus, ServiceStatusResponse};
pub use subscriptions::Subscriptions;
