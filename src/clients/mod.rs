//! The MWS request gateway.
//!
//! This module turns a logical call description into a signed HTTP exchange
//! and a decoded result. It handles parameter canonicalization, retry under
//! throttling, and response metadata.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The gateway that executes a [`RequestSpec`]
//! - [`RequestSpec`]: Resource, version, action and logical [`Parameters`]
//! - [`RequestMeta`]: Request id, timestamp and quota parsed from headers
//! - [`Transport`]: One HTTP exchange ([`ReqwestTransport`], [`ScriptedTransport`])
//! - [`RetryPolicy`]: Attempt bound and backoff for the [`Governor`]
//! - [`GatewayError`]: Unified error type for gateway calls
//!
//! # Example
//!
//! ```rust,ignore
//! use mws_api::clients::{HttpClient, HttpMethod, Parameters, RequestSpec, Resource};
//! use serde_json::Value;
//!
//! let client = HttpClient::new(&config);
//!
//! let spec = RequestSpec::new(Resource::Sellers, "2011-07-01", "ListMarketplaceParticipations");
//! let (payload, meta): (Value, _) = client.request(HttpMethod::Post, spec).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **Throttled** (`RequestThrottled`, `QuotaExceeded`, HTTP 429): retried with backoff
//! - **Server errors** (other 5xx, `InternalError`, `ServiceUnavailable`, network failure):
//!   retried with backoff
//! - **Other errors (4xx)**: returned immediately without retry
//!
//! The default policy allows 4 attempts with exponential backoff starting at
//! 1 second. Configure it via [`MwsConfigBuilder::retry_policy`](crate::MwsConfigBuilder::retry_policy).

mod errors;
pub mod governor;
mod http_client;
mod http_request;
mod http_response;
pub mod parameters;
mod transport;

pub use errors::{GatewayError, ResponseError, ThrottledError, TransportError};
pub use governor::{Backoff, Governor, RetryPolicy};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, RequestSpec, Resource};
pub use http_response::{ErrorResponse, RequestMeta, WireResponse};
pub use parameters::{
    canonicalize, format_timestamp, CanonicalParameters, CanonicalizationError, ParameterValue,
    Parameters,
};
pub use transport::{ReqwestTransport, ScriptedTransport, SendError, Transport, WireRequest};
