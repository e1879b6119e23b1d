//! # MWS API Rust SDK
//!
//! A Rust SDK for the Amazon Marketplace Web Service (MWS) API, providing
//! type-safe configuration, request signing, throttling-aware retries and
//! schema-checked response decoding.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`MwsConfig`] and [`MwsConfigBuilder`]
//! - Validated newtypes for credentials and the [`Marketplace`] catalogue
//! - Canonical parameter serialization and Signature Version 2 signing
//! - An async gateway ([`HttpClient`]) with retry and backoff under throttling
//! - Response metadata (request id, quota) on every call via [`RequestMeta`]
//! - Typed domain sections reachable through [`Mws`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mws_api::{AwsAccessKeyId, Marketplace, Mws, MwsConfig, SecretKey, SellerId};
//!
//! let config = MwsConfig::builder()
//!     .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
//!     .secret_key(SecretKey::new("your-secret-key").unwrap())
//!     .seller_id(SellerId::new("A1SELLER").unwrap())
//!     .marketplace(Marketplace::CA)
//!     .build()
//!     .unwrap();
//!
//! let mws = Mws::new(&config);
//! ```
//!
//! ## Making Calls
//!
//! Every section method returns the decoded result together with the
//! metadata of the final attempt:
//!
//! ```rust,ignore
//! let (participations, meta) = mws.sellers().list_marketplace_participations().await?;
//! for marketplace in &participations.list_marketplaces {
//!     println!("{} ({})", marketplace.name, marketplace.marketplace_id);
//! }
//! println!("quota remaining: {:?}", meta.quota_remaining);
//! ```
//!
//! ## Retry and Throttling
//!
//! Throttled and transiently failing requests are resent with backoff under
//! a [`RetryPolicy`]. Client errors are returned immediately:
//!
//! ```rust
//! use std::time::Duration;
//! use mws_api::{AwsAccessKeyId, Backoff, Marketplace, MwsConfig, RetryPolicy, SecretKey, SellerId};
//!
//! let config = MwsConfig::builder()
//!     .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
//!     .secret_key(SecretKey::new("your-secret-key").unwrap())
//!     .seller_id(SellerId::new("A1SELLER").unwrap())
//!     .marketplace(Marketplace::US)
//!     .retry_policy(
//!         RetryPolicy::default()
//!             .max_attempts(6)
//!             .initial_backoff(Duration::from_millis(500))
//!             .backoff(Backoff::Exponential),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry_policy().attempt_limit(), 6);
//! ```
//!
//! ## Lower-level Access
//!
//! Actions without a typed section can be called through the gateway
//! directly, decoding into a raw [`serde_json::Value`]:
//!
//! ```rust,ignore
//! use mws_api::clients::{HttpMethod, RequestSpec, Resource};
//! use serde_json::Value;
//!
//! let spec = RequestSpec::new(Resource::Orders, "2013-09-01", "ListOrders")
//!     .parameter("MarketplaceId.Id", vec!["ATVPDKIKX0DER"])
//!     .parameter("CreatedAfter", created_after);
//! let (orders, meta): (Value, _) = mws.client().request(HttpMethod::Post, spec).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
mod mws;
pub mod parsing;
pub mod sections;

// Re-export public types at crate root for convenience
pub use config::{
    AwsAccessKeyId, HostUrl, Marketplace, MwsAuthToken, MwsConfig, MwsConfigBuilder, SecretKey,
    SellerId,
};
pub use error::ConfigError;
pub use mws::Mws;

// Re-export gateway types
pub use clients::{
    Backoff, GatewayError, HttpClient, HttpMethod, RequestMeta, RequestSpec, Resource,
    ResponseError, RetryPolicy, ThrottledError, TransportError,
};
pub use parsing::ParsingError;
