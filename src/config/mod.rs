//! Configuration types for the MWS API SDK.
//!
//! This module provides the configuration used to initialize the gateway:
//! the long-lived credentials that sign every request, the marketplace
//! whose endpoint is called, and the retry policy.
//!
//! # Overview
//!
//! - [`MwsConfig`]: The main configuration struct holding all SDK settings
//! - [`MwsConfigBuilder`]: A builder for constructing [`MwsConfig`] instances
//! - [`AwsAccessKeyId`], [`SecretKey`], [`SellerId`], [`MwsAuthToken`]: validated credentials
//! - [`HostUrl`]: An endpoint override (proxies, local test servers)
//! - [`Marketplace`]: The marketplace catalogue
//!
//! # Example
//!
//! ```rust
//! use mws_api::{MwsConfig, AwsAccessKeyId, SecretKey, SellerId, Marketplace};
//!
//! let config = MwsConfig::builder()
//!     .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
//!     .secret_key(SecretKey::new("my-secret").unwrap())
//!     .seller_id(SellerId::new("A1SELLER").unwrap())
//!     .marketplace(Marketplace::CA)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint_host(), "mws.amazonservices.ca");
//! ```

mod marketplace;
mod newtypes;

pub use marketplace::Marketplace;
pub use newtypes::{AwsAccessKeyId, HostUrl, MwsAuthToken, SecretKey, SellerId};

use std::time::Duration;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Configuration for the MWS API SDK.
///
/// # Thread Safety
///
/// `MwsConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct MwsConfig {
    aws_access_key_id: AwsAccessKeyId,
    secret_key: SecretKey,
    seller_id: SellerId,
    mws_auth_token: Option<MwsAuthToken>,
    marketplace: Marketplace,
    endpoint: Option<HostUrl>,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl MwsConfig {
    /// Creates a new builder for constructing an `MwsConfig`.
    #[must_use]
    pub fn builder() -> MwsConfigBuilder {
        MwsConfigBuilder::new()
    }

    /// Returns the AWS access key id.
    #[must_use]
    pub const fn aws_access_key_id(&self) -> &AwsAccessKeyId {
        &self.aws_access_key_id
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the seller id.
    #[must_use]
    pub const fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    /// Returns the delegated auth token, if configured.
    #[must_use]
    pub const fn mws_auth_token(&self) -> Option<&MwsAuthToken> {
        self.mws_auth_token.as_ref()
    }

    /// Returns the marketplace.
    #[must_use]
    pub const fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    /// Returns the endpoint override, if configured.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&HostUrl> {
        self.endpoint.as_ref()
    }

    /// Returns the host that requests are sent to and signed for.
    ///
    /// This is the endpoint override's `host[:port]` when set, otherwise the
    /// marketplace's MWS host.
    #[must_use]
    pub fn endpoint_host(&self) -> &str {
        self.endpoint
            .as_ref()
            .map_or(self.marketplace.host(), HostUrl::authority)
    }

    /// Returns the `scheme://host` prefix for request URLs.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.endpoint.as_ref().map_or_else(
            || format!("https://{}", self.marketplace.host()),
            HostUrl::base_url,
        )
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the per-attempt timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify MwsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MwsConfig>();
};

/// Builder for constructing [`MwsConfig`] instances.
///
/// Required fields are `aws_access_key_id`, `secret_key`, `seller_id` and
/// `marketplace`.
///
/// # Defaults
///
/// - `mws_auth_token`: `None`
/// - `endpoint`: `None` (the marketplace host is used)
/// - `retry_policy`: [`RetryPolicy::default`]
/// - `timeout`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct MwsConfigBuilder {
    aws_access_key_id: Option<AwsAccessKeyId>,
    secret_key: Option<SecretKey>,
    seller_id: Option<SellerId>,
    mws_auth_token: Option<MwsAuthToken>,
    marketplace: Option<Marketplace>,
    endpoint: Option<HostUrl>,
    retry_policy: Option<RetryPolicy>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl MwsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AWS access key id (required).
    #[must_use]
    pub fn aws_access_key_id(mut self, key: AwsAccessKeyId) -> Self {
        self.aws_access_key_id = Some(key);
        self
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Sets the seller id (required).
    #[must_use]
    pub fn seller_id(mut self, seller_id: SellerId) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    /// Sets the delegated auth token.
    #[must_use]
    pub fn mws_auth_token(mut self, token: MwsAuthToken) -> Self {
        self.mws_auth_token = Some(token);
        self
    }

    /// Sets the marketplace (required).
    #[must_use]
    pub const fn marketplace(mut self, marketplace: Marketplace) -> Self {
        self.marketplace = Some(marketplace);
        self
    }

    /// Overrides the endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(mut self, endpoint: HostUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets a timeout applied to each individual attempt.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MwsConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a required field is
    /// not set, or [`ConfigError::InvalidRetryPolicy`] if the retry policy
    /// allows no attempts.
    pub fn build(self) -> Result<MwsConfig, ConfigError> {
        let aws_access_key_id = self
            .aws_access_key_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "aws_access_key_id",
            })?;
        let secret_key = self
            .secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "secret_key",
            })?;
        let seller_id = self
            .seller_id
            .ok_or(ConfigError::MissingRequiredField { field: "seller_id" })?;
        let marketplace = self
            .marketplace
            .ok_or(ConfigError::MissingRequiredField {
                field: "marketplace",
            })?;

        let retry_policy = self.retry_policy.unwrap_or_default();
        retry_policy.validate()?;

        Ok(MwsConfig {
            aws_access_key_id,
            secret_key,
            seller_id,
            mws_auth_token: self.mws_auth_token,
            marketplace,
            endpoint: self.endpoint,
            retry_policy,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
