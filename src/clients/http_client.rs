//! The MWS request gateway.
//!
//! This module provides [`HttpClient`], the single entry point that domain
//! sections use to execute a [`RequestSpec`]. One call runs the whole
//! pipeline exactly once:
//!
//! 1. canonicalize the logical parameters
//! 2. inject credentials, timestamp and signature
//! 3. send under the retry governor
//! 4. read [`RequestMeta`] from the final response's headers
//! 5. parse the XML body and unwrap the `<Action>Response`/`<Action>Result` envelope
//! 6. decode the payload into the caller's type

use std::sync::Arc;

use crate::auth::{Clock, Credentials, Signer, SystemClock};
use crate::clients::errors::GatewayError;
use crate::clients::governor::Governor;
use crate::clients::http_request::{HttpMethod, RequestSpec};
use crate::clients::http_response::RequestMeta;
use crate::clients::parameters::canonicalize;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::MwsConfig;
use crate::parsing::{decode_envelope, xml, Decode};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gateway for signed, governed and decoded MWS calls.
///
/// The client handles:
/// - Canonical parameter serialization
/// - Signature Version 2 signing against the configured host
/// - Retry with backoff on throttling and transient failures
/// - Response metadata and envelope decoding
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Concurrent calls are independent: each has
/// its own signature, timestamp and retry state.
///
/// # Example
///
/// ```rust
/// use mws_api::{AwsAccessKeyId, HttpClient, Marketplace, MwsConfig, SecretKey, SellerId};
///
/// let config = MwsConfig::builder()
///     .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
///     .secret_key(SecretKey::new("secret").unwrap())
///     .seller_id(SellerId::new("A1SELLER").unwrap())
///     .marketplace(Marketplace::CA)
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config);
/// assert_eq!(client.host(), "mws.amazonservices.ca");
/// ```
#[derive(Debug)]
pub struct HttpClient {
    signer: Signer,
    transport: Arc<dyn Transport>,
    governor: Governor,
    /// Host the signature is computed for (`host[:port]`).
    host: String,
    /// `scheme://host[:port]` prefix for request URLs.
    base_url: String,
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a gateway that talks to MWS over the network.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &MwsConfig) -> Self {
        Self::with_transport(
            config,
            Arc::new(ReqwestTransport::new(config.timeout())),
            Arc::new(SystemClock),
        )
    }

    /// Creates a gateway with an explicit transport and clock.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use mws_api::auth::SystemClock;
    /// use mws_api::clients::{HttpClient, ScriptedTransport};
    /// # use mws_api::{AwsAccessKeyId, Marketplace, MwsConfig, SecretKey, SellerId};
    /// # let config = MwsConfig::builder()
    /// #     .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
    /// #     .secret_key(SecretKey::new("secret").unwrap())
    /// #     .seller_id(SellerId::new("A1SELLER").unwrap())
    /// #     .marketplace(Marketplace::US)
    /// #     .build()
    /// #     .unwrap();
    ///
    /// let client = HttpClient::with_transport(
    ///     &config,
    ///     Arc::new(ScriptedTransport::new()),
    ///     Arc::new(SystemClock),
    /// );
    /// assert!(client.user_agent().contains("Language=Rust"));
    /// ```
    #[must_use]
    pub fn with_transport(
        config: &MwsConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}MWS API Library v{SDK_VERSION} (Language=Rust; Version={rust_version})"
        );

        Self {
            signer: Signer::new(Credentials::from_config(config), clock),
            transport,
            governor: Governor::new(config.retry_policy().clone()),
            host: config.endpoint_host().to_ascii_lowercase(),
            base_url: config.base_url(),
            user_agent,
        }
    }

    /// Returns the host requests are signed for.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Executes `spec` and decodes the result payload into `T`.
    ///
    /// The request is signed once; retries resend the identical signed
    /// request. [`RequestMeta`] always describes the final attempt.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if:
    /// - A parameter cannot be canonicalized (`Canonicalization`)
    /// - A parameter collides with an injected field (`Signing`)
    /// - The vendor rejects the request (`Response`)
    /// - Throttling or transient failures outlast the retry policy
    ///   (`Throttled`, `Transport`)
    /// - The response body does not match `T` (`Parsing`)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use mws_api::clients::{HttpMethod, RequestSpec, Resource};
    /// use serde_json::Value;
    ///
    /// let spec = RequestSpec::new(Resource::Sellers, "2011-07-01", "GetServiceStatus");
    /// let (payload, meta): (Value, _) = client.request(HttpMethod::Post, spec).await?;
    /// println!("{payload} (quota left: {:?})", meta.quota_remaining);
    /// ```
    pub async fn request<T: Decode>(
        &self,
        method: HttpMethod,
        spec: RequestSpec,
    ) -> Result<(T, RequestMeta), GatewayError> {
        let canonical = canonicalize(spec.parameters())?;
        let signed = self.signer.sign(method, &self.host, &spec, canonical)?;
        let wire = signed.to_wire_request(&self.base_url, &self.user_agent);

        let response = self
            .governor
            .execute(self.transport.as_ref(), &wire, spec.action())
            .await?;

        let meta = RequestMeta::from_response(&response);
        if meta.quota_exhausted() {
            tracing::warn!(
                action = spec.action(),
                resets_on = ?meta.quota_resets_on,
                "MWS quota exhausted"
            );
        }

        let document = xml::parse_document(&response.body)?;
        let payload = decode_envelope(spec.action(), &document)?;
        Ok((payload, meta))
    }
}
