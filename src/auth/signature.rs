//! Signature Version 2 request signing.
//!
//! The string to sign is
//!
//! ```text
//! METHOD\nhost\npath\nKey1=Value1&Key2=Value2…
//! ```
//!
//! with parameters sorted by key and both keys and values percent-encoded
//! per RFC 3986 (only `A-Z a-z 0-9 - _ . ~` are left as-is). The HmacSHA256
//! digest of that string, base64-encoded, is appended as `Signature`.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::auth::{Clock, Credentials};
use crate::clients::parameters::{format_timestamp, CanonicalParameters};
use crate::clients::{HttpMethod, RequestSpec, WireRequest};

type HmacSha256 = Hmac<Sha256>;

/// Value of the `SignatureMethod` parameter.
pub const SIGNATURE_METHOD: &str = "HmacSHA256";

/// Value of the `SignatureVersion` parameter.
pub const SIGNATURE_VERSION: &str = "2";

const SIGNATURE_PARAMETER: &str = "Signature";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Signing failed. These errors are fatal and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// A logical parameter collides with a field the signer injects.
    #[error("Parameter '{key}' is reserved for request authentication and cannot be set by callers.")]
    ReservedParameter {
        /// The colliding key.
        key: String,
    },

    /// The secret key was rejected by the HMAC implementation.
    #[error("The secret key cannot be used as an HmacSHA256 key.")]
    InvalidKey,
}

/// Percent-encodes a key or value the way MWS expects.
///
/// ```rust
/// use mws_api::auth::percent_encode;
///
/// assert_eq!(percent_encode("a b/c~d"), "a%20b%2Fc~d");
/// assert_eq!(percent_encode("2020-05-06T09:22:23.000Z"), "2020-05-06T09%3A22%3A23.000Z");
/// ```
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Computes a base64-encoded HmacSHA256 signature.
///
/// # Errors
///
/// Returns [`SigningError::InvalidKey`] if the key is rejected.
///
/// # Example
///
/// ```rust
/// use mws_api::auth::compute_signature_base64;
///
/// let sig = compute_signature_base64(b"The quick brown fox jumps over the lazy dog", "key").unwrap();
/// assert_eq!(sig, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
/// ```
pub fn compute_signature_base64(message: &[u8], secret: &str) -> Result<String, SigningError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
    mac.update(message);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Joins sorted parameters into `k=v&k=v` with both sides percent-encoded.
fn encode_sorted(parameters: &BTreeMap<String, String>) -> String {
    parameters
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Signs requests with a fixed identity and clock.
#[derive(Clone, Debug)]
pub struct Signer {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl Signer {
    /// Creates a signer.
    #[must_use]
    pub fn new(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, clock }
    }

    /// Returns the credentials this signer uses.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Injects the authentication fields into `canonical` and signs the result.
    ///
    /// This must be the last mutation before transport: any change to the
    /// returned parameters invalidates the signature.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::ReservedParameter`] if `canonical` already holds
    /// one of the injected keys, or [`SigningError::InvalidKey`] if the secret
    /// key is rejected.
    pub fn sign(
        &self,
        method: HttpMethod,
        host: &str,
        spec: &RequestSpec,
        canonical: CanonicalParameters,
    ) -> Result<SignedRequest, SigningError> {
        let resource = spec.resource();
        let mut auth = vec![
            ("AWSAccessKeyId", self.credentials.aws_access_key_id().as_ref().to_string()),
            ("Action", spec.action().to_string()),
            (resource.seller_id_parameter(), self.credentials.seller_id().as_ref().to_string()),
            ("SignatureMethod", SIGNATURE_METHOD.to_string()),
            ("SignatureVersion", SIGNATURE_VERSION.to_string()),
            ("Timestamp", format_timestamp(&self.clock.now())),
            ("Version", spec.version().to_string()),
        ];
        if let Some(token) = self.credentials.mws_auth_token() {
            auth.push(("MWSAuthToken", token.as_ref().to_string()));
        }

        let reserved = auth
            .iter()
            .map(|(key, _)| *key)
            .chain(std::iter::once(SIGNATURE_PARAMETER));
        for key in reserved {
            if canonical.contains_key(key) {
                return Err(SigningError::ReservedParameter {
                    key: key.to_string(),
                });
            }
        }

        let mut parameters = canonical.into_inner();
        for (key, value) in auth {
            parameters.insert(key.to_string(), value);
        }

        let host = host.to_ascii_lowercase();
        let path = resource.path(spec.version());
        let string_to_sign = format!(
            "{}\n{host}\n{path}\n{}",
            method.as_str(),
            encode_sorted(&parameters)
        );
        let signature = compute_signature_base64(
            string_to_sign.as_bytes(),
            self.credentials.secret_key().as_ref(),
        )?;
        parameters.insert(SIGNATURE_PARAMETER.to_string(), signature);

        Ok(SignedRequest {
            method,
            host,
            path,
            parameters,
            string_to_sign,
        })
    }
}

/// A fully signed, immutable request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    method: HttpMethod,
    host: String,
    path: String,
    parameters: BTreeMap<String, String>,
    string_to_sign: String,
}

impl SignedRequest {
    /// Returns the HTTP method that was signed.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the host that was signed.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns every parameter, including `Signature`.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Returns the computed signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        self.parameters
            .get(SIGNATURE_PARAMETER)
            .map_or("", String::as_str)
    }

    /// Returns the exact string that was signed.
    #[must_use]
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// Returns the form-encoded parameters, used as the POST body or GET query.
    #[must_use]
    pub fn encoded_parameters(&self) -> String {
        encode_sorted(&self.parameters)
    }

    /// Renders the outbound request against `base_url` (`scheme://host[:port]`).
    #[must_use]
    pub fn to_wire_request(&self, base_url: &str, user_agent: &str) -> WireRequest {
        let encoded = self.encoded_parameters();
        let mut headers = vec![("User-Agent".to_string(), user_agent.to_string())];

        let (url, body) = match self.method {
            HttpMethod::Get => (format!("{base_url}{}?{encoded}", self.path), None),
            HttpMethod::Post => {
                headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
                (format!("{base_url}{}", self.path), Some(encoded))
            }
        };

        WireRequest {
            method: self.method,
            url,
            headers,
            body,
        }
    }
}
