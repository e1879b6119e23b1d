//! Error types for MWS gateway calls.
//!
//! Every failure of [`HttpClient::request`](crate::clients::HttpClient::request)
//! is one of these kinds:
//!
//! - [`CanonicalizationError`]: the logical parameters cannot be flattened
//! - [`SigningError`]: the canonical parameters cannot be signed
//! - [`TransportError`]: the network or the server kept failing
//! - [`ThrottledError`]: the vendor kept throttling until the attempt bound
//! - [`ResponseError`]: the vendor rejected the request (never retried)
//! - [`ParsingError`]: a 2xx body did not have the expected shape
//!
//! [`GatewayError`] unifies them.
//!
//! # Example
//!
//! ```rust,ignore
//! use mws_api::clients::GatewayError;
//!
//! match mws.sellers().get_service_status().await {
//!     Ok((status, meta)) => println!("{:?} (request {:?})", status.status, meta.request_id),
//!     Err(GatewayError::Throttled(e)) => println!("throttled after {} attempts", e.attempts),
//!     Err(GatewayError::Parsing(e)) => println!("unexpected response at {}", e.path),
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::SigningError;
use crate::clients::http_response::{ErrorResponse, WireResponse, REQUEST_ID_HEADER};
use crate::clients::parameters::CanonicalizationError;
use crate::parsing::ParsingError;

/// The server or network kept failing until the attempt bound was reached.
///
/// # Example
///
/// ```rust
/// use mws_api::clients::TransportError;
///
/// let error = TransportError {
///     attempts: 4,
///     status: Some(503),
///     error_code: None,
///     message: "server returned HTTP 503".to_string(),
///     request_id: None,
/// };
///
/// assert_eq!(
///     error.to_string(),
///     "Request failed after 4 attempts: server returned HTTP 503"
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Request failed after {attempts} attempts: {message}")]
pub struct TransportError {
    /// The number of attempts made.
    pub attempts: u32,
    /// The status of the last response, if one arrived.
    pub status: Option<u16>,
    /// The vendor error code of the last response, if any.
    pub error_code: Option<String>,
    /// A description of the last failure.
    pub message: String,
    /// The request id of the last response, if any.
    pub request_id: Option<String>,
}

/// The vendor was still throttling after the last attempt.
///
/// # Example
///
/// ```rust
/// use mws_api::clients::ThrottledError;
///
/// let error = ThrottledError {
///     attempts: 4,
///     status: 503,
///     error_code: Some("RequestThrottled".to_string()),
///     message: Some("Request is throttled".to_string()),
///     request_id: None,
/// };
///
/// assert!(error.to_string().contains("throttled after 4 attempts"));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Request throttled after {attempts} attempts (HTTP {status}{})", describe_code(.error_code.as_deref()))]
pub struct ThrottledError {
    /// The number of attempts made.
    pub attempts: u32,
    /// The status of the last response.
    pub status: u16,
    /// The vendor error code, usually `RequestThrottled` or `QuotaExceeded`.
    pub error_code: Option<String>,
    /// The vendor message.
    pub message: Option<String>,
    /// The request id of the last response.
    pub request_id: Option<String>,
}

/// The vendor rejected the request.
///
/// # Example
///
/// ```rust
/// use mws_api::clients::ResponseError;
///
/// let error = ResponseError {
///     status: 400,
///     error_type: Some("Sender".to_string()),
///     error_code: Some("InvalidParameterValue".to_string()),
///     message: "Invalid marketplace".to_string(),
///     request_id: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(
///     error.to_string(),
///     "MWS returned HTTP 400 InvalidParameterValue: Invalid marketplace"
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("MWS returned HTTP {status}{}: {message}", describe_code(.error_code.as_deref()))]
pub struct ResponseError {
    /// The HTTP status code.
    pub status: u16,
    /// `Sender` or `Server`, from the error document.
    pub error_type: Option<String>,
    /// The vendor error code.
    pub error_code: Option<String>,
    /// The vendor message, or the raw body if no error document was found.
    pub message: String,
    /// The request id, from the body or the `x-mws-request-id` header.
    pub request_id: Option<String>,
}

impl ResponseError {
    /// Builds an error from a rejected response and its parsed error document.
    #[must_use]
    pub fn new(response: &WireResponse, error: Option<ErrorResponse>) -> Self {
        let header_request_id = response.header(REQUEST_ID_HEADER).map(String::from);
        match error {
            Some(error) => Self {
                status: response.status,
                error_type: error.error_type,
                error_code: Some(error.code),
                message: error.message.unwrap_or_default(),
                request_id: error.request_id.or(header_request_id),
            },
            None => Self {
                status: response.status,
                error_type: None,
                error_code: None,
                message: response.body.trim().to_string(),
                request_id: header_request_id,
            },
        }
    }
}

fn describe_code(code: Option<&str>) -> String {
    code.map(|c| format!(" {c}")).unwrap_or_default()
}

/// Unified error type for gateway calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The parameters could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// The request could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The network or server failed on every attempt.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The vendor throttled every attempt.
    #[error(transparent)]
    Throttled(#[from] ThrottledError),

    /// The vendor rejected the request.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// A successful body had an unexpected shape.
    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl GatewayError {
    /// Returns the request id reported with the failure, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Transport(e) => e.request_id.as_deref(),
            Self::Throttled(e) => e.request_id.as_deref(),
            Self::Response(e) => e.request_id.as_deref(),
            Self::Canonicalization(_) | Self::Signing(_) | Self::Parsing(_) => None,
        }
    }
}
