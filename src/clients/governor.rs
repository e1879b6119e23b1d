//! Quota and retry governance for a single logical request.
//!
//! The [`Governor`] wraps repeated [`Transport`] attempts of one signed
//! request. Each attempt's outcome is classified:
//!
//! - **Throttled** (`RequestThrottled`/`QuotaExceeded`, or HTTP 429): back off and resend
//! - **Server error** (other 5xx, `InternalError`, `ServiceUnavailable`, network failure):
//!   back off and resend
//! - **Client error** (any other non-2xx): surfaced immediately, never retried
//!
//! The same rendered request is resent verbatim: its signature and timestamp
//! are not regenerated between attempts. Attempts are strictly sequential,
//! and all retry state lives inside a single [`Governor::execute`] call;
//! concurrent requests never share a retry budget.

use std::time::Duration;

use crate::clients::errors::{GatewayError, ResponseError, ThrottledError, TransportError};
use crate::clients::http_response::{ErrorResponse, WireResponse};
use crate::clients::transport::{SendError, Transport, WireRequest};
use crate::error::ConfigError;

/// Vendor error codes that signal throttling.
pub const THROTTLE_ERROR_CODES: &[&str] = &["RequestThrottled", "QuotaExceeded"];

/// Vendor error codes that signal a transient server-side failure.
pub const SERVER_ERROR_CODES: &[&str] = &["InternalError", "ServiceUnavailable"];

/// How the wait between attempts grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    /// `initial × n` before the n-th retry.
    Linear,
    /// `initial × 2^(n-1)` before the n-th retry.
    Exponential,
}

/// Bounds on retrying a throttled or failing request.
///
/// # Defaults
///
/// - `max_attempts`: 4 (one initial attempt plus three retries)
/// - `initial_backoff`: 1 second
/// - `max_backoff`: 32 seconds
/// - `backoff`: [`Backoff::Exponential`]
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use mws_api::clients::{Backoff, RetryPolicy};
///
/// let policy = RetryPolicy::default()
///     .max_attempts(3)
///     .initial_backoff(Duration::from_millis(500))
///     .backoff(Backoff::Linear);
///
/// assert_eq!(policy.delay_for(1), Duration::from_millis(500));
/// assert_eq!(policy.delay_for(2), Duration::from_secs(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(32),
            backoff: Backoff::Exponential,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    #[must_use]
    pub fn no_retries() -> Self {
        Self::default().max_attempts(1)
    }

    /// Sets the total number of attempts, including the first.
    #[must_use]
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the wait before the first retry.
    #[must_use]
    pub const fn initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay;
        self
    }

    /// Sets the ceiling for any single wait.
    #[must_use]
    pub const fn max_backoff(mut self, delay: Duration) -> Self {
        self.max_backoff = delay;
        self
    }

    /// Sets the growth function.
    #[must_use]
    pub const fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the total number of attempts allowed.
    #[must_use]
    pub const fn attempt_limit(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the wait before the `retry`-th retry (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let retry = retry.max(1);
        let delay = match self.backoff {
            Backoff::Linear => self.initial_backoff.saturating_mul(retry),
            Backoff::Exponential => {
                let factor = 2_u32.checked_pow(retry - 1).unwrap_or(u32::MAX);
                self.initial_backoff.saturating_mul(factor)
            }
        };
        delay.min(self.max_backoff)
    }

    /// Checks that the policy allows at least one attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] if `max_attempts` is zero
    /// or `initial_backoff` exceeds `max_backoff`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "max_attempts must be at least 1".to_string(),
            });
        }
        if self.initial_backoff > self.max_backoff {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "initial_backoff must not exceed max_backoff".to_string(),
            });
        }
        Ok(())
    }
}

/// Classification of one attempt's response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseClass {
    /// 2xx.
    Success,
    /// The vendor asked us to slow down.
    Throttled,
    /// A transient failure on the vendor's side.
    ServerError,
    /// The request itself was rejected.
    ClientError,
}

/// Classifies a response from its status and parsed error document.
#[must_use]
pub fn classify(response: &WireResponse, error: Option<&ErrorResponse>) -> ResponseClass {
    if response.is_success() {
        return ResponseClass::Success;
    }
    let code = error.map(|e| e.code.as_str());
    if response.status == 429 || code.is_some_and(|c| THROTTLE_ERROR_CODES.contains(&c)) {
        return ResponseClass::Throttled;
    }
    if response.status >= 500 || code.is_some_and(|c| SERVER_ERROR_CODES.contains(&c)) {
        return ResponseClass::ServerError;
    }
    ResponseClass::ClientError
}

/// Retry bookkeeping for one logical request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrottleState {
    /// Attempts made so far.
    pub attempts: u32,
    /// Total time spent waiting between attempts.
    pub backoff_elapsed: Duration,
}

enum Failure {
    Throttled(WireResponse, Option<ErrorResponse>),
    Server(WireResponse, Option<ErrorResponse>),
    Network(SendError),
}

impl Failure {
    fn describe(&self) -> String {
        match self {
            Self::Throttled(response, error) | Self::Server(response, error) => error
                .as_ref()
                .map_or_else(
                    || format!("HTTP {}", response.status),
                    |e| format!("HTTP {} {}", response.status, e.code),
                ),
            Self::Network(error) => error.to_string(),
        }
    }

    fn into_error(self, attempts: u32) -> GatewayError {
        match self {
            Self::Throttled(response, error) => GatewayError::Throttled(ThrottledError {
                attempts,
                status: response.status,
                request_id: response_request_id(&response, error.as_ref()),
                error_code: error.as_ref().map(|e| e.code.clone()),
                message: error.and_then(|e| e.message),
            }),
            Self::Server(response, error) => GatewayError::Transport(TransportError {
                attempts,
                status: Some(response.status),
                request_id: response_request_id(&response, error.as_ref()),
                error_code: error.as_ref().map(|e| e.code.clone()),
                message: error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| format!("server returned HTTP {}", response.status)),
            }),
            Self::Network(error) => GatewayError::Transport(TransportError {
                attempts,
                status: None,
                request_id: None,
                error_code: None,
                message: error.to_string(),
            }),
        }
    }
}

fn response_request_id(response: &WireResponse, error: Option<&ErrorResponse>) -> Option<String> {
    error
        .and_then(|e| e.request_id.clone())
        .or_else(|| response.header(crate::clients::http_response::REQUEST_ID_HEADER).map(String::from))
}

/// Runs the attempts of one logical request under a [`RetryPolicy`].
#[derive(Clone, Debug, Default)]
pub struct Governor {
    policy: RetryPolicy,
}

impl Governor {
    /// Creates a governor with `policy`.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in force.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `request` until it succeeds, fails permanently, or the attempt
    /// bound is reached.
    ///
    /// Both the send and the backoff sleep are await points, so dropping the
    /// returned future (or wrapping it in `tokio::time::timeout`) cancels the
    /// request between or during attempts.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Response`] immediately on a client error
    /// - [`GatewayError::Throttled`] if still throttled after the last attempt
    /// - [`GatewayError::Transport`] if the server or network still fails
    ///   after the last attempt
    pub async fn execute(
        &self,
        transport: &dyn Transport,
        request: &WireRequest,
        action: &str,
    ) -> Result<WireResponse, GatewayError> {
        let mut state = ThrottleState::default();

        loop {
            state.attempts += 1;

            let failure = match transport.send(request).await {
                Ok(response) => {
                    if response.is_success() {
                        tracing::debug!(
                            action,
                            attempt = state.attempts,
                            status = response.status,
                            "MWS request succeeded"
                        );
                        return Ok(response);
                    }
                    let error = ErrorResponse::parse(&response.body);
                    match classify(&response, error.as_ref()) {
                        ResponseClass::Success => return Ok(response),
                        ResponseClass::ClientError => {
                            return Err(ResponseError::new(&response, error).into());
                        }
                        ResponseClass::Throttled => Failure::Throttled(response, error),
                        ResponseClass::ServerError => Failure::Server(response, error),
                    }
                }
                Err(error) => Failure::Network(error),
            };

            if state.attempts >= self.policy.attempt_limit() {
                tracing::warn!(
                    action,
                    attempts = state.attempts,
                    backoff_elapsed_ms = u64::try_from(state.backoff_elapsed.as_millis()).unwrap_or(u64::MAX),
                    "Giving up on MWS request: {}",
                    failure.describe()
                );
                return Err(failure.into_error(state.attempts));
            }

            let delay = self.policy.delay_for(state.attempts);
            tracing::warn!(
                action,
                attempt = state.attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying MWS request after {}",
                failure.describe()
            );
            tokio::time::sleep(delay).await;
            state.backoff_elapsed += delay;
        }
    }
}
