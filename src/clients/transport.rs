//! Pluggable HTTP transports.
//!
//! A [`Transport`] performs exactly one network exchange per call: no retry,
//! no decoding, no interpretation of the status code. Repetition is the
//! governor's job. Two implementations ship with the SDK:
//!
//! - [`ReqwestTransport`]: the real network stack (rustls)
//! - [`ScriptedTransport`]: replays canned responses in order and records
//!   every request, for tests and offline fixtures

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::WireResponse;

/// One outbound HTTP request, fully rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, including the query string for GET.
    pub url: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// The form-encoded body for POST.
    pub body: Option<String>,
}

/// A transport failed to complete an exchange.
#[derive(Debug, Error)]
pub enum SendError {
    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The transport has nothing to send the request to.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Performs a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` once and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] if no response was received.
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, SendError>;
}

/// Transport backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport, optionally bounding each exchange by `timeout`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");
        Self { client }
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, SendError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let res = builder.send().await?;
        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(WireResponse::new(status, headers, body))
    }
}

/// Transport that replays queued responses and records every request.
///
/// # Example
///
/// ```rust
/// use mws_api::clients::{HttpMethod, ScriptedTransport, Transport, WireRequest, WireResponse};
/// use std::collections::HashMap;
///
/// # tokio_test::block_on(async {
/// let transport = ScriptedTransport::new();
/// transport.push_response(WireResponse::new(200, HashMap::new(), "<Ok/>"));
///
/// let request = WireRequest {
///     method: HttpMethod::Post,
///     url: "https://mws.amazonservices.com/Sellers/2011-07-01".to_string(),
///     headers: Vec::new(),
///     body: Some("Action=GetServiceStatus".to_string()),
/// };
/// let response = transport.send(&request).await.unwrap();
/// assert_eq!(response.body, "<Ok/>");
/// assert_eq!(transport.requests().len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<WireResponse, String>>>,
    requests: Mutex<Vec<WireRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that answers with `responses` in order.
    #[must_use]
    pub fn with_responses(responses: impl IntoIterator<Item = WireResponse>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    /// Queues a response.
    pub fn push_response(&self, response: WireResponse) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
    }

    /// Queues a network failure.
    pub fn push_failure(&self, reason: impl Into<String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(reason.into()));
    }

    /// Returns every request sent so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of queued responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, SendError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(SendError::Unavailable(reason)),
            None => Err(SendError::Unavailable(
                "no scripted response left".to_string(),
            )),
        }
    }
}
