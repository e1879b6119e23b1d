//! HTTP response types for the MWS API SDK.
//!
//! This module provides the raw [`WireResponse`] returned by a transport,
//! the [`RequestMeta`] parsed from MWS response headers, and the vendor's
//! [`ErrorResponse`] document.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::parsing::{xml, Decode, FieldPath, Fields, ParsingError};

/// Header carrying the MWS request id.
pub const REQUEST_ID_HEADER: &str = "x-mws-request-id";
/// Header carrying the server timestamp.
pub const TIMESTAMP_HEADER: &str = "x-mws-timestamp";
/// Header carrying the hourly quota ceiling.
pub const QUOTA_MAX_HEADER: &str = "x-mws-quota-max";
/// Header carrying the remaining quota.
pub const QUOTA_REMAINING_HEADER: &str = "x-mws-quota-remaining";
/// Header carrying the time the quota resets.
pub const QUOTA_RESETS_ON_HEADER: &str = "x-mws-quota-resetson";

/// One raw HTTP exchange result, before any interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body as text.
    pub body: String,
}

impl WireResponse {
    /// Creates a response, normalizing header names to lowercase.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in headers {
            normalized
                .entry(name.to_lowercase())
                .or_default()
                .extend(values);
        }
        Self {
            status,
            headers: normalized,
            body: body.into(),
        }
    }

    /// Adds a header, builder style.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

/// Per-call metadata parsed from MWS response headers.
///
/// Every field is `None` when its header is missing or unparseable; a
/// missing quota is never reported as zero.
///
/// # Example
///
/// ```rust
/// use mws_api::clients::{RequestMeta, WireResponse};
/// use std::collections::HashMap;
///
/// let response = WireResponse::new(200, HashMap::new(), "")
///     .with_header("x-mws-request-id", "abc")
///     .with_header("x-mws-quota-remaining", "199.0");
///
/// let meta = RequestMeta::from_response(&response);
/// assert_eq!(meta.request_id.as_deref(), Some("abc"));
/// assert_eq!(meta.quota_remaining, Some(199.0));
/// assert!(meta.quota_max.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RequestMeta {
    /// The MWS request id (`x-mws-request-id`).
    pub request_id: Option<String>,
    /// The server timestamp (`x-mws-timestamp`).
    pub timestamp: Option<DateTime<Utc>>,
    /// The quota ceiling for this action (`x-mws-quota-max`).
    pub quota_max: Option<f64>,
    /// Calls remaining in the current window (`x-mws-quota-remaining`).
    pub quota_remaining: Option<f64>,
    /// When the quota window resets (`x-mws-quota-resetson`).
    pub quota_resets_on: Option<DateTime<Utc>>,
}

impl RequestMeta {
    /// Parses metadata from a response's headers.
    #[must_use]
    pub fn from_response(response: &WireResponse) -> Self {
        let date = |name: &str| {
            response
                .header(name)
                .and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
                .map(|value| value.with_timezone(&Utc))
        };
        let number = |name: &str| {
            response
                .header(name)
                .and_then(|value| value.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite())
        };

        Self {
            request_id: response.header(REQUEST_ID_HEADER).map(String::from),
            timestamp: date(TIMESTAMP_HEADER),
            quota_max: number(QUOTA_MAX_HEADER),
            quota_remaining: number(QUOTA_REMAINING_HEADER),
            quota_resets_on: date(QUOTA_RESETS_ON_HEADER),
        }
    }

    /// Returns `true` if the quota is known to be used up.
    #[must_use]
    pub fn quota_exhausted(&self) -> bool {
        self.quota_remaining.is_some_and(|remaining| remaining <= 0.0)
    }
}

/// The error document MWS returns with non-2xx responses.
///
/// ```xml
/// <ErrorResponse>
///   <Error><Type>Sender</Type><Code>RequestThrottled</Code><Message>…</Message></Error>
///   <RequestID>…</RequestID>
/// </ErrorResponse>
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    /// `Sender` or `Server`.
    pub error_type: Option<String>,
    /// The vendor error code, e.g. `RequestThrottled`.
    pub code: String,
    /// The human-readable message.
    pub message: Option<String>,
    /// The request id echoed in the body.
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Parses an error body, returning `None` if it is not an MWS error document.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let document = xml::parse_document(body).ok()?;
        let root = FieldPath::root();
        let fields = Fields::new(&document, &root).ok()?;
        let path = root.field("ErrorResponse");
        Self::decode(fields.get("ErrorResponse")?, &path).ok()
    }
}

impl Decode for ErrorResponse {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        let error_path = path.field("Error");
        // Batched errors repeat the Error element; the first one is representative.
        let first = match fields.get("Error") {
            Some(Value::Array(errors)) => errors.first(),
            other => other,
        }
        .ok_or_else(|| ParsingError::missing(&error_path, "a field named Error"))?;
        let error = Fields::new(first, &error_path)?;

        Ok(Self {
            error_type: error.optional("Type")?,
            code: error.required("Code")?,
            message: error.optional("Message")?,
            request_id: fields
                .optional("RequestID")?
                .or(fields.optional("RequestId")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mws_headers() -> WireResponse {
        WireResponse::new(200, HashMap::new(), "")
            .with_header("X-MWS-Request-Id", "0")
            .with_header("x-mws-timestamp", "2020-05-06T09:22:23.582Z")
            .with_header("x-mws-quota-max", "1000")
            .with_header("x-mws-quota-remaining", "999")
            .with_header("x-mws-quota-resetson", "2020-04-06T10:22:23.582Z")
    }

    #[test]
    fn test_is_success_for_2xx_only() {
        for code in 200..=299 {
            assert!(WireResponse::new(code, HashMap::new(), "").is_success());
        }
        assert!(!WireResponse::new(400, HashMap::new(), "").is_success());
        assert!(!WireResponse::new(503, HashMap::new(), "").is_success());
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Mws-Request-Id".to_string(), vec!["id-1".to_string()]);
        let response = WireResponse::new(200, headers, "");
        assert_eq!(response.header("x-mws-request-id"), Some("id-1"));
        assert_eq!(response.header("X-MWS-REQUEST-ID"), Some("id-1"));
    }

    #[test]
    fn test_request_meta_parses_all_headers() {
        let meta = RequestMeta::from_response(&mws_headers());

        assert_eq!(meta.request_id.as_deref(), Some("0"));
        assert_eq!(
            meta.timestamp.unwrap().to_rfc3339(),
            "2020-05-06T09:22:23.582+00:00"
        );
        assert_eq!(meta.quota_max, Some(1000.0));
        assert_eq!(meta.quota_remaining, Some(999.0));
        assert_eq!(
            meta.quota_resets_on.unwrap().to_rfc3339(),
            "2020-04-06T10:22:23.582+00:00"
        );
        assert!(!meta.quota_exhausted());
    }

    #[test]
    fn test_missing_headers_are_absent_not_zero() {
        let meta = RequestMeta::from_response(&WireResponse::new(200, HashMap::new(), ""));
        assert_eq!(meta, RequestMeta::default());
        assert!(meta.quota_remaining.is_none());
        assert!(!meta.quota_exhausted());
    }

    #[test]
    fn test_unparseable_headers_are_absent() {
        let response = WireResponse::new(200, HashMap::new(), "")
            .with_header("x-mws-quota-max", "lots")
            .with_header("x-mws-timestamp", "yesterday");
        let meta = RequestMeta::from_response(&response);
        assert!(meta.quota_max.is_none());
        assert!(meta.timestamp.is_none());
    }

    #[test]
    fn test_error_response_parsing() {
        let body = r#"<?xml version="1.0"?>
            <ErrorResponse xmlns="http://mws.amazonservices.com/doc/2009-01-01/">
              <Error>
                <Type>Sender</Type>
                <Code>RequestThrottled</Code>
                <Message>Request is throttled</Message>
              </Error>
              <RequestID>req-123</RequestID>
            </ErrorResponse>"#;

        let error = ErrorResponse::parse(body).unwrap();
        assert_eq!(error.error_type.as_deref(), Some("Sender"));
        assert_eq!(error.code, "RequestThrottled");
        assert_eq!(error.message.as_deref(), Some("Request is throttled"));
        assert_eq!(error.request_id.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_error_response_rejects_other_documents() {
        assert!(ErrorResponse::parse("").is_none());
        assert!(ErrorResponse::parse("<html>Bad gateway</html>").is_none());
        assert!(ErrorResponse::parse("<ErrorResponse><Error/></ErrorResponse>").is_none());
    }
}
