//! Service status, shared by every section.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::closed_enum;
use crate::clients::{GatewayError, HttpClient, HttpMethod, RequestMeta, RequestSpec, Resource};
use crate::parsing::{Decode, FieldPath, Fields, ParsingError};

closed_enum! {
    /// Operational status of an MWS section.
    pub enum ServiceStatus {
        /// The service is operating normally.
        Green => "GREEN",
        /// The service is operating normally, with an informational message.
        GreenI => "GREEN_I",
        /// The service is degraded.
        Yellow => "YELLOW",
        /// The service is unavailable.
        Red => "RED",
    }
}

/// A localized status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceMessage {
    /// The message locale, e.g. `en_US`.
    pub locale: String,
    /// The message text.
    pub text: String,
}

impl Decode for ServiceMessage {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            locale: fields.required("Locale")?,
            text: fields.required("Text")?,
        })
    }
}

/// Result of `GetServiceStatus`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceStatusResponse {
    /// The current status.
    pub status: ServiceStatus,
    /// When the status was evaluated.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the status message, if one is attached.
    pub message_id: Option<String>,
    /// Status messages, if any.
    pub messages: Option<Vec<ServiceMessage>>,
}

impl Decode for ServiceStatusResponse {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            status: fields.required("Status")?,
            timestamp: fields.required("Timestamp")?,
            message_id: fields.optional("MessageId")?,
            messages: fields.optional_list("Messages", "Message")?,
        })
    }
}

/// Calls `GetServiceStatus` on `resource`.
pub(crate) async fn get_service_status(
    client: &HttpClient,
    resource: Resource,
    version: &str,
) -> Result<(ServiceStatusResponse, RequestMeta), GatewayError> {
    client
        .request(
            HttpMethod::Post,
            RequestSpec::new(resource, version, "GetServiceStatus"),
        )
        .await
}
