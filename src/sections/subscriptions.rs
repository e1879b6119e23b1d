//! The Subscriptions section: notification destinations and subscriptions.
//!
//! A [`Destination`] is where MWS delivers notifications (an SQS queue); a
//! [`Subscription`] binds a [`NotificationType`] to a destination.
//!
//! # Example
//!
//! ```rust,ignore
//! use mws_api::sections::subscriptions::{
//!     AttributeKey, AttributeKeyValue, DeliveryChannel, Destination,
//! };
//!
//! let destination = Destination {
//!     delivery_channel: DeliveryChannel::Sqs,
//!     attribute_list: vec![AttributeKeyValue {
//!         key: AttributeKey::SqsQueueUrl,
//!         value: "https://sqs.us-east-1.amazonaws.com/51471EXAMPLE/mws_notifications".to_string(),
//!     }],
//! };
//!
//! mws.subscriptions().register_destination("ATVPDKIKX0DER", &destination).await?;
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::closed_enum;
use crate::clients::{
    GatewayError, HttpClient, HttpMethod, Parameters, RequestMeta, RequestSpec, Resource,
};
use crate::parsing::{Decode, Empty, FieldPath, Fields, ParsingError};
use crate::sections::shared::{get_service_status, ServiceStatusResponse};

/// API version of the Subscriptions section.
pub const SUBSCRIPTIONS_API_VERSION: &str = "2013-07-01";

closed_enum! {
    /// How notifications are delivered.
    pub enum DeliveryChannel {
        /// Amazon Simple Queue Service.
        Sqs => "SQS",
    }
}

closed_enum! {
    /// Attribute names a destination can carry.
    pub enum AttributeKey {
        /// The URL of the SQS queue.
        SqsQueueUrl => "sqsQueueUrl",
    }
}

closed_enum! {
    /// Notification types a seller can subscribe to.
    pub enum NotificationType {
        /// A top-20 offer for an item the seller lists changed.
        AnyOfferChanged => "AnyOfferChanged",
        /// A business offer for an item the seller lists changed.
        B2BAnyOfferChanged => "B2BAnyOfferChanged",
        /// A submitted feed finished processing.
        FeedProcessingFinished => "FeedProcessingFinished",
        /// An outbound shipment's status changed.
        FbaOutboundShipmentStatus => "FBAOutboundShipmentStatus",
        /// A fee promotion became available.
        FeePromotion => "FeePromotion",
        /// A multi-channel fulfillment order's status changed.
        FulfillmentOrderStatus => "FulfillmentOrderStatus",
        /// A requested report finished processing.
        ReportProcessingFinished => "ReportProcessingFinished",
    }
}

/// One attribute of a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeKeyValue {
    /// Attribute name.
    pub key: AttributeKey,
    /// Attribute value, e.g. the queue URL.
    pub value: String,
}

impl AttributeKeyValue {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("Key", self.key)
            .with("Value", self.value.as_str())
    }
}

impl Decode for AttributeKeyValue {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            key: fields.required("Key")?,
            value: fields.required("Value")?,
        })
    }
}

/// Where notifications are delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// How notifications are delivered.
    pub delivery_channel: DeliveryChannel,
    /// Channel-specific attributes.
    pub attribute_list: Vec<AttributeKeyValue>,
}

impl Destination {
    /// Renders the destination as `DeliveryChannel` and
    /// `AttributeList.member.N.{Key,Value}` parameters.
    fn to_parameters(&self) -> Parameters {
        let attributes: Vec<Parameters> = self
            .attribute_list
            .iter()
            .map(AttributeKeyValue::to_parameters)
            .collect();
        Parameters::new()
            .with("DeliveryChannel", self.delivery_channel)
            .with("AttributeList.member", attributes)
    }
}

impl Decode for Destination {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            delivery_channel: fields.required("DeliveryChannel")?,
            attribute_list: fields.list("AttributeList", "member")?,
        })
    }
}

/// A notification type bound to a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    /// The notifications subscribed to.
    pub notification_type: NotificationType,
    /// Where they are delivered.
    pub destination: Destination,
    /// Whether delivery is active.
    pub is_enabled: bool,
}

impl Subscription {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("NotificationType", self.notification_type)
            .with("Destination", self.destination.to_parameters())
            .with("IsEnabled", self.is_enabled)
    }
}

impl Decode for Subscription {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            notification_type: fields.required("NotificationType")?,
            destination: fields.required("Destination")?,
            is_enabled: fields.required("IsEnabled")?,
        })
    }
}

/// Result of `ListRegisteredDestinations`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredDestinations {
    /// Destinations registered in the marketplace.
    pub destination_list: Vec<Destination>,
}

impl Decode for RegisteredDestinations {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            destination_list: fields.list("DestinationList", "member")?,
        })
    }
}

/// Result of `GetSubscription`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetSubscriptionResult {
    /// The matching subscription.
    pub subscription: Subscription,
}

impl Decode for GetSubscriptionResult {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            subscription: fields.required("Subscription")?,
        })
    }
}

/// Result of `ListSubscriptions`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionList {
    /// Subscriptions in the marketplace.
    pub subscription_list: Vec<Subscription>,
}

impl Decode for SubscriptionList {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            subscription_list: fields.list("SubscriptionList", "member")?,
        })
    }
}

/// Client for the Subscriptions section.
#[derive(Clone, Debug)]
pub struct Subscriptions {
    client: Arc<HttpClient>,
}

impl Subscriptions {
    /// Creates the section over a shared gateway.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    fn spec(action: &str, marketplace_id: &str) -> RequestSpec {
        RequestSpec::new(Resource::Subscriptions, SUBSCRIPTIONS_API_VERSION, action)
            .parameter("MarketplaceId", marketplace_id)
    }

    async fn call<T: Decode>(&self, spec: RequestSpec) -> Result<(T, RequestMeta), GatewayError> {
        self.client.request(HttpMethod::Post, spec).await
    }

    /// Registers a new destination for notifications.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn register_destination(
        &self,
        marketplace_id: &str,
        destination: &Destination,
    ) -> Result<(Empty, RequestMeta), GatewayError> {
        self.call(
            Self::spec("RegisterDestination", marketplace_id)
                .parameter("Destination", destination.to_parameters()),
        )
        .await
    }

    /// Removes a registered destination.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn deregister_destination(
        &self,
        marketplace_id: &str,
        destination: &Destination,
    ) -> Result<(Empty, RequestMeta), GatewayError> {
        self.call(
            Self::spec("DeregisterDestination", marketplace_id)
                .parameter("Destination", destination.to_parameters()),
        )
        .await
    }

    /// Lists all registered destinations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn list_registered_destinations(
        &self,
        marketplace_id: &str,
    ) -> Result<(RegisteredDestinations, RequestMeta), GatewayError> {
        self.call(Self::spec("ListRegisteredDestinations", marketplace_id))
            .await
    }

    /// Sends a test notification to a destination.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn send_test_notification_to_destination(
        &self,
        marketplace_id: &str,
        destination: &Destination,
    ) -> Result<(Empty, RequestMeta), GatewayError> {
        self.call(
            Self::spec("SendTestNotificationToDestination", marketplace_id)
                .parameter("Destination", destination.to_parameters()),
        )
        .await
    }

    /// Creates a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn create_subscription(
        &self,
        marketplace_id: &str,
        subscription: &Subscription,
    ) -> Result<(Empty, RequestMeta), GatewayError> {
        self.call(
            Self::spec("CreateSubscription", marketplace_id)
                .parameter("Subscription", subscription.to_parameters()),
        )
        .await
    }

    /// Fetches the subscription for a notification type and destination.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_subscription(
        &self,
        marketplace_id: &str,
        notification_type: NotificationType,
        destination: &Destination,
    ) -> Result<(GetSubscriptionResult, RequestMeta), GatewayError> {
        self.call(
            Self::spec("GetSubscription", marketplace_id)
                .parameter("NotificationType", notification_type)
                .parameter("Destination", destination.to_parameters()),
        )
        .await
    }

    /// Deletes the subscription for a notification type and destination.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn delete_subscription(
        &self,
        marketplace_id: &str,
        notification_type: NotificationType,
        destination: &Destination,
    ) -> Result<(Empty, RequestMeta), GatewayError> {
        self.call(
            Self::spec("DeleteSubscription", marketplace_id)
                .parameter("NotificationType", notification_type)
                .parameter("Destination", destination.to_parameters()),
        )
        .await
    }

    /// Lists all current subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn list_subscriptions(
        &self,
        marketplace_id: &str,
    ) -> Result<(SubscriptionList, RequestMeta), GatewayError> {
        self.call(Self::spec("ListSubscriptions", marketplace_id))
            .await
    }

    /// Replaces an existing subscription.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn update_subscription(
        &self,
        marketplace_id: &str,
        subscription: &Subscription,
    ) -> Result<(Empty, RequestMeta), GatewayError> {
        self.call(
            Self::spec("UpdateSubscription", marketplace_id)
                .parameter("Subscription", subscription.to_parameters()),
        )
        .await
    }

    /// Returns the operational status of the Subscriptions section.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_service_status(
        &self,
    ) -> Result<(ServiceStatusResponse, RequestMeta), GatewayError> {
        get_service_status(&self.client, Resource::Subscriptions, SUBSCRIPTIONS_API_VERSION).await
    }
}
