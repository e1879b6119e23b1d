//! End-to-end tests of the domain sections over a scripted transport.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use mws_api::auth::FixedClock;
use mws_api::clients::{GatewayError, ScriptedTransport, WireResponse};
use mws_api::sections::fulfillment_inbound_shipment::{
    Address, BarcodeInstruction, Dimensions, GuidanceReason, InboundGuidance,
    InboundShipmentHeader, InboundShipmentItem, InboundShipmentParameters,
    IntendedBoxContentsSource, LabelPrepPreference, NonPartneredSmallParcelData,
    PartneredSmallParcelData, PartneredSmallParcelPackage, PrepDetails, PrepGuidance,
    PrepInstruction, PrepOwner, ShipmentStatus, TransportDetails, TransportStatus,
    UnitOfMeasurement, UnitOfWeight, Weight,
};
use mws_api::sections::subscriptions::{
    AttributeKey, AttributeKeyValue, DeliveryChannel, Destination, NotificationType, Subscription,
};
use mws_api::sections::ServiceStatus;
use mws_api::{
    AwsAccessKeyId, HttpClient, Marketplace, Mws, MwsConfig, RetryPolicy, SecretKey, SellerId,
};

const CA: &str = "A2EUQ1WTGCTBG2";

fn mws_with(responses: Vec<WireResponse>) -> (Mws, Arc<ScriptedTransport>) {
    let config = MwsConfig::builder()
        .aws_access_key_id(AwsAccessKeyId::new("AKIAEXAMPLE").unwrap())
        .secret_key(SecretKey::new("secret").unwrap())
        .seller_id(SellerId::new("A1SELLER").unwrap())
        .marketplace(Marketplace::CA)
        .retry_policy(RetryPolicy::no_retries())
        .build()
        .unwrap();
    let transport = Arc::new(ScriptedTransport::with_responses(responses));
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2020, 5, 6, 9, 22, 23).unwrap());
    let client = HttpClient::with_transport(&config, transport.clone(), Arc::new(clock));
    (Mws::from_client(Arc::new(client)), transport)
}

fn ok(body: &str) -> WireResponse {
    WireResponse::new(200, HashMap::new(), body)
        .with_header("x-mws-request-id", "0")
        .with_header("x-mws-timestamp", "2020-05-06T09:22:23.582Z")
        .with_header("x-mws-quota-max", "1000")
        .with_header("x-mws-quota-remaining", "999")
        .with_header("x-mws-quota-resetson", "2020-04-06T10:22:23.582Z")
}

fn sent_fields(transport: &ScriptedTransport, index: usize) -> HashMap<String, String> {
    let requests = transport.requests();
    requests[index]
        .body
        .as_deref()
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            (
                urlencoding::decode(k).unwrap().into_owned(),
                urlencoding::decode(v).unwrap().into_owned(),
            )
        })
        .collect()
}

fn sqs_destination() -> Destination {
    Destination {
        delivery_channel: DeliveryChannel::Sqs,
        attribute_list: vec![AttributeKeyValue {
            key: AttributeKey::SqsQueueUrl,
            value: "https://sqs.us-east-1.amazonaws.com/51471EXAMPLE/mws_notifications".into(),
        }],
    }
}

#[tokio::test]
async fn test_inbound_guidance_for_sku() {
    let body = r#"<GetInboundGuidanceForSKUResponse xmlns="http://mws.amazonaws.com/FulfillmentInboundShipment/2010-10-01/">
  <GetInboundGuidanceForSKUResult>
    <SKUInboundGuidanceList>
      <SKUInboundGuidance>
        <SellerSKU>SKU00001</SellerSKU>
        <ASIN>B00SKU1GUID</ASIN>
        <InboundGuidance>InboundNotRecommended</InboundGuidance>
        <GuidanceReasonList>
          <GuidanceReason>SlowMovingASIN</GuidanceReason>
        </GuidanceReasonList>
      </SKUInboundGuidance>
      <SKUInboundGuidance>
        <SellerSKU>SKU00002</SellerSKU>
        <ASIN>B00SKU2GUID</ASIN>
        <InboundGuidance>InboundOK</InboundGuidance>
      </SKUInboundGuidance>
    </SKUInboundGuidanceList>
    <InvalidSKUList>
      <InvalidSKU>
        <SellerSKU>SKU00003</SellerSKU>
        <ErrorReason>DoesNotExist</ErrorReason>
      </InvalidSKU>
    </InvalidSKUList>
  </GetInboundGuidanceForSKUResult>
  <ResponseMetadata><RequestId>1835a2b5-b5b9-4c81-8ab4-b1d9a8bad0a1</RequestId></ResponseMetadata>
</GetInboundGuidanceForSKUResponse>"#;
    let (mws, transport) = mws_with(vec![ok(body)]);

    let (guidance, meta) = mws
        .fulfillment_inbound_shipment()
        .get_inbound_guidance_for_sku(&["SKU00001", "SKU00002", "SKU00003"], CA)
        .await
        .unwrap();

    let first = &guidance.sku_inbound_guidance_list[0];
    assert_eq!(first.inbound_guidance, InboundGuidance::InboundNotRecommended);
    assert_eq!(
        first.guidance_reason_list.as_deref(),
        Some(&[GuidanceReason::SlowMovingAsin][..])
    );
    assert_eq!(
        guidance.sku_inbound_guidance_list[1].inbound_guidance,
        InboundGuidance::InboundOk
    );
    assert!(guidance.sku_inbound_guidance_list[1].guidance_reason_list.is_none());
    assert_eq!(
        guidance.invalid_sku_list.unwrap()[0].error_reason,
        "DoesNotExist"
    );
    assert_eq!(meta.quota_remaining, Some(999.0));

    let fields = sent_fields(&transport, 0);
    assert_eq!(fields["Action"], "GetInboundGuidanceForSKU");
    assert_eq!(fields["SellerSKUList.Id.1"], "SKU00001");
    assert_eq!(fields["SellerSKUList.Id.3"], "SKU00003");
    assert_eq!(fields["MarketplaceId"], CA);
    assert_eq!(fields["Version"], "2010-10-01");
}

#[tokio::test]
async fn test_prep_instructions_for_sku_with_fees() {
    let body = r#"<GetPrepInstructionsForSKUResponse>
  <GetPrepInstructionsForSKUResult>
    <SKUPrepInstructionsList>
      <SKUPrepInstructions>
        <SellerSKU>ca_001</SellerSKU>
        <ASIN>B0011VECH4</ASIN>
        <BarcodeInstruction>RequiresFNSKULabel</BarcodeInstruction>
        <PrepGuidance>SeePrepInstructionsList</PrepGuidance>
        <PrepInstructionList>
          <PrepInstruction>Polybagging</PrepInstruction>
          <PrepInstruction>Taping</PrepInstruction>
        </PrepInstructionList>
        <AmazonPrepFeesDetailsList>
          <AmazonPrepFeesDetails>
            <PrepInstruction>Polybagging</PrepInstruction>
            <FeePerUnit><CurrencyCode>CAD</CurrencyCode><Value>0.20</Value></FeePerUnit>
          </AmazonPrepFeesDetails>
        </AmazonPrepFeesDetailsList>
      </SKUPrepInstructions>
    </SKUPrepInstructionsList>
  </GetPrepInstructionsForSKUResult>
</GetPrepInstructionsForSKUResponse>"#;
    let (mws, transport) = mws_with(vec![ok(body)]);

    let (prep, _) = mws
        .fulfillment_inbound_shipment()
        .get_prep_instructions_for_sku(&["ca_001"], "CA")
        .await
        .unwrap();

    let item = &prep.sku_prep_instructions_list[0];
    assert_eq!(item.barcode_instruction, BarcodeInstruction::RequiresFnskuLabel);
    assert_eq!(item.prep_guidance, PrepGuidance::SeePrepInstructionsList);
    assert_eq!(
        item.prep_instruction_list.as_deref(),
        Some(&[PrepInstruction::Polybagging, PrepInstruction::Taping][..])
    );
    let fees = item.amazon_prep_fees_details_list.as_ref().unwrap();
    assert_eq!(fees[0].fee_per_unit.currency_code, "CAD");
    assert!((fees[0].fee_per_unit.value - 0.20).abs() < f64::EPSILON);
    assert!(prep.invalid_sku_list.is_none());

    assert_eq!(sent_fields(&transport, 0)["ShipToCountryCode"], "CA");
}

#[tokio::test]
async fn test_confirm_preorder_sends_timestamp_and_decodes_dates() {
    let body = "<ConfirmPreorderResponse><ConfirmPreorderResult>\
        <ConfirmedNeedByDate>2020-04-23</ConfirmedNeedByDate>\
        <ConfirmedFulfillableDate>2020-04-23</ConfirmedFulfillableDate>\
        </ConfirmPreorderResult></ConfirmPreorderResponse>";
    let (mws, transport) = mws_with(vec![ok(body)]);

    let need_by = Utc.with_ymd_and_hms(2020, 4, 23, 0, 0, 0).unwrap();
    let (result, _) = mws
        .fulfillment_inbound_shipment()
        .confirm_preorder("FBA15DJ9SVVD", need_by)
        .await
        .unwrap();

    let expected = NaiveDate::from_ymd_opt(2020, 4, 23);
    assert_eq!(result.confirmed_need_by_date, expected);
    assert_eq!(result.confirmed_fulfillable_date, expected);

    let fields = sent_fields(&transport, 0);
    assert_eq!(fields["ShipmentId"], "FBA15DJ9SVVD");
    assert_eq!(fields["NeedByDate"], "2020-04-23T00:00:00.000Z");
}

#[tokio::test]
async fn test_create_subscription_flattens_destination() {
    let body = "<CreateSubscriptionResponse><CreateSubscriptionResult/>\
        </CreateSubscriptionResponse>";
    let (mws, transport) = mws_with(vec![ok(body)]);

    let subscription = Subscription {
        notification_type: NotificationType::AnyOfferChanged,
        destination: sqs_destination(),
        is_enabled: true,
    };
    mws.subscriptions()
        .create_subscription(CA, &subscription)
        .await
        .unwrap();

    let fields = sent_fields(&transport, 0);
    assert_eq!(fields["Subscription.NotificationType"], "AnyOfferChanged");
    assert_eq!(fields["Subscription.IsEnabled"], "true");
    assert_eq!(fields["Subscription.Destination.DeliveryChannel"], "SQS");
    assert_eq!(
        fields["Subscription.Destination.AttributeList.member.1.Key"],
        "sqsQueueUrl"
    );
    assert_eq!(
        fields["Subscription.Destination.AttributeList.member.1.Value"],
        "https://sqs.us-east-1.amazonaws.com/51471EXAMPLE/mws_notifications"
    );
    assert_eq!(
        transport.requests()[0].url,
        "https://mws.amazonservices.ca/Subscriptions/2013-07-01"
    );
}

#[tokio::test]
async fn test_list_subscriptions_decodes_nested_destination() {
    let body = "<ListSubscriptionsResponse><ListSubscriptionsResult><SubscriptionList><member>\
        <NotificationType>AnyOfferChanged</NotificationType>\
        <Destination><DeliveryChannel>SQS</DeliveryChannel><AttributeList><member>\
        <Key>sqsQueueUrl</Key><Value>https://queue</Value>\
        </member></AttributeList></Destination>\
        <IsEnabled>true</IsEnabled>\
        </member></SubscriptionList></ListSubscriptionsResult></ListSubscriptionsResponse>";
    let (mws, _) = mws_with(vec![ok(body)]);

    let (list, _) = mws.subscriptions().list_subscriptions(CA).await.unwrap();

    let subscription = &list.subscription_list[0];
    assert_eq!(subscription.notification_type, NotificationType::AnyOfferChanged);
    assert!(subscription.is_enabled);
    assert_eq!(subscription.destination.attribute_list[0].value, "https://queue");
}

#[tokio::test]
async fn test_unknown_enum_value_fails_with_its_path() {
    let body = "<GetServiceStatusResponse><GetServiceStatusResult>\
        <Status>PURPLE</Status><Timestamp>2020-05-06T08:22:23.582Z</Timestamp>\
        </GetServiceStatusResult></GetServiceStatusResponse>";
    let (mws, _) = mws_with(vec![ok(body)]);

    let error = mws.subscriptions().get_service_status().await.unwrap_err();
    match error {
        GatewayError::Parsing(e) => {
            assert_eq!(e.path, "$.GetServiceStatusResponse.GetServiceStatusResult.Status");
        }
        other => panic!("expected a parsing error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sellers_pagination_sends_next_token() {
    let page = "<ListMarketplaceParticipationsByNextTokenResponse>\
        <ListMarketplaceParticipationsByNextTokenResult>\
        <ListParticipations/><ListMarketplaces/>\
        </ListMarketplaceParticipationsByNextTokenResult>\
        </ListMarketplaceParticipationsByNextTokenResponse>";
    let status = "<GetServiceStatusResponse><GetServiceStatusResult>\
        <Status>GREEN_I</Status><Timestamp>2020-05-06T08:22:23.582Z</Timestamp>\
        </GetServiceStatusResult></GetServiceStatusResponse>";
    let (mws, transport) = mws_with(vec![ok(page), ok(status)]);

    let (result, _) = mws
        .sellers()
        .list_marketplace_participations_by_next_token("token-2")
        .await
        .unwrap();
    assert!(result.list_participations.is_empty());
    assert!(result.list_marketplaces.is_empty());

    let (status, _) = mws.sellers().get_service_status().await.unwrap();
    assert_eq!(status.status, ServiceStatus::GreenI);

    assert_eq!(sent_fields(&transport, 0)["NextToken"], "token-2");
}

fn warehouse() -> Address {
    Address {
        name: "Seller Warehouse".into(),
        address_line1: "1 Main St".into(),
        address_line2: Some("Unit 4".into()),
        city: "Toronto".into(),
        state_or_province_code: Some("ON".into()),
        country_code: "CA".into(),
        postal_code: Some("M5V2T6".into()),
        ..Address::default()
    }
}

#[tokio::test]
async fn test_create_inbound_shipment_flattens_header_and_items() {
    let body = r#"<CreateInboundShipmentResponse xmlns="http://mws.amazonaws.com/FulfillmentInboundShipment/2010-10-01/">
  <CreateInboundShipmentResult>
    <ShipmentId>FBA2DPXHDR</ShipmentId>
  </CreateInboundShipmentResult>
  <ResponseMetadata><RequestId>a1b2</RequestId></ResponseMetadata>
</CreateInboundShipmentResponse>"#;
    let (mws, transport) = mws_with(vec![ok(body)]);
    let parameters = InboundShipmentParameters {
        shipment_id: "FBA2DPXHDR".into(),
        inbound_shipment_header: InboundShipmentHeader {
            shipment_name: "Spring restock".into(),
            ship_from_address: warehouse(),
            destination_fulfillment_center_id: "YYZ1".into(),
            label_prep_preference: LabelPrepPreference::AmazonLabelPreferred,
            are_cases_required: Some(true),
            shipment_status: ShipmentStatus::Working,
            intended_box_contents_source: Some(IntendedBoxContentsSource::TwoDBarcode),
        },
        inbound_shipment_items: vec![
            InboundShipmentItem {
                seller_sku: "SKU-1".into(),
                quantity_shipped: 24,
                quantity_in_case: Some(12),
                ..InboundShipmentItem::default()
            },
            InboundShipmentItem {
                seller_sku: "SKU-2".into(),
                quantity_shipped: 5,
                quantity_in_case: None,
                prep_details_list: vec![PrepDetails {
                    prep_instruction: PrepInstruction::BubbleWrapping,
                    prep_owner: PrepOwner::Amazon,
                }],
            },
        ],
    };

    let (result, _) = mws
        .fulfillment_inbound_shipment()
        .create_inbound_shipment(&parameters)
        .await
        .unwrap();
    assert_eq!(result.shipment_id, "FBA2DPXHDR");

    let fields = sent_fields(&transport, 0);
    assert_eq!(fields["Action"], "CreateInboundShipment");
    assert_eq!(fields["ShipmentId"], "FBA2DPXHDR");
    assert_eq!(fields["InboundShipmentHeader.ShipmentName"], "Spring restock");
    assert_eq!(fields["InboundShipmentHeader.ShipFromAddress.City"], "Toronto");
    assert_eq!(fields["InboundShipmentHeader.ShipFromAddress.AddressLine2"], "Unit 4");
    assert_eq!(fields["InboundShipmentHeader.LabelPrepPreference"], "AMAZON_LABEL_PREFERRED");
    assert_eq!(fields["InboundShipmentHeader.AreCasesRequired"], "true");
    assert_eq!(fields["InboundShipmentHeader.ShipmentStatus"], "WORKING");
    assert_eq!(fields["InboundShipmentHeader.IntendedBoxContentsSource"], "2D_BARCODE");
    assert_eq!(fields["InboundShipmentItems.member.1.SellerSKU"], "SKU-1");
    assert_eq!(fields["InboundShipmentItems.member.1.QuantityInCase"], "12");
    assert_eq!(fields["InboundShipmentItems.member.2.QuantityShipped"], "5");
    assert!(!fields.contains_key("InboundShipmentItems.member.2.QuantityInCase"));
    assert_eq!(
        fields["InboundShipmentItems.member.2.PrepDetailsList.PrepDetails.1.PrepInstruction"],
        "BubbleWrapping"
    );
    assert!(!fields.contains_key("InboundShipmentHeader.ShipFromAddress.DistrictOrCounty"));
}

#[tokio::test]
async fn test_put_transport_content_partnered_small_parcel() {
    let body = r#"<PutTransportContentResponse xmlns="http://mws.amazonaws.com/FulfillmentInboundShipment/2010-10-01/">
  <PutTransportContentResult>
    <TransportResult>
      <TransportStatus>WORKING</TransportStatus>
    </TransportResult>
  </PutTransportContentResult>
  <ResponseMetadata><RequestId>c3d4</RequestId></ResponseMetadata>
</PutTransportContentResponse>"#;
    let (mws, transport) = mws_with(vec![ok(body)]);
    let package = |weight: f64| PartneredSmallParcelPackage {
        dimensions: Dimensions {
            unit: UnitOfMeasurement::Centimeters,
            length: 40.0,
            width: 30.0,
            height: 20.5,
        },
        weight: Weight {
            unit: UnitOfWeight::Kilograms,
            value: weight,
        },
    };
    let details = TransportDetails::PartneredSmallParcel(PartneredSmallParcelData {
        carrier_name: None,
        package_list: vec![package(4.25), package(7.0)],
    });

    let (result, _) = mws
        .fulfillment_inbound_shipment()
        .put_transport_content("FBA2DPXHDR", &details)
        .await
        .unwrap();
    assert_eq!(result.transport_result.transport_status, TransportStatus::Working);

    let fields = sent_fields(&transport, 0);
    let package_key = |n: usize, field: &str| {
        format!("TransportDetails.PartneredSmallParcelData.PackageList.member.{n}.{field}")
    };
    assert_eq!(fields["IsPartnered"], "true");
    assert_eq!(fields["ShipmentType"], "SP");
    assert_eq!(fields[&package_key(1, "Weight.Value")], "4.25");
    assert_eq!(fields[&package_key(1, "Weight.Unit")], "kilograms");
    assert_eq!(fields[&package_key(1, "Dimensions.Unit")], "centimeters");
    assert_eq!(fields[&package_key(1, "Dimensions.Height")], "20.5");
    assert_eq!(fields[&package_key(2, "Weight.Value")], "7");
    assert!(!fields.contains_key("TransportDetails.PartneredSmallParcelData.CarrierName"));
}

#[tokio::test]
async fn test_put_transport_content_non_partnered_small_parcel() {
    let body = "<PutTransportContentResponse><PutTransportContentResult>\
        <TransportResult><TransportStatus>WORKING</TransportStatus></TransportResult>\
        </PutTransportContentResult></PutTransportContentResponse>";
    let (mws, transport) = mws_with(vec![ok(body)]);
    let details = TransportDetails::NonPartneredSmallParcel(NonPartneredSmallParcelData {
        carrier_name: "UNITED_PARCEL_SERVICE_INC".into(),
        tracking_ids: vec!["1Z0001".into(), "1Z0002".into()],
    });

    mws.fulfillment_inbound_shipment()
        .put_transport_content("FBA2DPXHDR", &details)
        .await
        .unwrap();

    let fields = sent_fields(&transport, 0);
    assert_eq!(fields["IsPartnered"], "false");
    assert_eq!(
        fields["TransportDetails.NonPartneredSmallParcelData.CarrierName"],
        "UNITED_PARCEL_SERVICE_INC"
    );
    assert_eq!(
        fields["TransportDetails.NonPartneredSmallParcelData.PackageList.member.2.TrackingId"],
        "1Z0002"
    );
}
