//! The Fulfillment Inbound Shipment section.
//!
//! Covers inbound guidance (whether Amazon recommends sending an item to its
//! fulfillment network), labeling and prep requirements, shipment planning,
//! creating and updating inbound shipments, their transport details, and
//! preorder confirmation.
//!
//! The write actions take typed parameter structs that render to nested
//! wire keys such as `ShipFromAddress.Name` or
//! `InboundShipmentPlanRequestItems.member.1.SellerSKU`.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::closed_enum;
use crate::clients::{
    GatewayError, HttpClient, HttpMethod, Parameters, RequestMeta, RequestSpec, Resource,
};
use crate::parsing::{Decode, FieldPath, Fields, ParsingError};
use crate::sections::shared::{get_service_status, ServiceStatusResponse};

/// API version of the Fulfillment Inbound Shipment section.
pub const FULFILLMENT_INBOUND_SHIPMENT_API_VERSION: &str = "2010-10-01";

closed_enum! {
    /// Amazon's recommendation for sending an item inbound.
    pub enum InboundGuidance {
        /// Amazon recommends against sending the item.
        InboundNotRecommended => "InboundNotRecommended",
        /// Amazon recommends sending the item.
        InboundOk => "InboundOK",
    }
}

closed_enum! {
    /// Why Amazon gave its inbound guidance.
    pub enum GuidanceReason {
        /// The item sells slowly.
        SlowMovingAsin => "SlowMovingASIN",
        /// No guidance applies.
        NoApplicableGuidance => "NoApplicableGuidance",
    }
}

closed_enum! {
    /// Labeling requirement for an item.
    pub enum BarcodeInstruction {
        /// The item must carry an Amazon FNSKU label.
        RequiresFnskuLabel => "RequiresFNSKULabel",
        /// The manufacturer barcode may be used instead of an FNSKU label.
        CanUseOriginalBarcode => "CanUseOriginalBarcode",
        /// MWS needs a seller SKU to decide; only returned for ASIN queries.
        MustProvideSellerSku => "MustProvideSellerSKU",
    }
}

closed_enum! {
    /// How to find an item's prep requirements.
    pub enum PrepGuidance {
        /// Prep requirements are described in Seller Central help.
        ConsultHelpDocuments => "ConsultHelpDocuments",
        /// No prep beyond labeling.
        NoAdditionalPrepRequired => "NoAdditionalPrepRequired",
        /// Follow the returned prep instruction list.
        SeePrepInstructionsList => "SeePrepInstructionsList",
    }
}

closed_enum! {
    /// A single prep step.
    pub enum PrepInstruction {
        /// Seal the item in a poly bag.
        Polybagging => "Polybagging",
        /// Wrap the item in bubble wrap.
        BubbleWrapping => "BubbleWrapping",
        /// Tape the item's packaging shut.
        Taping => "Taping",
        /// Shrink-wrap the item in black film.
        BlackShrinkWrapping => "BlackShrinkWrapping",
        /// Apply an FNSKU label.
        Labeling => "Labeling",
        /// Hang the garment on a hanger.
        HangGarment => "HangGarment",
    }
}

/// Inbound guidance for one seller SKU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkuInboundGuidance {
    /// The seller SKU the guidance is for.
    pub seller_sku: String,
    /// The ASIN the SKU maps to.
    pub asin: String,
    /// Whether Amazon recommends sending the item.
    pub inbound_guidance: InboundGuidance,
    /// Reasons behind the guidance, if any were given.
    pub guidance_reason_list: Option<Vec<GuidanceReason>>,
}

impl Decode for SkuInboundGuidance {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            seller_sku: fields.required("SellerSKU")?,
            asin: fields.required("ASIN")?,
            inbound_guidance: fields.required("InboundGuidance")?,
            guidance_reason_list: fields.optional_list("GuidanceReasonList", "GuidanceReason")?,
        })
    }
}

/// Inbound guidance for one ASIN.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsinInboundGuidance {
    /// The ASIN the guidance is for.
    pub asin: String,
    /// Whether Amazon recommends sending the item.
    pub inbound_guidance: InboundGuidance,
    /// Reasons behind the guidance, if any were given.
    pub guidance_reason_list: Option<Vec<GuidanceReason>>,
}

impl Decode for AsinInboundGuidance {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            asin: fields.required("ASIN")?,
            inbound_guidance: fields.required("InboundGuidance")?,
            guidance_reason_list: fields.optional_list("GuidanceReasonList", "GuidanceReason")?,
        })
    }
}

/// A seller SKU that MWS could not evaluate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSku {
    /// The rejected seller SKU.
    pub seller_sku: String,
    /// E.g. `DoesNotExist`, `InvalidASIN`.
    pub error_reason: String,
}

impl Decode for InvalidSku {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            seller_sku: fields.required("SellerSKU")?,
            error_reason: fields.required("ErrorReason")?,
        })
    }
}

/// An ASIN that MWS could not evaluate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidAsin {
    /// The rejected ASIN.
    pub asin: String,
    /// E.g. `DoesNotExist`, `InvalidASIN`.
    pub error_reason: String,
}

impl Decode for InvalidAsin {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            asin: fields.required("ASIN")?,
            error_reason: fields.required("ErrorReason")?,
        })
    }
}

/// Result of `GetInboundGuidanceForSKU`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundGuidanceForSku {
    /// Guidance for every SKU MWS could evaluate.
    pub sku_inbound_guidance_list: Vec<SkuInboundGuidance>,
    /// SKUs MWS could not evaluate.
    pub invalid_sku_list: Option<Vec<InvalidSku>>,
}

impl Decode for InboundGuidanceForSku {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            sku_inbound_guidance_list: fields
                .list("SKUInboundGuidanceList", "SKUInboundGuidance")?,
            invalid_sku_list: fields.optional_list("InvalidSKUList", "InvalidSKU")?,
        })
    }
}

/// Result of `GetInboundGuidanceForASIN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundGuidanceForAsin {
    /// Guidance for every ASIN MWS could evaluate.
    pub asin_inbound_guidance_list: Vec<AsinInboundGuidance>,
    /// ASINs MWS could not evaluate.
    pub invalid_asin_list: Option<Vec<InvalidAsin>>,
}

impl Decode for InboundGuidanceForAsin {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            asin_inbound_guidance_list: fields
                .list("ASINInboundGuidanceList", "ASINInboundGuidance")?,
            invalid_asin_list: fields.optional_list("InvalidASINList", "InvalidASIN")?,
        })
    }
}

/// A monetary amount.
#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    /// ISO 4217 currency code, e.g. `CAD`.
    pub currency_code: String,
    /// The amount in that currency.
    pub value: f64,
}

impl Amount {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("CurrencyCode", self.currency_code.as_str())
            .with("Value", self.value)
    }
}

impl Decode for Amount {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            currency_code: fields.required("CurrencyCode")?,
            value: fields.required("Value")?,
        })
    }
}

/// The fee Amazon charges per unit for one prep step.
#[derive(Clone, Debug, PartialEq)]
pub struct AmazonPrepFeesDetails {
    /// The prep step the fee is for.
    pub prep_instruction: PrepInstruction,
    /// What Amazon charges per unit if it performs the step.
    pub fee_per_unit: Amount,
}

impl Decode for AmazonPrepFeesDetails {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            prep_instruction: fields.required("PrepInstruction")?,
            fee_per_unit: fields.required("FeePerUnit")?,
        })
    }
}

/// Labeling and prep requirements for one seller SKU.
#[derive(Clone, Debug, PartialEq)]
pub struct SkuPrepInstructions {
    /// The seller SKU the requirements are for.
    pub seller_sku: String,
    /// The ASIN the SKU maps to.
    pub asin: String,
    /// Labeling requirement.
    pub barcode_instruction: BarcodeInstruction,
    /// Where to find the prep requirements.
    pub prep_guidance: PrepGuidance,
    /// Prep steps the item needs.
    pub prep_instruction_list: Option<Vec<PrepInstruction>>,
    /// Fees for prep steps Amazon can perform.
    pub amazon_prep_fees_details_list: Option<Vec<AmazonPrepFeesDetails>>,
}

impl Decode for SkuPrepInstructions {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            seller_sku: fields.required("SellerSKU")?,
            asin: fields.required("ASIN")?,
            barcode_instruction: fields.required("BarcodeInstruction")?,
            prep_guidance: fields.required("PrepGuidance")?,
            prep_instruction_list: fields.optional_list("PrepInstructionList", "PrepInstruction")?,
            amazon_prep_fees_details_list: fields
                .optional_list("AmazonPrepFeesDetailsList", "AmazonPrepFeesDetails")?,
        })
    }
}

/// Labeling and prep requirements for one ASIN.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsinPrepInstructions {
    /// The ASIN the requirements are for.
    pub asin: String,
    /// Labeling requirement.
    pub barcode_instruction: BarcodeInstruction,
    /// Where to find the prep requirements.
    pub prep_guidance: PrepGuidance,
    /// Prep steps the item needs.
    pub prep_instruction_list: Option<Vec<PrepInstruction>>,
}

impl Decode for AsinPrepInstructions {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            asin: fields.required("ASIN")?,
            barcode_instruction: fields.required("BarcodeInstruction")?,
            prep_guidance: fields.required("PrepGuidance")?,
            prep_instruction_list: fields.optional_list("PrepInstructionList", "PrepInstruction")?,
        })
    }
}

/// Result of `GetPrepInstructionsForSKU`.
#[derive(Clone, Debug, PartialEq)]
pub struct PrepInstructionsForSku {
    /// Requirements for every SKU MWS could evaluate.
    pub sku_prep_instructions_list: Vec<SkuPrepInstructions>,
    /// SKUs MWS could not evaluate.
    pub invalid_sku_list: Option<Vec<InvalidSku>>,
}

impl Decode for PrepInstructionsForSku {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            sku_prep_instructions_list: fields
                .list("SKUPrepInstructionsList", "SKUPrepInstructions")?,
            invalid_sku_list: fields.optional_list("InvalidSKUList", "InvalidSKU")?,
        })
    }
}

/// Result of `GetPrepInstructionsForASIN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrepInstructionsForAsin {
    /// Requirements for every ASIN MWS could evaluate.
    pub asin_prep_instructions_list: Vec<AsinPrepInstructions>,
    /// ASINs MWS could not evaluate.
    pub invalid_asin_list: Option<Vec<InvalidAsin>>,
}

impl Decode for PrepInstructionsForAsin {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            asin_prep_instructions_list: fields
                .list("ASINPrepInstructionsList", "ASINPrepInstructions")?,
            invalid_asin_list: fields.optional_list("InvalidASINList", "InvalidASIN")?,
        })
    }
}

/// Result of `ConfirmPreorder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPreorderResult {
    /// The need-by date Amazon accepted.
    pub confirmed_need_by_date: Option<NaiveDate>,
    /// When the items become available for fulfillment.
    pub confirmed_fulfillable_date: Option<NaiveDate>,
}

impl Decode for ConfirmPreorderResult {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            confirmed_need_by_date: fields.optional("ConfirmedNeedByDate")?,
            confirmed_fulfillable_date: fields.optional("ConfirmedFulfillableDate")?,
        })
    }
}

/// Result of `GetPreorderInfo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreorderInfo {
    /// Whether any item in the shipment can be preordered.
    pub shipment_contains_preorderable_items: bool,
    /// Whether the shipment was already confirmed for preorder.
    pub shipment_confirmed_for_preorder: bool,
    /// The date the shipment must arrive by.
    pub need_by_date: Option<NaiveDate>,
    /// When the items become available for fulfillment.
    pub confirmed_fulfillable_date: Option<NaiveDate>,
}

impl Decode for PreorderInfo {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            shipment_contains_preorderable_items: fields
                .required("ShipmentContainsPreorderableItems")?,
            shipment_confirmed_for_preorder: fields.required("ShipmentConfirmedForPreorder")?,
            need_by_date: fields.optional("NeedByDate")?,
            confirmed_fulfillable_date: fields.optional("ConfirmedFulfillableDate")?,
        })
    }
}

closed_enum! {
    /// Who labels the items of an inbound shipment.
    pub enum LabelPrepPreference {
        /// The seller labels every item.
        SellerLabel => "SELLER_LABEL",
        /// Amazon labels items; items Amazon cannot label are rejected.
        AmazonLabelOnly => "AMAZON_LABEL_ONLY",
        /// Amazon labels what it can; the seller labels the rest.
        AmazonLabelPreferred => "AMAZON_LABEL_PREFERRED",
    }
}

closed_enum! {
    /// Labeling arrangement Amazon chose for a planned shipment.
    pub enum LabelPrepType {
        /// No labeling is required.
        NoLabel => "NO_LABEL",
        /// The seller labels the items.
        SellerLabel => "SELLER_LABEL",
        /// Amazon labels the items.
        AmazonLabel => "AMAZON_LABEL",
    }
}

closed_enum! {
    /// Condition of an inbound item.
    pub enum ItemCondition {
        /// New.
        NewItem => "NewItem",
        /// New, with a warranty.
        NewWithWarranty => "NewWithWarranty",
        /// New, original equipment manufacturer packaging.
        NewOem => "NewOEM",
        /// New, packaging opened.
        NewOpenBox => "NewOpenBox",
        /// Used, like new.
        UsedLikeNew => "UsedLikeNew",
        /// Used, very good.
        UsedVeryGood => "UsedVeryGood",
        /// Used, good.
        UsedGood => "UsedGood",
        /// Used, acceptable.
        UsedAcceptable => "UsedAcceptable",
        /// Used, poor.
        UsedPoor => "UsedPoor",
        /// Used, refurbished.
        UsedRefurbished => "UsedRefurbished",
        /// Collectible, like new.
        CollectibleLikeNew => "CollectibleLikeNew",
        /// Collectible, very good.
        CollectibleVeryGood => "CollectibleVeryGood",
        /// Collectible, good.
        CollectibleGood => "CollectibleGood",
        /// Collectible, acceptable.
        CollectibleAcceptable => "CollectibleAcceptable",
        /// Collectible, poor.
        CollectiblePoor => "CollectiblePoor",
        /// Refurbished, with a warranty.
        RefurbishedWithWarranty => "RefurbishedWithWarranty",
        /// Refurbished.
        Refurbished => "Refurbished",
        /// Sold through a club.
        Club => "Club",
    }
}

closed_enum! {
    /// Who performs a prep step.
    pub enum PrepOwner {
        /// Amazon preps the item, for a fee.
        Amazon => "AMAZON",
        /// The seller preps the item before shipping.
        Seller => "SELLER",
    }
}

closed_enum! {
    /// Status a seller may set on an inbound shipment.
    pub enum ShipmentStatus {
        /// The shipment is being assembled.
        Working => "WORKING",
        /// The shipment has left the seller.
        Shipped => "SHIPPED",
        /// The shipment was abandoned.
        Cancelled => "CANCELLED",
    }
}

closed_enum! {
    /// How box contents information will be provided.
    pub enum IntendedBoxContentsSource {
        /// No box contents information; Amazon charges a manual processing fee.
        NoBoxContents => "NONE",
        /// Through the cartons contents feed.
        Feed => "FEED",
        /// Through 2D barcodes on the cartons.
        TwoDBarcode => "2D_BARCODE",
    }
}

closed_enum! {
    /// Shipping mode of an inbound shipment.
    pub enum ShipmentType {
        /// Small parcel delivery.
        SmallParcel => "SP",
        /// Less than truckload or full truckload.
        LessThanTruckload => "LTL",
    }
}

closed_enum! {
    /// Unit of a package's dimensions.
    pub enum UnitOfMeasurement {
        /// Inches.
        Inches => "inches",
        /// Centimeters.
        Centimeters => "centimeters",
    }
}

closed_enum! {
    /// Unit of a weight.
    pub enum UnitOfWeight {
        /// Pounds.
        Pounds => "pounds",
        /// Kilograms.
        Kilograms => "kilograms",
    }
}

closed_enum! {
    /// Processing state of a shipment's transport request.
    pub enum TransportStatus {
        /// The request is being assembled.
        Working => "WORKING",
        /// Amazon is estimating the shipping cost.
        Estimating => "ESTIMATING",
        /// A cost estimate is available.
        Estimated => "ESTIMATED",
        /// Estimating failed.
        ErrorOnEstimating => "ERROR_ON_ESTIMATING",
        /// The estimate is being confirmed.
        Confirming => "CONFIRMING",
        /// The seller accepted the estimate.
        Confirmed => "CONFIRMED",
        /// Confirming failed.
        ErrorOnConfirming => "ERROR_ON_CONFIRMING",
        /// The confirmed request is being voided.
        Voiding => "VOIDING",
        /// The request was voided.
        Voided => "VOIDED",
        /// Voiding failed.
        ErrorInVoiding => "ERROR_IN_VOIDING",
        /// The request failed.
        Error => "ERROR",
    }
}

/// A postal address, sent as a ship-from address and returned as a
/// ship-to address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    /// Name of the person or business.
    pub name: String,
    /// Street address.
    pub address_line1: String,
    /// Additional street address information.
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// District or county.
    pub district_or_county: Option<String>,
    /// State or province code; required in the US, CA and IN.
    pub state_or_province_code: Option<String>,
    /// Two-letter country code.
    pub country_code: String,
    /// Postal code; required where the country uses one.
    pub postal_code: Option<String>,
}

impl Address {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("Name", self.name.as_str())
            .with("AddressLine1", self.address_line1.as_str())
            .with("AddressLine2", self.address_line2.as_deref())
            .with("City", self.city.as_str())
            .with("DistrictOrCounty", self.district_or_county.as_deref())
            .with("StateOrProvinceCode", self.state_or_province_code.as_deref())
            .with("CountryCode", self.country_code.as_str())
            .with("PostalCode", self.postal_code.as_deref())
    }
}

impl Decode for Address {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            name: fields.required("Name")?,
            address_line1: fields.required("AddressLine1")?,
            address_line2: fields.optional("AddressLine2")?,
            city: fields.required("City")?,
            district_or_county: fields.optional("DistrictOrCounty")?,
            state_or_province_code: fields.optional("StateOrProvinceCode")?,
            country_code: fields.required("CountryCode")?,
            postal_code: fields.optional("PostalCode")?,
        })
    }
}

/// A prep step and who performs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrepDetails {
    /// The prep step.
    pub prep_instruction: PrepInstruction,
    /// Who performs it.
    pub prep_owner: PrepOwner,
}

impl PrepDetails {
    fn to_parameters(self) -> Parameters {
        Parameters::new()
            .with("PrepInstruction", self.prep_instruction)
            .with("PrepOwner", self.prep_owner)
    }
}

impl Decode for PrepDetails {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            prep_instruction: fields.required("PrepInstruction")?,
            prep_owner: fields.required("PrepOwner")?,
        })
    }
}

fn prep_details_parameters(list: &[PrepDetails]) -> Vec<Parameters> {
    list.iter().copied().map(PrepDetails::to_parameters).collect()
}

/// One item of a `CreateInboundShipmentPlan` request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboundShipmentPlanRequestItem {
    /// The seller SKU.
    pub seller_sku: String,
    /// The item's ASIN.
    pub asin: Option<String>,
    /// The item's condition.
    pub condition: Option<ItemCondition>,
    /// Units to send.
    pub quantity: u32,
    /// Units per case, for case-packed items.
    pub quantity_in_case: Option<u32>,
    /// Prep steps and who performs them.
    pub prep_details_list: Vec<PrepDetails>,
}

impl InboundShipmentPlanRequestItem {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("SellerSKU", self.seller_sku.as_str())
            .with("ASIN", self.asin.as_deref())
            .with("Condition", self.condition)
            .with("Quantity", self.quantity)
            .with("QuantityInCase", self.quantity_in_case)
            .with(
                "PrepDetailsList.PrepDetails",
                prep_details_parameters(&self.prep_details_list),
            )
    }
}

/// Parameters of `CreateInboundShipmentPlan`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateInboundShipmentPlanParameters {
    /// Where the items ship from.
    pub ship_from_address: Address,
    /// Destination country; defaults to the ship-from country.
    pub ship_to_country_code: Option<String>,
    /// Destination subdivision, for marketplaces that need one (e.g. IN).
    pub ship_to_country_subdivision_code: Option<String>,
    /// Who labels the items.
    pub label_prep_preference: Option<LabelPrepPreference>,
    /// The items to plan.
    pub inbound_shipment_plan_request_items: Vec<InboundShipmentPlanRequestItem>,
}

impl CreateInboundShipmentPlanParameters {
    /// Renders the request as `ShipFromAddress.*` and
    /// `InboundShipmentPlanRequestItems.member.N.*` parameters.
    fn to_parameters(&self) -> Parameters {
        let items: Vec<Parameters> = self
            .inbound_shipment_plan_request_items
            .iter()
            .map(InboundShipmentPlanRequestItem::to_parameters)
            .collect();
        Parameters::new()
            .with("ShipFromAddress", self.ship_from_address.to_parameters())
            .with("ShipToCountryCode", self.ship_to_country_code.as_deref())
            .with(
                "ShipToCountrySubdivisionCode",
                self.ship_to_country_subdivision_code.as_deref(),
            )
            .with("LabelPrepPreference", self.label_prep_preference)
            .with("InboundShipmentPlanRequestItems.member", items)
    }
}

/// An item assigned to a planned shipment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundShipmentPlanItem {
    /// The seller SKU.
    pub seller_sku: String,
    /// Amazon's fulfillment network SKU for the item.
    pub fulfillment_network_sku: String,
    /// Units assigned to this shipment.
    pub quantity: u32,
    /// Prep steps and who performs them.
    pub prep_details_list: Option<Vec<PrepDetails>>,
}

impl Decode for InboundShipmentPlanItem {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            seller_sku: fields.required("SellerSKU")?,
            fulfillment_network_sku: fields.required("FulfillmentNetworkSKU")?,
            quantity: fields.required("Quantity")?,
            prep_details_list: fields.optional_list("PrepDetailsList", "PrepDetails")?,
        })
    }
}

/// One shipment Amazon proposes for a set of planned items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundShipmentPlan {
    /// Identifier to pass to `CreateInboundShipment`.
    pub shipment_id: String,
    /// The fulfillment center the shipment goes to.
    pub destination_fulfillment_center_id: String,
    /// Address of that fulfillment center.
    pub ship_to_address: Address,
    /// Labeling arrangement for the shipment.
    pub label_prep_type: LabelPrepType,
    /// Items assigned to the shipment.
    pub items: Vec<InboundShipmentPlanItem>,
}

impl Decode for InboundShipmentPlan {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            shipment_id: fields.required("ShipmentId")?,
            destination_fulfillment_center_id: fields.required("DestinationFulfillmentCenterId")?,
            ship_to_address: fields.required("ShipToAddress")?,
            label_prep_type: fields.required("LabelPrepType")?,
            items: fields.list("Items", "member")?,
        })
    }
}

/// Result of `CreateInboundShipmentPlan`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundShipmentPlans {
    /// The proposed shipments.
    pub inbound_shipment_plans: Vec<InboundShipmentPlan>,
}

impl Decode for InboundShipmentPlans {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            inbound_shipment_plans: fields.list("InboundShipmentPlans", "member")?,
        })
    }
}

/// Header of an inbound shipment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundShipmentHeader {
    /// A name the seller chooses for the shipment.
    pub shipment_name: String,
    /// Where the shipment ships from.
    pub ship_from_address: Address,
    /// The fulfillment center from the shipment plan.
    pub destination_fulfillment_center_id: String,
    /// Who labels the items.
    pub label_prep_preference: LabelPrepPreference,
    /// Whether items are case-packed.
    pub are_cases_required: Option<bool>,
    /// Status to set on the shipment.
    pub shipment_status: ShipmentStatus,
    /// How box contents information will be provided.
    pub intended_box_contents_source: Option<IntendedBoxContentsSource>,
}

impl InboundShipmentHeader {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("ShipmentName", self.shipment_name.as_str())
            .with("ShipFromAddress", self.ship_from_address.to_parameters())
            .with(
                "DestinationFulfillmentCenterId",
                self.destination_fulfillment_center_id.as_str(),
            )
            .with("LabelPrepPreference", self.label_prep_preference)
            .with("AreCasesRequired", self.are_cases_required)
            .with("ShipmentStatus", self.shipment_status)
            .with("IntendedBoxContentsSource", self.intended_box_contents_source)
    }
}

/// One item of an inbound shipment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboundShipmentItem {
    /// The seller SKU.
    pub seller_sku: String,
    /// Units being shipped.
    pub quantity_shipped: u32,
    /// Units per case, for case-packed items.
    pub quantity_in_case: Option<u32>,
    /// Prep steps and who performs them.
    pub prep_details_list: Vec<PrepDetails>,
}

impl InboundShipmentItem {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("SellerSKU", self.seller_sku.as_str())
            .with("QuantityShipped", self.quantity_shipped)
            .with("QuantityInCase", self.quantity_in_case)
            .with(
                "PrepDetailsList.PrepDetails",
                prep_details_parameters(&self.prep_details_list),
            )
    }
}

/// Parameters of `CreateInboundShipment` and `UpdateInboundShipment`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundShipmentParameters {
    /// Shipment identifier from the shipment plan.
    pub shipment_id: String,
    /// The shipment header.
    pub inbound_shipment_header: InboundShipmentHeader,
    /// Items to create or update; may be empty on update.
    pub inbound_shipment_items: Vec<InboundShipmentItem>,
}

impl InboundShipmentParameters {
    fn to_parameters(&self) -> Parameters {
        let items: Vec<Parameters> = self
            .inbound_shipment_items
            .iter()
            .map(InboundShipmentItem::to_parameters)
            .collect();
        Parameters::new()
            .with("ShipmentId", self.shipment_id.as_str())
            .with("InboundShipmentHeader", self.inbound_shipment_header.to_parameters())
            .with("InboundShipmentItems.member", items)
    }
}

/// Result of `CreateInboundShipment` and `UpdateInboundShipment`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipmentIdResult {
    /// The shipment that was created or updated.
    pub shipment_id: String,
}

impl Decode for ShipmentIdResult {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            shipment_id: fields.required("ShipmentId")?,
        })
    }
}

/// Package dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Unit of all three measurements.
    pub unit: UnitOfMeasurement,
    /// Length.
    pub length: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Dimensions {
    fn to_parameters(self) -> Parameters {
        Parameters::new()
            .with("Unit", self.unit)
            .with("Length", self.length)
            .with("Width", self.width)
            .with("Height", self.height)
    }
}

/// A weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weight {
    /// Unit of the value.
    pub unit: UnitOfWeight,
    /// The weight.
    pub value: f64,
}

impl Weight {
    fn to_parameters(self) -> Parameters {
        Parameters::new()
            .with("Unit", self.unit)
            .with("Value", self.value)
    }
}

/// A package shipped with an Amazon-partnered carrier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartneredSmallParcelPackage {
    /// Package dimensions.
    pub dimensions: Dimensions,
    /// Package weight.
    pub weight: Weight,
}

impl PartneredSmallParcelPackage {
    fn to_parameters(self) -> Parameters {
        Parameters::new()
            .with("Dimensions", self.dimensions.to_parameters())
            .with("Weight", self.weight.to_parameters())
    }
}

/// Small parcel shipment with an Amazon-partnered carrier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartneredSmallParcelData {
    /// Carrier name; Amazon picks one when omitted.
    pub carrier_name: Option<String>,
    /// The packages.
    pub package_list: Vec<PartneredSmallParcelPackage>,
}

/// Small parcel shipment with a carrier of the seller's choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NonPartneredSmallParcelData {
    /// The carrier.
    pub carrier_name: String,
    /// Tracking number of each package.
    pub tracking_ids: Vec<String>,
}

/// Contact for an Amazon-partnered LTL pickup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    /// Contact name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Fax number.
    pub fax: String,
}

impl Contact {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with("Name", self.name.as_str())
            .with("Phone", self.phone.as_str())
            .with("Email", self.email.as_str())
            .with("Fax", self.fax.as_str())
    }
}

/// LTL shipment with an Amazon-partnered carrier.
#[derive(Clone, Debug, PartialEq)]
pub struct PartneredLtlData {
    /// Who the carrier contacts for pickup.
    pub contact: Contact,
    /// Number of boxes in the shipment.
    pub box_count: u32,
    /// Freight class, e.g. `50` or `92.5`.
    pub seller_freight_class: Option<String>,
    /// The date the freight is ready for pickup.
    pub freight_ready_date: NaiveDate,
    /// Total weight of the shipment.
    pub total_weight: Option<Weight>,
    /// Declared value of the shipment.
    pub seller_declared_value: Option<Amount>,
}

/// LTL shipment with a carrier of the seller's choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NonPartneredLtlData {
    /// The carrier.
    pub carrier_name: String,
    /// The carrier's PRO number for the shipment.
    pub pro_number: String,
}

/// Transport information for `PutTransportContent`.
///
/// The variant determines the `IsPartnered` and `ShipmentType` parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum TransportDetails {
    /// Small parcel, Amazon-partnered carrier.
    PartneredSmallParcel(PartneredSmallParcelData),
    /// Small parcel, seller's carrier.
    NonPartneredSmallParcel(NonPartneredSmallParcelData),
    /// LTL, Amazon-partnered carrier.
    PartneredLtl(PartneredLtlData),
    /// LTL, seller's carrier.
    NonPartneredLtl(NonPartneredLtlData),
}

impl TransportDetails {
    /// Whether the carrier is an Amazon partner.
    #[must_use]
    pub const fn is_partnered(&self) -> bool {
        matches!(self, Self::PartneredSmallParcel(_) | Self::PartneredLtl(_))
    }

    /// The shipping mode.
    #[must_use]
    pub const fn shipment_type(&self) -> ShipmentType {
        match self {
            Self::PartneredSmallParcel(_) | Self::NonPartneredSmallParcel(_) => {
                ShipmentType::SmallParcel
            }
            Self::PartneredLtl(_) | Self::NonPartneredLtl(_) => ShipmentType::LessThanTruckload,
        }
    }

    fn to_parameters(&self) -> Parameters {
        match self {
            Self::PartneredSmallParcel(data) => {
                let packages: Vec<Parameters> = data
                    .package_list
                    .iter()
                    .copied()
                    .map(PartneredSmallParcelPackage::to_parameters)
                    .collect();
                Parameters::new().with(
                    "PartneredSmallParcelData",
                    Parameters::new()
                        .with("CarrierName", data.carrier_name.as_deref())
                        .with("PackageList.member", packages),
                )
            }
            Self::NonPartneredSmallParcel(data) => {
                let packages: Vec<Parameters> = data
                    .tracking_ids
                    .iter()
                    .map(|id| Parameters::new().with("TrackingId", id))
                    .collect();
                Parameters::new().with(
                    "NonPartneredSmallParcelData",
                    Parameters::new()
                        .with("CarrierName", data.carrier_name.as_str())
                        .with("PackageList.member", packages),
                )
            }
            Self::PartneredLtl(data) => Parameters::new().with(
                "PartneredLtlData",
                Parameters::new()
                    .with("Contact", data.contact.to_parameters())
                    .with("BoxCount", data.box_count)
                    .with("SellerFreightClass", data.seller_freight_class.as_deref())
                    .with(
                        "FreightReadyDate",
                        data.freight_ready_date.format("%Y-%m-%d").to_string(),
                    )
                    .with("TotalWeight", data.total_weight.map(Weight::to_parameters))
                    .with(
                        "SellerDeclaredValue",
                        data.seller_declared_value.as_ref().map(Amount::to_parameters),
                    ),
            ),
            Self::NonPartneredLtl(data) => Parameters::new().with(
                "NonPartneredLtlData",
                Parameters::new()
                    .with("CarrierName", data.carrier_name.as_str())
                    .with("ProNumber", data.pro_number.as_str()),
            ),
        }
    }
}

/// Transport state after `PutTransportContent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportResult {
    /// Processing state of the transport request.
    pub transport_status: TransportStatus,
}

impl Decode for TransportResult {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            transport_status: fields.required("TransportStatus")?,
        })
    }
}

/// Result of `PutTransportContent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PutTransportContentResult {
    /// The transport state.
    pub transport_result: TransportResult,
}

impl Decode for PutTransportContentResult {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            transport_result: fields.required("TransportResult")?,
        })
    }
}

/// Client for the Fulfillment Inbound Shipment section.
#[derive(Clone, Debug)]
pub struct FulfillmentInboundShipment {
    client: Arc<HttpClient>,
}

impl FulfillmentInboundShipment {
    /// Creates the section over a shared gateway.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    fn spec(action: &str) -> RequestSpec {
        RequestSpec::new(
            Resource::FulfillmentInboundShipment,
            FULFILLMENT_INBOUND_SHIPMENT_API_VERSION,
            action,
        )
    }

    async fn call<T: Decode>(&self, spec: RequestSpec) -> Result<(T, RequestMeta), GatewayError> {
        self.client.request(HttpMethod::Post, spec).await
    }

    /// Returns inbound guidance for up to 50 seller SKUs.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_inbound_guidance_for_sku(
        &self,
        seller_sku_list: &[&str],
        marketplace_id: &str,
    ) -> Result<(InboundGuidanceForSku, RequestMeta), GatewayError> {
        self.call(
            Self::spec("GetInboundGuidanceForSKU")
                .parameter("SellerSKUList.Id", seller_sku_list.to_vec())
                .parameter("MarketplaceId", marketplace_id),
        )
        .await
    }

    /// Returns inbound guidance for up to 50 ASINs.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_inbound_guidance_for_asin(
        &self,
        asin_list: &[&str],
        marketplace_id: &str,
    ) -> Result<(InboundGuidanceForAsin, RequestMeta), GatewayError> {
        self.call(
            Self::spec("GetInboundGuidanceForASIN")
                .parameter("ASINList.Id", asin_list.to_vec())
                .parameter("MarketplaceId", marketplace_id),
        )
        .await
    }

    /// Returns labeling and prep requirements for seller SKUs.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_prep_instructions_for_sku(
        &self,
        seller_sku_list: &[&str],
        ship_to_country_code: &str,
    ) -> Result<(PrepInstructionsForSku, RequestMeta), GatewayError> {
        self.call(
            Self::spec("GetPrepInstructionsForSKU")
                .parameter("SellerSKUList.Id", seller_sku_list.to_vec())
                .parameter("ShipToCountryCode", ship_to_country_code),
        )
        .await
    }

    /// Returns labeling and prep requirements for ASINs.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_prep_instructions_for_asin(
        &self,
        asin_list: &[&str],
        ship_to_country_code: &str,
    ) -> Result<(PrepInstructionsForAsin, RequestMeta), GatewayError> {
        self.call(
            Self::spec("GetPrepInstructionsForASIN")
                .parameter("ASINList.Id", asin_list.to_vec())
                .parameter("ShipToCountryCode", ship_to_country_code),
        )
        .await
    }

    /// Confirms a shipment for preorder.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn confirm_preorder(
        &self,
        shipment_id: &str,
        need_by_date: DateTime<Utc>,
    ) -> Result<(ConfirmPreorderResult, RequestMeta), GatewayError> {
        self.call(
            Self::spec("ConfirmPreorder")
                .parameter("ShipmentId", shipment_id)
                .parameter("NeedByDate", need_by_date),
        )
        .await
    }

    /// Returns preorder information for a shipment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_preorder_info(
        &self,
        shipment_id: &str,
    ) -> Result<(PreorderInfo, RequestMeta), GatewayError> {
        self.call(Self::spec("GetPreorderInfo").parameter("ShipmentId", shipment_id))
            .await
    }

    /// Asks Amazon how to split a set of items into inbound shipments.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn create_inbound_shipment_plan(
        &self,
        parameters: &CreateInboundShipmentPlanParameters,
    ) -> Result<(InboundShipmentPlans, RequestMeta), GatewayError> {
        self.call(Self::spec("CreateInboundShipmentPlan").parameters_from(parameters.to_parameters()))
            .await
    }

    /// Creates an inbound shipment from a shipment plan.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn create_inbound_shipment(
        &self,
        parameters: &InboundShipmentParameters,
    ) -> Result<(ShipmentIdResult, RequestMeta), GatewayError> {
        self.call(Self::spec("CreateInboundShipment").parameters_from(parameters.to_parameters()))
            .await
    }

    /// Updates the header or items of an existing inbound shipment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn update_inbound_shipment(
        &self,
        parameters: &InboundShipmentParameters,
    ) -> Result<(ShipmentIdResult, RequestMeta), GatewayError> {
        self.call(Self::spec("UpdateInboundShipment").parameters_from(parameters.to_parameters()))
            .await
    }

    /// Sends transport information for a shipment.
    ///
    /// `IsPartnered` and `ShipmentType` follow from the [`TransportDetails`]
    /// variant.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn put_transport_content(
        &self,
        shipment_id: &str,
        transport_details: &TransportDetails,
    ) -> Result<(PutTransportContentResult, RequestMeta), GatewayError> {
        self.call(
            Self::spec("PutTransportContent")
                .parameter("ShipmentId", shipment_id)
                .parameter("IsPartnered", transport_details.is_partnered())
                .parameter("ShipmentType", transport_details.shipment_type())
                .parameter("TransportDetails", transport_details.to_parameters()),
        )
        .await
    }

    /// Returns the operational status of the section.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the call fails or the response is malformed.
    pub async fn get_service_status(
        &self,
    ) -> Result<(ServiceStatusResponse, RequestMeta), GatewayError> {
        get_service_status(
            &self.client,
            Resource::FulfillmentInboundShipment,
            FULFILLMENT_INBOUND_SHIPMENT_API_VERSION,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::{client_with, empty_response, fixture, form_fields};
    use chrono::TimeZone;

    fn envelope(action: &str, result: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\
             <{action}Response xmlns=\"http://mws.amazonaws.com/FulfillmentInboundShipment/2010-10-01/\">\
             <{action}Result>{result}</{action}Result>\
             <ResponseMetadata><RequestId>1e8f2b2f</RequestId></ResponseMetadata>\
             </{action}Response>"
        )
    }

    #[tokio::test]
    async fn test_inbound_guidance_for_sku() {
        let body = envelope(
            "GetInboundGuidanceForSKU",
            "<SKUInboundGuidanceList>\
               <SKUInboundGuidance>\
                 <SellerSKU>SKU00001</SellerSKU><ASIN>B00SKU1</ASIN>\
                 <InboundGuidance>InboundNotRecommended</InboundGuidance>\
                 <GuidanceReasonList><GuidanceReason>SlowMovingASIN</GuidanceReason></GuidanceReasonList>\
               </SKUInboundGuidance>\
               <SKUInboundGuidance>\
                 <SellerSKU>SKU00002</SellerSKU><ASIN>B00SKU2</ASIN>\
                 <InboundGuidance>InboundOK</InboundGuidance>\
               </SKUInboundGuidance>\
             </SKUInboundGuidanceList>\
             <InvalidSKUList>\
               <InvalidSKU><SellerSKU>SKU00003</SellerSKU><ErrorReason>DoesNotExist</ErrorReason></InvalidSKU>\
             </InvalidSKUList>",
        );
        let (client, transport) = client_with([fixture(&body)]);

        let (result, meta) = FulfillmentInboundShipment::new(client)
            .get_inbound_guidance_for_sku(&["SKU00001", "SKU00002", "SKU00003"], "A2EUQ1WTGCTBG2")
            .await
            .unwrap();

        let guidance = &result.sku_inbound_guidance_list;
        assert_eq!(guidance.len(), 2);
        assert_eq!(guidance[0].inbound_guidance, InboundGuidance::InboundNotRecommended);
        assert_eq!(
            guidance[0].guidance_reason_list,
            Some(vec![GuidanceReason::SlowMovingAsin])
        );
        assert_eq!(guidance[1].inbound_guidance, InboundGuidance::InboundOk);
        assert!(guidance[1].guidance_reason_list.is_none());
        assert_eq!(result.invalid_sku_list.unwrap()[0].error_reason, "DoesNotExist");
        assert_eq!(meta.quota_remaining, Some(999.0));

        let request = &transport.requests()[0];
        assert_eq!(
            request.url,
            "https://mws.amazonservices.ca/FulfillmentInboundShipment/2010-10-01"
        );
        let form = form_fields(request.body.as_deref());
        assert_eq!(form["SellerSKUList.Id.1"], "SKU00001");
        assert_eq!(form["SellerSKUList.Id.3"], "SKU00003");
        assert_eq!(form["MarketplaceId"], "A2EUQ1WTGCTBG2");
    }

    #[tokio::test]
    async fn test_unknown_guidance_reason_names_path() {
        let body = envelope(
            "GetInboundGuidanceForASIN",
            "<ASINInboundGuidanceList>\
               <ASINInboundGuidance><ASIN>B00A</ASIN><InboundGuidance>InboundOK</InboundGuidance></ASINInboundGuidance>\
               <ASINInboundGuidance><ASIN>B00B</ASIN><InboundGuidance>Maybe</InboundGuidance></ASINInboundGuidance>\
             </ASINInboundGuidanceList>",
        );
        let (client, _) = client_with([fixture(&body)]);

        let error = FulfillmentInboundShipment::new(client)
            .get_inbound_guidance_for_asin(&["B00A", "B00B"], "A2EUQ1WTGCTBG2")
            .await
            .unwrap_err();

        match error {
            GatewayError::Parsing(e) => assert_eq!(
                e.path,
                "$.GetInboundGuidanceForASINResponse.GetInboundGuidanceForASINResult\
                 .ASINInboundGuidanceList.ASINInboundGuidance[1].InboundGuidance"
            ),
            other => panic!("expected a parsing error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prep_instructions_for_sku() {
        let body = envelope(
            "GetPrepInstructionsForSKU",
            "<SKUPrepInstructionsList><SKUPrepInstructions>\
               <SellerSKU>ca_001</SellerSKU><ASIN>B0011VECH4</ASIN>\
               <BarcodeInstruction>RequiresFNSKULabel</BarcodeInstruction>\
               <PrepGuidance>SeePrepInstructionsList</PrepGuidance>\
               <PrepInstructionList>\
                 <PrepInstruction>Polybagging</PrepInstruction>\
                 <PrepInstruction>Taping</PrepInstruction>\
               </PrepInstructionList>\
               <AmazonPrepFeesDetailsList><AmazonPrepFeesDetails>\
                 <PrepInstruction>Polybagging</PrepInstruction>\
                 <FeePerUnit><CurrencyCode>CAD</CurrencyCode><Value>0.2</Value></FeePerUnit>\
               </AmazonPrepFeesDetails></AmazonPrepFeesDetailsList>\
             </SKUPrepInstructions></SKUPrepInstructionsList>\
             <InvalidSKUList/>",
        );
        let (client, transport) = client_with([fixture(&body)]);

        let (result, _) = FulfillmentInboundShipment::new(client)
            .get_prep_instructions_for_sku(&["ca_001"], "CA")
            .await
            .unwrap();

        let item = &result.sku_prep_instructions_list[0];
        assert_eq!(item.barcode_instruction, BarcodeInstruction::RequiresFnskuLabel);
        assert_eq!(item.prep_guidance, PrepGuidance::SeePrepInstructionsList);
        assert_eq!(
            item.prep_instruction_list,
            Some(vec![PrepInstruction::Polybagging, PrepInstruction::Taping])
        );
        let fees = item.amazon_prep_fees_details_list.as_ref().unwrap();
        assert_eq!(fees[0].fee_per_unit.currency_code, "CAD");
        assert_eq!(result.invalid_sku_list, Some(Vec::new()));

        let form = form_fields(transport.requests()[0].body.as_deref());
        assert_eq!(form["ShipToCountryCode"], "CA");
        assert_eq!(form["SellerSKUList.Id.1"], "ca_001");
    }

    #[tokio::test]
    async fn test_prep_instructions_for_asin() {
        let body = envelope(
            "GetPrepInstructionsForASIN",
            "<ASINPrepInstructionsList><ASINPrepInstructions>\
               <ASIN>B00005N5PF</ASIN>\
               <BarcodeInstruction>MustProvideSellerSKU</BarcodeInstruction>\
               <PrepGuidance>ConsultHelpDocuments</PrepGuidance>\
             </ASINPrepInstructions></ASINPrepInstructionsList>\
             <InvalidASINList><InvalidASIN><ASIN>B0INVALIDF</ASIN><ErrorReason>DoesNotExist</ErrorReason></InvalidASIN></InvalidASINList>",
        );
        let (client, transport) = client_with([fixture(&body)]);

        let (result, _) = FulfillmentInboundShipment::new(client)
            .get_prep_instructions_for_asin(&["B00005N5PF", "B0INVALIDF"], "US")
            .await
            .unwrap();

        assert_eq!(result.asin_prep_instructions_list[0].asin, "B00005N5PF");
        assert!(result.asin_prep_instructions_list[0].prep_instruction_list.is_none());
        assert_eq!(result.invalid_asin_list.unwrap()[0].asin, "B0INVALIDF");

        let form = form_fields(transport.requests()[0].body.as_deref());
        assert_eq!(form["ASINList.Id.2"], "B0INVALIDF");
    }

    #[tokio::test]
    async fn test_confirm_preorder_sends_timestamp() {
        let body = envelope(
            "ConfirmPreorder",
            "<ConfirmedNeedByDate>2015-12-27</ConfirmedNeedByDate>\
             <ConfirmedFulfillableDate>2015-12-31</ConfirmedFulfillableDate>",
        );
        let (client, transport) = client_with([fixture(&body)]);
        let need_by = Utc.with_ymd_and_hms(2015, 12, 27, 0, 0, 0).unwrap();

        let (result, _) = FulfillmentInboundShipment::new(client)
            .confirm_preorder("FBA03JH6BW", need_by)
            .await
            .unwrap();

        assert_eq!(result.confirmed_need_by_date, NaiveDate::from_ymd_opt(2015, 12, 27));
        assert_eq!(result.confirmed_fulfillable_date, NaiveDate::from_ymd_opt(2015, 12, 31));

        let form = form_fields(transport.requests()[0].body.as_deref());
        assert_eq!(form["ShipmentId"], "FBA03JH6BW");
        assert_eq!(form["NeedByDate"], "2015-12-27T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_get_preorder_info() {
        let body = envelope(
            "GetPreorderInfo",
            "<ShipmentContainsPreorderableItems>true</ShipmentContainsPreorderableItems>\
             <ShipmentConfirmedForPreorder>false</ShipmentConfirmedForPreorder>\
             <NeedByDate>2015-12-27</NeedByDate>",
        );
        let (client, _) = client_with([fixture(&body)]);

        let (info, _) = FulfillmentInboundShipment::new(client)
            .get_preorder_info("FBA03JH6BW")
            .await
            .unwrap();

        assert!(info.shipment_contains_preorderable_items);
        assert!(!info.shipment_confirmed_for_preorder);
        assert_eq!(info.need_by_date, NaiveDate::from_ymd_opt(2015, 12, 27));
        assert!(info.confirmed_fulfillable_date.is_none());
    }

    fn ship_from() -> Address {
        Address {
            name: "Seller Warehouse".to_string(),
            address_line1: "1 Main St".to_string(),
            city: "Toronto".to_string(),
            state_or_province_code: Some("ON".to_string()),
            country_code: "CA".to_string(),
            postal_code: Some("M5V 2T6".to_string()),
            ..Address::default()
        }
    }

    #[tokio::test]
    async fn test_create_inbound_shipment_plan_flattens_nested_items() {
        let body = envelope(
            "CreateInboundShipmentPlan",
            "<InboundShipmentPlans><member>\
               <ShipmentId>FBA2DPXHDR</ShipmentId>\
               <DestinationFulfillmentCenterId>YYZ1</DestinationFulfillmentCenterId>\
               <ShipToAddress><Name>YYZ1</Name><AddressLine1>6363 Millcreek Dr</AddressLine1>\
                 <City>Mississauga</City><CountryCode>CA</CountryCode></ShipToAddress>\
               <LabelPrepType>SELLER_LABEL</LabelPrepType>\
               <Items><member>\
                 <SellerSKU>SKU-1</SellerSKU><FulfillmentNetworkSKU>X001</FulfillmentNetworkSKU>\
                 <Quantity>12</Quantity>\
                 <PrepDetailsList><PrepDetails><PrepInstruction>Taping</PrepInstruction>\
                   <PrepOwner>SELLER</PrepOwner></PrepDetails></PrepDetailsList>\
               </member></Items>\
             </member></InboundShipmentPlans>",
        );
        let (client, transport) = client_with([fixture(&body)]);
        let parameters = CreateInboundShipmentPlanParameters {
            ship_from_address: ship_from(),
            label_prep_preference: Some(LabelPrepPreference::SellerLabel),
            inbound_shipment_plan_request_items: vec![InboundShipmentPlanRequestItem {
                seller_sku: "SKU-1".to_string(),
                condition: Some(ItemCondition::NewItem),
                quantity: 12,
                prep_details_list: vec![PrepDetails {
                    prep_instruction: PrepInstruction::Taping,
                    prep_owner: PrepOwner::Seller,
                }],
                ..InboundShipmentPlanRequestItem::default()
            }],
            ..CreateInboundShipmentPlanParameters::default()
        };

        let (result, _) = FulfillmentInboundShipment::new(client)
            .create_inbound_shipment_plan(&parameters)
            .await
            .unwrap();

        let plan = &result.inbound_shipment_plans[0];
        assert_eq!(plan.shipment_id, "FBA2DPXHDR");
        assert_eq!(plan.ship_to_address.city, "Mississauga");
        assert!(plan.ship_to_address.postal_code.is_none());
        assert_eq!(plan.label_prep_type, LabelPrepType::SellerLabel);
        assert_eq!(plan.items[0].quantity, 12);
        assert_eq!(
            plan.items[0].prep_details_list.as_deref().unwrap()[0].prep_owner,
            PrepOwner::Seller
        );

        let form = form_fields(transport.requests()[0].body.as_deref());
        assert_eq!(form["ShipFromAddress.Name"], "Seller Warehouse");
        assert_eq!(form["ShipFromAddress.PostalCode"], "M5V 2T6");
        assert!(!form.contains_key("ShipFromAddress.AddressLine2"));
        assert!(!form.contains_key("ShipToCountryCode"));
        assert_eq!(form["LabelPrepPreference"], "SELLER_LABEL");
        assert_eq!(form["InboundShipmentPlanRequestItems.member.1.SellerSKU"], "SKU-1");
        assert_eq!(form["InboundShipmentPlanRequestItems.member.1.Condition"], "NewItem");
        assert_eq!(form["InboundShipmentPlanRequestItems.member.1.Quantity"], "12");
        assert_eq!(
            form["InboundShipmentPlanRequestItems.member.1.PrepDetailsList.PrepDetails.1.PrepOwner"],
            "SELLER"
        );
    }

    #[tokio::test]
    async fn test_update_inbound_shipment_sends_header_without_items() {
        let body = envelope("UpdateInboundShipment", "<ShipmentId>FBA2DPXHDR</ShipmentId>");
        let (client, transport) = client_with([fixture(&body)]);
        let parameters = InboundShipmentParameters {
            shipment_id: "FBA2DPXHDR".to_string(),
            inbound_shipment_header: InboundShipmentHeader {
                shipment_name: "March restock".to_string(),
                ship_from_address: ship_from(),
                destination_fulfillment_center_id: "YYZ1".to_string(),
                label_prep_preference: LabelPrepPreference::SellerLabel,
                are_cases_required: None,
                shipment_status: ShipmentStatus::Cancelled,
                intended_box_contents_source: None,
            },
            inbound_shipment_items: Vec::new(),
        };

        let (result, _) = FulfillmentInboundShipment::new(client)
            .update_inbound_shipment(&parameters)
            .await
            .unwrap();

        assert_eq!(result.shipment_id, "FBA2DPXHDR");
        let form = form_fields(transport.requests()[0].body.as_deref());
        assert_eq!(form["Action"], "UpdateInboundShipment");
        assert_eq!(form["InboundShipmentHeader.ShipmentStatus"], "CANCELLED");
        assert_eq!(form["InboundShipmentHeader.ShipFromAddress.City"], "Toronto");
        assert!(!form.keys().any(|k| k.starts_with("InboundShipmentItems")));
    }

    #[test]
    fn test_transport_details_determine_partnering_and_type() {
        let partnered = TransportDetails::PartneredSmallParcel(PartneredSmallParcelData::default());
        assert!(partnered.is_partnered());
        assert_eq!(partnered.shipment_type(), ShipmentType::SmallParcel);

        let ltl = TransportDetails::NonPartneredLtl(NonPartneredLtlData::default());
        assert!(!ltl.is_partnered());
        assert_eq!(ltl.shipment_type(), ShipmentType::LessThanTruckload);
    }

    #[tokio::test]
    async fn test_put_transport_content_partnered_ltl() {
        let body = envelope(
            "PutTransportContent",
            "<TransportResult><TransportStatus>ESTIMATING</TransportStatus></TransportResult>",
        );
        let (client, transport) = client_with([fixture(&body)]);
        let details = TransportDetails::PartneredLtl(PartneredLtlData {
            contact: Contact {
                name: "Jo".to_string(),
                phone: "555-0100".to_string(),
                email: "jo@example.com".to_string(),
                fax: "555-0101".to_string(),
            },
            box_count: 40,
            seller_freight_class: None,
            freight_ready_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            total_weight: Some(Weight {
                unit: UnitOfWeight::Kilograms,
                value: 310.5,
            }),
            seller_declared_value: None,
        });

        let (result, _) = FulfillmentInboundShipment::new(client)
            .put_transport_content("FBA2DPXHDR", &details)
            .await
            .unwrap();

        assert_eq!(result.transport_result.transport_status, TransportStatus::Estimating);
        let form = form_fields(transport.requests()[0].body.as_deref());
        assert_eq!(form["IsPartnered"], "true");
        assert_eq!(form["ShipmentType"], "LTL");
        assert_eq!(form["TransportDetails.PartneredLtlData.Contact.Email"], "jo@example.com");
        assert_eq!(form["TransportDetails.PartneredLtlData.BoxCount"], "40");
        assert_eq!(form["TransportDetails.PartneredLtlData.FreightReadyDate"], "2020-06-01");
        assert_eq!(form["TransportDetails.PartneredLtlData.TotalWeight.Value"], "310.5");
        assert!(!form.contains_key("TransportDetails.PartneredLtlData.SellerFreightClass"));
    }

    #[tokio::test]
    async fn test_invalid_response_is_a_parsing_error() {
        let (client, _) = client_with([empty_response()]);

        let error = FulfillmentInboundShipment::new(client)
            .get_preorder_info("FBA03JH6BW")
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::Parsing(ref e) if e.path == "$"));
    }
}
