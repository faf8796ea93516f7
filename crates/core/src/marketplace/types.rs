//! Types for the marketplace supplier API.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scan::PayloadKind;

/// Marketplace deployment selector.
///
/// The sandbox accepts only tokens issued with test scope.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Base URL of the supplier API for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://suppliers-api.wildberries.ru",
            Environment::Sandbox => "https://suppliers-api-sandbox.wildberries.ru",
        }
    }
}

/// Rendering format for stickers and QR codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LabelFormat {
    Png,
    Svg,
    ZplVertical,
    ZplHorizontal,
}

impl LabelFormat {
    /// Value of the `type` query parameter the API expects.
    pub fn api_value(&self) -> &'static str {
        match self {
            LabelFormat::Png => "png",
            LabelFormat::Svg => "svg",
            LabelFormat::ZplVertical => "zplv",
            LabelFormat::ZplHorizontal => "zplh",
        }
    }

    /// Content type of the blob returned for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            LabelFormat::Png => "image/png",
            LabelFormat::Svg => "image/svg+xml",
            LabelFormat::ZplVertical | LabelFormat::ZplHorizontal => "application/zpl",
        }
    }

    pub fn is_zpl(&self) -> bool {
        matches!(self, LabelFormat::ZplVertical | LabelFormat::ZplHorizontal)
    }
}

/// Supported sticker dimensions in millimeters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StickerSize {
    #[default]
    #[serde(rename = "58x40")]
    W58H40,
    #[serde(rename = "40x30")]
    W40H30,
}

impl StickerSize {
    pub fn width(&self) -> u32 {
        match self {
            StickerSize::W58H40 => 58,
            StickerSize::W40H30 => 40,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            StickerSize::W58H40 => 40,
            StickerSize::W40H30 => 30,
        }
    }
}

/// Metadata field attachable to an order, validated server-side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetaKind {
    Sgtin,
    Uin,
    Imei,
    Gtin,
    Expiration,
}

impl MetaKind {
    /// Path segment of the order metadata endpoint for this field.
    pub fn path_segment(&self) -> &'static str {
        match self {
            MetaKind::Sgtin => "sgtin",
            MetaKind::Uin => "uin",
            MetaKind::Imei => "imei",
            MetaKind::Gtin => "gtin",
            MetaKind::Expiration => "expiration",
        }
    }
}

impl From<PayloadKind> for MetaKind {
    fn from(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::Sgtin => MetaKind::Sgtin,
            PayloadKind::Uin => MetaKind::Uin,
            PayloadKind::Imei => MetaKind::Imei,
            PayloadKind::Gtin => MetaKind::Gtin,
        }
    }
}

/// A fulfillment order (assembly task) as returned by the supplier API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Marketplace-side order UID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Supply the order is attached to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_id: Option<String>,
    /// Seller's article for the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    /// Product barcodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skus: Vec<String>,
    /// Price in minor currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_price: Option<i64>,
    /// Office the order must be shipped through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_id: Option<i64>,
}

/// Time window and cursor for a single-page order fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersQuery {
    /// Window start, unix seconds.
    pub date_from: i64,
    /// Window end, unix seconds.
    pub date_to: i64,
    #[serde(default = "default_orders_limit")]
    pub limit: u32,
    /// Page cursor from a previous response, 0 for the first page.
    #[serde(default)]
    pub next: i64,
}

fn default_orders_limit() -> u32 {
    1000
}

/// One page of orders plus the cursor for the following page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub next: i64,
}

/// Metadata currently attached to an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderMeta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sgtins: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    /// Expiration date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

/// A box (trbx) registered on a supply for pickup-point delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyBox {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_ids: Vec<i64>,
}

/// An office that requires an access pass for drop-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassOffice {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// An issued access pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    pub id: i64,
    pub office_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<NaiveDate>,
}

/// Request to issue a new access pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePassRequest {
    pub office_id: i64,
    pub car_number: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
}

/// An ephemeral binary artifact (sticker sheet, QR code) handed back to the
/// caller for immediate download or printing. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBlob {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Errors from marketplace API operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketplaceError {
    /// No API token configured; raised before any network call is attempted.
    #[error("API token is not configured")]
    MissingToken,

    #[error("Marketplace connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    /// The API answered with an error status.
    #[error("Marketplace API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse marketplace response: {0}")]
    InvalidResponse(String),
}

/// Capability interface over the marketplace's order-fulfillment REST API.
///
/// Operations are not retried and not idempotent at this layer: calling one
/// twice issues the remote call twice.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Replace the bearer token used for subsequent requests. `None` clears
    /// the token, after which every operation fails with `MissingToken`.
    async fn set_token(&self, token: Option<String>);

    /// Orders awaiting assembly.
    async fn new_orders(&self) -> Result<Vec<Order>, MarketplaceError>;

    /// One page of orders in a time window.
    async fn orders(&self, query: &OrdersQuery) -> Result<OrdersPage, MarketplaceError>;

    /// Create a supply, optionally pinned to a destination office. Returns
    /// the new supply id.
    async fn create_supply(
        &self,
        destination_office_id: Option<i64>,
    ) -> Result<String, MarketplaceError>;

    /// Attach an order to a supply; the order moves to assembly status.
    async fn add_order_to_supply(
        &self,
        supply_id: &str,
        order_id: i64,
    ) -> Result<(), MarketplaceError>;

    /// Orders currently attached to a supply.
    async fn supply_orders(&self, supply_id: &str) -> Result<Vec<Order>, MarketplaceError>;

    /// Close the supply and hand its orders over to delivery.
    async fn deliver_supply(&self, supply_id: &str) -> Result<(), MarketplaceError>;

    /// Gate QR code for a closed supply.
    async fn supply_qr(
        &self,
        supply_id: &str,
        format: LabelFormat,
    ) -> Result<LabelBlob, MarketplaceError>;

    /// Register `amount` new boxes on a supply. Returns the new box ids.
    async fn add_boxes(
        &self,
        supply_id: &str,
        amount: u32,
    ) -> Result<Vec<String>, MarketplaceError>;

    /// Boxes registered on a supply.
    async fn supply_boxes(&self, supply_id: &str) -> Result<Vec<SupplyBox>, MarketplaceError>;

    /// Remove boxes from a supply.
    async fn delete_boxes(
        &self,
        supply_id: &str,
        box_ids: &[String],
    ) -> Result<(), MarketplaceError>;

    /// Sticker sheet for supply boxes.
    async fn box_stickers(
        &self,
        supply_id: &str,
        box_ids: &[String],
        format: LabelFormat,
    ) -> Result<LabelBlob, MarketplaceError>;

    /// Sticker sheet for orders in assembly status.
    async fn order_stickers(
        &self,
        order_ids: &[i64],
        format: LabelFormat,
        size: StickerSize,
    ) -> Result<LabelBlob, MarketplaceError>;

    /// Write one metadata field on an order.
    async fn write_meta(
        &self,
        order_id: i64,
        kind: MetaKind,
        value: &str,
    ) -> Result<(), MarketplaceError>;

    /// Metadata currently attached to an order.
    async fn order_meta(&self, order_id: i64) -> Result<OrderMeta, MarketplaceError>;

    /// Offices that require an access pass.
    async fn pass_offices(&self) -> Result<Vec<PassOffice>, MarketplaceError>;

    /// Passes issued to this supplier.
    async fn passes(&self) -> Result<Vec<Pass>, MarketplaceError>;

    /// Issue a new access pass. Returns the pass id.
    async fn create_pass(&self, request: &CreatePassRequest) -> Result<i64, MarketplaceError>;
}
