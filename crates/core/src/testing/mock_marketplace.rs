//! Mock marketplace API for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::marketplace::{
    CreatePassRequest, LabelBlob, LabelFormat, MarketplaceApi, MarketplaceError, MetaKind, Order,
    OrderMeta, OrdersPage, OrdersQuery, Pass, PassOffice, StickerSize, SupplyBox,
};

/// A recorded API call for test assertions, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    SetToken {
        token: Option<String>,
    },
    NewOrders,
    Orders {
        date_from: i64,
        date_to: i64,
    },
    CreateSupply {
        destination_office_id: Option<i64>,
    },
    AddOrderToSupply {
        supply_id: String,
        order_id: i64,
    },
    SupplyOrders {
        supply_id: String,
    },
    DeliverSupply {
        supply_id: String,
    },
    SupplyQr {
        supply_id: String,
        format: LabelFormat,
    },
    AddBoxes {
        supply_id: String,
        amount: u32,
    },
    SupplyBoxes {
        supply_id: String,
    },
    DeleteBoxes {
        supply_id: String,
        box_ids: Vec<String>,
    },
    BoxStickers {
        supply_id: String,
        box_ids: Vec<String>,
    },
    OrderStickers {
        order_ids: Vec<i64>,
        format: LabelFormat,
        size: StickerSize,
    },
    WriteMeta {
        order_id: i64,
        kind: MetaKind,
        value: String,
    },
    OrderMeta {
        order_id: i64,
    },
    PassOffices,
    Passes,
    CreatePass {
        office_id: i64,
    },
}

/// Mock implementation of the `MarketplaceApi` trait.
///
/// Provides controllable behavior for testing:
/// - Record every call with its arguments, in order
/// - Inject a one-shot failure for a named operation
/// - Configure returned orders, passes and sticker bytes
/// - Track written metadata per order
#[derive(Debug)]
pub struct MockMarketplace {
    /// Recorded calls, in invocation order.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// One-shot failures keyed by operation name (e.g. "write_meta").
    failures: Arc<RwLock<HashMap<String, MarketplaceError>>>,
    /// Current token, observable for rotation tests.
    token: Arc<RwLock<Option<String>>>,
    /// Orders returned by `new_orders` and `orders`.
    orders: Arc<RwLock<Vec<Order>>>,
    /// Supply id returned by `create_supply`.
    supply_id: Arc<RwLock<String>>,
    /// Metadata written via `write_meta`, keyed by order id.
    meta: Arc<RwLock<HashMap<i64, OrderMeta>>>,
    /// Boxes returned by `supply_boxes`.
    boxes: Arc<RwLock<Vec<SupplyBox>>>,
    /// Offices returned by `pass_offices`.
    offices: Arc<RwLock<Vec<PassOffice>>>,
    /// Passes returned by `passes`.
    passes: Arc<RwLock<Vec<Pass>>>,
    /// Bytes returned by sticker and QR operations.
    sticker_bytes: Arc<RwLock<Vec<u8>>>,
}

impl Default for MockMarketplace {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketplace {
    /// Create a new mock with empty data, a fixed supply id and non-empty
    /// sticker bytes.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            token: Arc::new(RwLock::new(None)),
            orders: Arc::new(RwLock::new(Vec::new())),
            supply_id: Arc::new(RwLock::new("WB-GI-MOCK-1".to_string())),
            meta: Arc::new(RwLock::new(HashMap::new())),
            boxes: Arc::new(RwLock::new(Vec::new())),
            offices: Arc::new(RwLock::new(Vec::new())),
            passes: Arc::new(RwLock::new(Vec::new())),
            sticker_bytes: Arc::new(RwLock::new(b"sticker-bytes".to_vec())),
        }
    }

    /// Configure the orders returned by order listing operations.
    pub async fn set_orders(&self, orders: Vec<Order>) {
        *self.orders.write().await = orders;
    }

    /// Configure the supply id returned by `create_supply`.
    pub async fn set_supply_id(&self, supply_id: &str) {
        *self.supply_id.write().await = supply_id.to_string();
    }

    /// Configure the boxes returned by `supply_boxes`.
    pub async fn set_boxes(&self, boxes: Vec<SupplyBox>) {
        *self.boxes.write().await = boxes;
    }

    /// Configure the offices returned by `pass_offices`.
    pub async fn set_pass_offices(&self, offices: Vec<PassOffice>) {
        *self.offices.write().await = offices;
    }

    /// Configure the passes returned by `passes`.
    pub async fn set_passes(&self, passes: Vec<Pass>) {
        *self.passes.write().await = passes;
    }

    /// Configure the bytes returned by sticker and QR operations.
    pub async fn set_sticker_bytes(&self, bytes: Vec<u8>) {
        *self.sticker_bytes.write().await = bytes;
    }

    /// Make the next invocation of `operation` fail with `error`.
    ///
    /// The failure is consumed when it triggers; later invocations succeed.
    pub async fn fail_operation(&self, operation: &str, error: MarketplaceError) {
        self.failures
            .write()
            .await
            .insert(operation.to_string(), error);
    }

    /// Recorded calls, in invocation order.
    pub async fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of recorded calls.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    /// Current token as last set via `set_token`.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Metadata written for an order via `write_meta`.
    pub async fn written_meta(&self, order_id: i64) -> Option<OrderMeta> {
        self.meta.read().await.get(&order_id).cloned()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }

    async fn check_failure(&self, operation: &str) -> Result<(), MarketplaceError> {
        match self.failures.write().await.remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn sticker_blob(&self, format: LabelFormat) -> LabelBlob {
        LabelBlob {
            content_type: format.content_type(),
            bytes: self.sticker_bytes.read().await.clone(),
        }
    }
}

#[async_trait]
impl MarketplaceApi for MockMarketplace {
    fn name(&self) -> &str {
        "mock"
    }

    async fn set_token(&self, token: Option<String>) {
        self.record(RecordedCall::SetToken {
            token: token.clone(),
        })
        .await;
        *self.token.write().await = token;
    }

    async fn new_orders(&self) -> Result<Vec<Order>, MarketplaceError> {
        self.record(RecordedCall::NewOrders).await;
        self.check_failure("new_orders").await?;
        Ok(self.orders.read().await.clone())
    }

    async fn orders(&self, query: &OrdersQuery) -> Result<OrdersPage, MarketplaceError> {
        self.record(RecordedCall::Orders {
            date_from: query.date_from,
            date_to: query.date_to,
        })
        .await;
        self.check_failure("orders").await?;
        Ok(OrdersPage {
            orders: self.orders.read().await.clone(),
            next: 0,
        })
    }

    async fn create_supply(
        &self,
        destination_office_id: Option<i64>,
    ) -> Result<String, MarketplaceError> {
        self.record(RecordedCall::CreateSupply {
            destination_office_id,
        })
        .await;
        self.check_failure("create_supply").await?;
        Ok(self.supply_id.read().await.clone())
    }

    async fn add_order_to_supply(
        &self,
        supply_id: &str,
        order_id: i64,
    ) -> Result<(), MarketplaceError> {
        self.record(RecordedCall::AddOrderToSupply {
            supply_id: supply_id.to_string(),
            order_id,
        })
        .await;
        self.check_failure("add_order_to_supply").await
    }

    async fn supply_orders(&self, supply_id: &str) -> Result<Vec<Order>, MarketplaceError> {
        self.record(RecordedCall::SupplyOrders {
            supply_id: supply_id.to_string(),
        })
        .await;
        self.check_failure("supply_orders").await?;
        Ok(self.orders.read().await.clone())
    }

    async fn deliver_supply(&self, supply_id: &str) -> Result<(), MarketplaceError> {
        self.record(RecordedCall::DeliverSupply {
            supply_id: supply_id.to_string(),
        })
        .await;
        self.check_failure("deliver_supply").await
    }

    async fn supply_qr(
        &self,
        supply_id: &str,
        format: LabelFormat,
    ) -> Result<LabelBlob, MarketplaceError> {
        self.record(RecordedCall::SupplyQr {
            supply_id: supply_id.to_string(),
            format,
        })
        .await;
        self.check_failure("supply_qr").await?;
        Ok(self.sticker_blob(format).await)
    }

    async fn add_boxes(
        &self,
        supply_id: &str,
        amount: u32,
    ) -> Result<Vec<String>, MarketplaceError> {
        self.record(RecordedCall::AddBoxes {
            supply_id: supply_id.to_string(),
            amount,
        })
        .await;
        self.check_failure("add_boxes").await?;
        Ok((1..=amount)
            .map(|n| format!("{}-trbx-{}", supply_id, n))
            .collect())
    }

    async fn supply_boxes(&self, supply_id: &str) -> Result<Vec<SupplyBox>, MarketplaceError> {
        self.record(RecordedCall::SupplyBoxes {
            supply_id: supply_id.to_string(),
        })
        .await;
        self.check_failure("supply_boxes").await?;
        Ok(self.boxes.read().await.clone())
    }

    async fn delete_boxes(
        &self,
        supply_id: &str,
        box_ids: &[String],
    ) -> Result<(), MarketplaceError> {
        self.record(RecordedCall::DeleteBoxes {
            supply_id: supply_id.to_string(),
            box_ids: box_ids.to_vec(),
        })
        .await;
        self.check_failure("delete_boxes").await
    }

    async fn box_stickers(
        &self,
        supply_id: &str,
        box_ids: &[String],
        format: LabelFormat,
    ) -> Result<LabelBlob, MarketplaceError> {
        self.record(RecordedCall::BoxStickers {
            supply_id: supply_id.to_string(),
            box_ids: box_ids.to_vec(),
        })
        .await;
        self.check_failure("box_stickers").await?;
        Ok(self.sticker_blob(format).await)
    }

    async fn order_stickers(
        &self,
        order_ids: &[i64],
        format: LabelFormat,
        size: StickerSize,
    ) -> Result<LabelBlob, MarketplaceError> {
        self.record(RecordedCall::OrderStickers {
            order_ids: order_ids.to_vec(),
            format,
            size,
        })
        .await;
        self.check_failure("order_stickers").await?;
        Ok(self.sticker_blob(format).await)
    }

    async fn write_meta(
        &self,
        order_id: i64,
        kind: MetaKind,
        value: &str,
    ) -> Result<(), MarketplaceError> {
        self.record(RecordedCall::WriteMeta {
            order_id,
            kind,
            value: value.to_string(),
        })
        .await;
        self.check_failure("write_meta").await?;

        let mut meta = self.meta.write().await;
        let entry = meta.entry(order_id).or_default();
        match kind {
            MetaKind::Sgtin => entry.sgtins.push(value.to_string()),
            MetaKind::Uin => entry.uin = Some(value.to_string()),
            MetaKind::Imei => entry.imei = Some(value.to_string()),
            MetaKind::Gtin => entry.gtin = Some(value.to_string()),
            MetaKind::Expiration => entry.expiration = Some(value.to_string()),
        }
        Ok(())
    }

    async fn order_meta(&self, order_id: i64) -> Result<OrderMeta, MarketplaceError> {
        self.record(RecordedCall::OrderMeta { order_id }).await;
        self.check_failure("order_meta").await?;
        Ok(self
            .meta
            .read()
            .await
            .get(&order_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn pass_offices(&self) -> Result<Vec<PassOffice>, MarketplaceError> {
        self.record(RecordedCall::PassOffices).await;
        self.check_failure("pass_offices").await?;
        Ok(self.offices.read().await.clone())
    }

    async fn passes(&self) -> Result<Vec<Pass>, MarketplaceError> {
        self.record(RecordedCall::Passes).await;
        self.check_failure("passes").await?;
        Ok(self.passes.read().await.clone())
    }

    async fn create_pass(&self, request: &CreatePassRequest) -> Result<i64, MarketplaceError> {
        self.record(RecordedCall::CreatePass {
            office_id: request.office_id,
        })
        .await;
        self.check_failure("create_pass").await?;
        Ok(1)
    }
}
