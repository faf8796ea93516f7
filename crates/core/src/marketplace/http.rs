//! HTTP binding of the marketplace supplier API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::MarketplaceConfig;

use super::{
    CreatePassRequest, LabelBlob, LabelFormat, MarketplaceApi, MarketplaceError, MetaKind, Order,
    OrderMeta, OrdersPage, OrdersQuery, Pass, PassOffice, StickerSize, SupplyBox,
};

/// Reqwest-backed client for the supplier REST API.
///
/// The bearer token lives behind a lock so it can be rotated mid-session
/// without rebuilding the client; everything else is fixed at construction.
pub struct HttpMarketplaceClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpMarketplaceClient {
    /// Create a new client for the configured environment.
    pub fn new(config: MarketplaceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        let token = normalize_token(config.token);

        Self {
            client,
            base_url: config.environment.base_url().to_string(),
            token: RwLock::new(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Current token, or `MissingToken` before any network call is made.
    async fn auth_token(&self) -> Result<String, MarketplaceError> {
        let token = self.token.read().await;
        token.clone().ok_or(MarketplaceError::MissingToken)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, MarketplaceError> {
        let token = self.auth_token().await?;

        let mut request = self
            .client
            .request(method.clone(), self.url(path))
            .header(AUTHORIZATION, token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!(method = %method, path = path, "Marketplace request");

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MarketplaceError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, MarketplaceError> {
        self.send(method, path, body)
            .await?
            .json()
            .await
            .map_err(|e| MarketplaceError::InvalidResponse(e.to_string()))
    }

    async fn bytes(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Vec<u8>, MarketplaceError> {
        let response = self.send(method, path, body).await?;
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| MarketplaceError::InvalidResponse(e.to_string()))
    }

    async fn empty(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), MarketplaceError> {
        self.send(method, path, body).await.map(|_| ())
    }
}

fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn map_transport_error(e: reqwest::Error) -> MarketplaceError {
    if e.is_timeout() {
        MarketplaceError::Timeout
    } else {
        MarketplaceError::ConnectionFailed(e.to_string())
    }
}

fn supply_path(supply_id: &str, suffix: &str) -> String {
    format!(
        "/api/v3/supplies/{}{}",
        urlencoding::encode(supply_id),
        suffix
    )
}

fn order_stickers_path(format: LabelFormat, size: StickerSize) -> String {
    format!(
        "/api/v3/orders/stickers?type={}&width={}&height={}",
        format.api_value(),
        size.width(),
        size.height()
    )
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceClient {
    fn name(&self) -> &str {
        "supplier-api"
    }

    async fn set_token(&self, token: Option<String>) {
        let mut current = self.token.write().await;
        *current = normalize_token(token);
    }

    async fn new_orders(&self) -> Result<Vec<Order>, MarketplaceError> {
        let response: OrdersEnvelope = self.json(Method::GET, "/api/v3/orders/new", None).await?;
        Ok(response.orders)
    }

    async fn orders(&self, query: &OrdersQuery) -> Result<OrdersPage, MarketplaceError> {
        let path = format!(
            "/api/v3/orders?limit={}&next={}&dateFrom={}&dateTo={}",
            query.limit, query.next, query.date_from, query.date_to
        );
        self.json(Method::GET, &path, None).await
    }

    async fn create_supply(
        &self,
        destination_office_id: Option<i64>,
    ) -> Result<String, MarketplaceError> {
        let body = match destination_office_id {
            Some(office_id) => json!({ "destinationOfficeId": office_id }),
            None => json!({}),
        };
        let response: CreateSupplyResponse = self
            .json(Method::POST, "/api/v3/supplies", Some(body))
            .await?;
        Ok(response.id)
    }

    async fn add_order_to_supply(
        &self,
        supply_id: &str,
        order_id: i64,
    ) -> Result<(), MarketplaceError> {
        let path = supply_path(supply_id, &format!("/orders/{}", order_id));
        self.empty(Method::PATCH, &path, None).await
    }

    async fn supply_orders(&self, supply_id: &str) -> Result<Vec<Order>, MarketplaceError> {
        let path = supply_path(supply_id, "/orders");
        let response: OrdersEnvelope = self.json(Method::GET, &path, None).await?;
        Ok(response.orders)
    }

    async fn deliver_supply(&self, supply_id: &str) -> Result<(), MarketplaceError> {
        let path = supply_path(supply_id, "/deliver");
        self.empty(Method::PATCH, &path, None).await
    }

    async fn supply_qr(
        &self,
        supply_id: &str,
        format: LabelFormat,
    ) -> Result<LabelBlob, MarketplaceError> {
        let path = supply_path(supply_id, &format!("/barcode?type={}", format.api_value()));
        let bytes = self.bytes(Method::GET, &path, None).await?;
        Ok(LabelBlob {
            content_type: format.content_type(),
            bytes,
        })
    }

    async fn add_boxes(
        &self,
        supply_id: &str,
        amount: u32,
    ) -> Result<Vec<String>, MarketplaceError> {
        let path = supply_path(supply_id, "/trbx");
        let response: AddBoxesResponse = self
            .json(Method::POST, &path, Some(json!({ "amount": amount })))
            .await?;
        Ok(response.trbx_ids)
    }

    async fn supply_boxes(&self, supply_id: &str) -> Result<Vec<SupplyBox>, MarketplaceError> {
        let path = supply_path(supply_id, "/trbx");
        let response: SupplyBoxesResponse = self.json(Method::GET, &path, None).await?;
        Ok(response.trbxes)
    }

    async fn delete_boxes(
        &self,
        supply_id: &str,
        box_ids: &[String],
    ) -> Result<(), MarketplaceError> {
        let path = supply_path(supply_id, "/trbx");
        self.empty(Method::DELETE, &path, Some(json!({ "trbxIds": box_ids })))
            .await
    }

    async fn box_stickers(
        &self,
        supply_id: &str,
        box_ids: &[String],
        format: LabelFormat,
    ) -> Result<LabelBlob, MarketplaceError> {
        let path = supply_path(
            supply_id,
            &format!("/trbx/stickers?type={}", format.api_value()),
        );
        let bytes = self
            .bytes(Method::POST, &path, Some(json!({ "trbxIds": box_ids })))
            .await?;
        Ok(LabelBlob {
            content_type: format.content_type(),
            bytes,
        })
    }

    async fn order_stickers(
        &self,
        order_ids: &[i64],
        format: LabelFormat,
        size: StickerSize,
    ) -> Result<LabelBlob, MarketplaceError> {
        let path = order_stickers_path(format, size);
        let bytes = self
            .bytes(Method::POST, &path, Some(json!({ "orders": order_ids })))
            .await?;
        Ok(LabelBlob {
            content_type: format.content_type(),
            bytes,
        })
    }

    async fn write_meta(
        &self,
        order_id: i64,
        kind: MetaKind,
        value: &str,
    ) -> Result<(), MarketplaceError> {
        let path = format!("/api/v3/orders/{}/meta/{}", order_id, kind.path_segment());
        // SGTINs accumulate as a list; the other fields are single-valued.
        let (method, body) = match kind {
            MetaKind::Sgtin => (Method::POST, json!({ "sgtins": [value] })),
            MetaKind::Uin => (Method::PUT, json!({ "uin": value })),
            MetaKind::Imei => (Method::PUT, json!({ "imei": value })),
            MetaKind::Gtin => (Method::PUT, json!({ "gtin": value })),
            MetaKind::Expiration => (Method::PUT, json!({ "expiration": value })),
        };
        self.empty(method, &path, Some(body)).await
    }

    async fn order_meta(&self, order_id: i64) -> Result<OrderMeta, MarketplaceError> {
        let path = format!("/api/v3/orders/{}/meta", order_id);
        let response: OrderMetaEnvelope = self.json(Method::GET, &path, None).await?;
        Ok(response.meta)
    }

    async fn pass_offices(&self) -> Result<Vec<PassOffice>, MarketplaceError> {
        self.json(Method::GET, "/api/v3/passes/offices", None).await
    }

    async fn passes(&self) -> Result<Vec<Pass>, MarketplaceError> {
        self.json(Method::GET, "/api/v3/passes", None).await
    }

    async fn create_pass(&self, request: &CreatePassRequest) -> Result<i64, MarketplaceError> {
        let mut body = json!({
            "officeId": request.office_id,
            "carNumber": request.car_number,
            "dateStart": request.date_start,
            "dateEnd": request.date_end,
        });
        if let Some(driver) = &request.driver_name {
            body["driverName"] = json!(driver);
        }
        let response: CreatePassResponse =
            self.json(Method::POST, "/api/v3/passes", Some(body)).await?;
        Ok(response.id)
    }
}

// Supplier API response envelopes
#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
struct CreateSupplyResponse {
    // The id key has varied across API revisions.
    #[serde(alias = "supplyId", alias = "supplyID")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct AddBoxesResponse {
    #[serde(rename = "trbxIds", default)]
    trbx_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SupplyBoxesResponse {
    #[serde(default)]
    trbxes: Vec<SupplyBox>,
}

#[derive(Debug, Deserialize)]
struct OrderMetaEnvelope {
    #[serde(default)]
    meta: OrderMeta,
}

#[derive(Debug, Deserialize)]
struct CreatePassResponse {
    id: i64,
}
