//! Order listing API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use packflow_core::{Order, OrdersQuery};

use super::{marketplace_error_response, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    /// Window start, unix seconds.
    pub date_from: i64,
    /// Window end, unix seconds.
    pub date_to: i64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub next: i64,
}

fn default_limit() -> u32 {
    1000
}

#[derive(Debug, Serialize)]
pub struct OrdersPageResponse {
    pub orders: Vec<Order>,
    pub total: usize,
    /// Cursor for the next page, 0 when exhausted.
    pub next: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/orders/new
///
/// Orders awaiting assembly.
pub async fn new_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrdersResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().new_orders().await {
        Ok(orders) => Ok(Json(OrdersResponse {
            total: orders.len(),
            orders,
        })),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// GET /api/v1/orders?date_from&date_to&limit&next
///
/// One page of orders in a time window. Callers page explicitly via `next`.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<OrdersPageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let query = OrdersQuery {
        date_from: params.date_from,
        date_to: params.date_to,
        limit: params.limit,
        next: params.next,
    };

    match state.marketplace().orders(&query).await {
        Ok(page) => Ok(Json(OrdersPageResponse {
            total: page.orders.len(),
            orders: page.orders,
            next: page.next,
        })),
        Err(e) => Err(marketplace_error_response(e)),
    }
}
