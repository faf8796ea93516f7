//! Supply lifecycle API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use packflow_core::{LabelFormat, Order, SupplyBox};

use super::{marketplace_error_response, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateSupplyRequest {
    #[serde(default)]
    pub destination_office_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateSupplyResponse {
    pub supply_id: String,
}

#[derive(Debug, Serialize)]
pub struct SupplyOrdersResponse {
    pub orders: Vec<Order>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct QrParams {
    #[serde(default = "default_qr_format")]
    pub format: LabelFormat,
}

fn default_qr_format() -> LabelFormat {
    LabelFormat::Png
}

#[derive(Debug, Deserialize)]
pub struct AddBoxesRequest {
    pub amount: u32,
}

#[derive(Debug, Serialize)]
pub struct AddBoxesResponse {
    pub box_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BoxesResponse {
    pub boxes: Vec<SupplyBox>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct BoxIdsRequest {
    pub box_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BoxStickersRequest {
    pub box_ids: Vec<String>,
    #[serde(default = "default_qr_format")]
    pub format: LabelFormat,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/supplies
pub async fn create_supply(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSupplyRequest>,
) -> Result<(StatusCode, Json<CreateSupplyResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state
        .marketplace()
        .create_supply(body.destination_office_id)
        .await
    {
        Ok(supply_id) => Ok((
            StatusCode::CREATED,
            Json(CreateSupplyResponse { supply_id }),
        )),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// GET /api/v1/supplies/{supply_id}/orders
pub async fn supply_orders(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
) -> Result<Json<SupplyOrdersResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().supply_orders(&supply_id).await {
        Ok(orders) => Ok(Json(SupplyOrdersResponse {
            total: orders.len(),
            orders,
        })),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// PATCH /api/v1/supplies/{supply_id}/orders/{order_id}
///
/// Attach an order to the supply; the order moves to assembly status.
pub async fn add_order(
    State(state): State<Arc<AppState>>,
    Path((supply_id, order_id)): Path<(String, i64)>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state
        .marketplace()
        .add_order_to_supply(&supply_id, order_id)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// PATCH /api/v1/supplies/{supply_id}/deliver
///
/// Close the supply and hand its orders over to delivery.
pub async fn deliver(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().deliver_supply(&supply_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// GET /api/v1/supplies/{supply_id}/qr?format=png
///
/// Gate QR code as a raw blob for download or display.
pub async fn supply_qr(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
    Query(params): Query<QrParams>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().supply_qr(&supply_id, params.format).await {
        Ok(blob) => Ok((
            [(header::CONTENT_TYPE, blob.content_type)],
            blob.bytes,
        )),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// POST /api/v1/supplies/{supply_id}/boxes
pub async fn add_boxes(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
    Json(body): Json<AddBoxesRequest>,
) -> Result<(StatusCode, Json<AddBoxesResponse>), (StatusCode, Json<ErrorResponse>)> {
    if body.amount == 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("amount must be at least 1")),
        ));
    }

    match state.marketplace().add_boxes(&supply_id, body.amount).await {
        Ok(box_ids) => Ok((StatusCode::CREATED, Json(AddBoxesResponse { box_ids }))),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// GET /api/v1/supplies/{supply_id}/boxes
pub async fn list_boxes(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
) -> Result<Json<BoxesResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().supply_boxes(&supply_id).await {
        Ok(boxes) => Ok(Json(BoxesResponse {
            total: boxes.len(),
            boxes,
        })),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// DELETE /api/v1/supplies/{supply_id}/boxes
pub async fn delete_boxes(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
    Json(body): Json<BoxIdsRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if body.box_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("box_ids cannot be empty")),
        ));
    }

    match state
        .marketplace()
        .delete_boxes(&supply_id, &body.box_ids)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// POST /api/v1/supplies/{supply_id}/boxes/stickers
pub async fn box_stickers(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
    Json(body): Json<BoxStickersRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if body.box_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("box_ids cannot be empty")),
        ));
    }

    match state
        .marketplace()
        .box_stickers(&supply_id, &body.box_ids, body.format)
        .await
    {
        Ok(blob) => Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.bytes)),
        Err(e) => Err(marketplace_error_response(e)),
    }
}
