//! Order metadata API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use packflow_core::{MetaKind, OrderMeta};

use super::{marketplace_error_response, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WriteMetaRequest {
    pub value: String,
}

fn parse_kind(kind: &str) -> Option<MetaKind> {
    match kind {
        "sgtin" => Some(MetaKind::Sgtin),
        "uin" => Some(MetaKind::Uin),
        "imei" => Some(MetaKind::Imei),
        "gtin" => Some(MetaKind::Gtin),
        "expiration" => Some(MetaKind::Expiration),
        _ => None,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// PUT /api/v1/orders/{order_id}/meta/{kind}
///
/// Write one metadata field (sgtin, uin, imei, gtin or expiration) on an
/// order. Validation of the value itself happens marketplace-side.
pub async fn write_meta(
    State(state): State<Arc<AppState>>,
    Path((order_id, kind)): Path<(i64, String)>,
    Json(body): Json<WriteMetaRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let kind = match parse_kind(&kind) {
        Some(kind) => kind,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "unknown metadata kind: {}",
                    kind
                ))),
            ))
        }
    };

    if body.value.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("value cannot be empty")),
        ));
    }

    match state
        .marketplace()
        .write_meta(order_id, kind, &body.value)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// GET /api/v1/orders/{order_id}/meta
pub async fn get_meta(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderMeta>, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().order_meta(order_id).await {
        Ok(meta) => Ok(Json(meta)),
        Err(e) => Err(marketplace_error_response(e)),
    }
}
