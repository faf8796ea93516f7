//! Order sticker API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use packflow_core::{LabelFormat, StickerSize};

use super::{marketplace_error_response, ErrorResponse};
use crate::metrics::PRINT_JOBS_TOTAL;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StickersRequest {
    pub order_ids: Vec<i64>,
    #[serde(default = "default_format")]
    pub format: LabelFormat,
    #[serde(default)]
    pub size: StickerSize,
}

fn default_format() -> LabelFormat {
    LabelFormat::Png
}

#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    pub order_ids: Vec<i64>,
    /// ZPL orientation; raster formats cannot be sent to the printer.
    #[serde(default = "default_print_format")]
    pub format: LabelFormat,
    #[serde(default)]
    pub size: StickerSize,
}

fn default_print_format() -> LabelFormat {
    LabelFormat::ZplVertical
}

#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub printed: bool,
    pub bytes_sent: usize,
    pub printer: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/labels
///
/// Sticker sheet for orders in assembly status, returned as a raw blob.
pub async fn order_stickers(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StickersRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if body.order_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("order_ids cannot be empty")),
        ));
    }

    match state
        .marketplace()
        .order_stickers(&body.order_ids, body.format, body.size)
        .await
    {
        Ok(blob) => Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.bytes)),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// POST /api/v1/labels/print
///
/// Fetch a ZPL sticker sheet and push it straight to the configured
/// networked label printer.
pub async fn print_stickers(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PrintRequest>,
) -> Result<Json<PrintResponse>, (StatusCode, Json<ErrorResponse>)> {
    let printer = match state.printer() {
        Some(p) => p,
        None => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Label printer not configured")),
            ))
        }
    };

    if body.order_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("order_ids cannot be empty")),
        ));
    }
    if !body.format.is_zpl() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "printing requires a zpl-vertical or zpl-horizontal format",
            )),
        ));
    }

    let blob = match state
        .marketplace()
        .order_stickers(&body.order_ids, body.format, body.size)
        .await
    {
        Ok(blob) => blob,
        Err(e) => return Err(marketplace_error_response(e)),
    };

    match printer.send(&blob.bytes).await {
        Ok(()) => {
            PRINT_JOBS_TOTAL.with_label_values(&["sent"]).inc();
            info!(
                orders = body.order_ids.len(),
                bytes = blob.bytes.len(),
                printer = %printer.address(),
                "Sticker sheet printed"
            );
            Ok(Json(PrintResponse {
                printed: true,
                bytes_sent: blob.bytes.len(),
                printer: printer.address(),
            }))
        }
        Err(e) => {
            PRINT_JOBS_TOTAL.with_label_values(&["failed"]).inc();
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}
