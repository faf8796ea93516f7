//! Packing pipeline API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;

use packflow_core::{
    process_scan, PipelineReport, PipelineRequest, PipelineStatus, PipelineStep, ScanPayload,
    StepReport,
};

use super::ErrorResponse;
use crate::metrics::{SCAN_CYCLES_TOTAL, SCAN_STEP_FAILURES_TOTAL};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ScanPayload>,
    pub status: PipelineStatus,
    pub steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker: Option<EncodedSticker>,
}

/// Sticker blob encoded for inline transport in the JSON report.
#[derive(Debug, Serialize)]
pub struct EncodedSticker {
    pub content_type: String,
    pub data: String,
}

impl From<PipelineReport> for ScanResponse {
    fn from(report: PipelineReport) -> Self {
        Self {
            order_id: report.order_id,
            payload: report.payload,
            status: report.status,
            steps: report.steps,
            sticker: report.sticker.map(|blob| EncodedSticker {
                content_type: blob.content_type.to_string(),
                data: BASE64.encode(&blob.bytes),
            }),
        }
    }
}

fn step_label(step: PipelineStep) -> &'static str {
    match step {
        PipelineStep::WriteMeta => "write_meta",
        PipelineStep::AddToSupply => "add_to_supply",
        PipelineStep::FetchSticker => "fetch_sticker",
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/scan
///
/// Run one packing cycle for a scanned line. An unparseable scan is a 400
/// and never reaches the marketplace; remote step failures are reported in
/// the body with a 200, matching the step-by-step report the operator sees.
pub async fn run_scan(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PipelineRequest>,
) -> Result<Json<ScanResponse>, (StatusCode, Json<ErrorResponse>)> {
    match process_scan(&body, state.marketplace()).await {
        Ok(report) => {
            match &report.status {
                PipelineStatus::Completed => {
                    SCAN_CYCLES_TOTAL.with_label_values(&["completed"]).inc();
                }
                PipelineStatus::Failed { failed_step, .. } => {
                    SCAN_CYCLES_TOTAL.with_label_values(&["failed"]).inc();
                    SCAN_STEP_FAILURES_TOTAL
                        .with_label_values(&[step_label(*failed_step)])
                        .inc();
                }
            }
            Ok(Json(ScanResponse::from(report)))
        }
        Err(e) => {
            SCAN_CYCLES_TOTAL.with_label_values(&["invalid_scan"]).inc();
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}
