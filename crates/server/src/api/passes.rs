//! Facility access pass API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use packflow_core::{CreatePassRequest, Pass, PassOffice};

use super::{marketplace_error_response, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PassOfficesResponse {
    pub offices: Vec<PassOffice>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct PassesResponse {
    pub passes: Vec<Pass>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CreatePassResponse {
    pub id: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/passes/offices
///
/// Offices that require an access pass for drop-off.
pub async fn pass_offices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PassOfficesResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().pass_offices().await {
        Ok(offices) => Ok(Json(PassOfficesResponse {
            total: offices.len(),
            offices,
        })),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// GET /api/v1/passes
pub async fn list_passes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PassesResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.marketplace().passes().await {
        Ok(passes) => Ok(Json(PassesResponse {
            total: passes.len(),
            passes,
        })),
        Err(e) => Err(marketplace_error_response(e)),
    }
}

/// POST /api/v1/passes
pub async fn create_pass(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePassRequest>,
) -> Result<(StatusCode, Json<CreatePassResponse>), (StatusCode, Json<ErrorResponse>)> {
    if body.car_number.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("car_number cannot be empty")),
        ));
    }
    if body.date_end < body.date_start {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("date_end cannot precede date_start")),
        ));
    }

    match state.marketplace().create_pass(&body).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(CreatePassResponse { id }))),
        Err(e) => Err(marketplace_error_response(e)),
    }
}
