use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use packflow_core::SanitizedConfig;

use crate::metrics::encode_metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

pub async fn get_metrics() -> String {
    encode_metrics()
}

#[derive(Debug, Deserialize)]
pub struct SetTokenRequest {
    /// New token; null or empty clears the credential.
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SetTokenResponse {
    pub token_configured: bool,
}

/// PUT /api/v1/token
///
/// Rotate the marketplace credential at runtime without a restart.
pub async fn set_token(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetTokenRequest>,
) -> Json<SetTokenResponse> {
    let configured = body
        .token
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    state.marketplace().set_token(body.token).await;

    Json(SetTokenResponse {
        token_configured: configured,
    })
}
