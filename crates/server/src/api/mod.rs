pub mod handlers;
pub mod labels;
pub mod meta;
pub mod middleware;
pub mod orders;
pub mod passes;
pub mod routes;
pub mod scan;
pub mod supplies;

pub use routes::create_router;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use packflow_core::MarketplaceError;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Map a marketplace error to an HTTP response.
///
/// Missing credentials are a local configuration problem (503); upstream
/// rejections and transport failures surface as gateway errors carrying the
/// original message.
pub fn marketplace_error_response(error: MarketplaceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        MarketplaceError::MissingToken => StatusCode::SERVICE_UNAVAILABLE,
        MarketplaceError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        MarketplaceError::Api { .. }
        | MarketplaceError::ConnectionFailed(_)
        | MarketplaceError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ErrorResponse::new(error.to_string())))
}
