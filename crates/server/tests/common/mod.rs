//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock marketplace injected, enabling comprehensive E2E testing
//! without external infrastructure.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use packflow_core::testing::MockMarketplace;
use packflow_core::{Config, MarketplaceApi, MarketplaceConfig, PrinterConfig, ServerConfig};
use packflow_server::api::create_router;
use packflow_server::state::AppState;

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use packflow_core::testing::fixtures;

/// Test fixture for E2E testing with a mock marketplace.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_scan() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/scan", json!({ "scan": "123|789" })).await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock marketplace - configure data and inject failures
    pub marketplace: Arc<MockMarketplace>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Raw response for binary endpoints
#[derive(Debug)]
pub struct TestRawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl TestFixture {
    /// Create a new test fixture with a configured token and no printer.
    pub async fn new() -> Self {
        Self::with_printer(None).await
    }

    /// Create a test fixture with an optional printer config.
    pub async fn with_printer(printer: Option<PrinterConfig>) -> Self {
        let marketplace = Arc::new(MockMarketplace::new());

        let config = Config {
            marketplace: MarketplaceConfig {
                token: Some("test-token".to_string()),
                ..Default::default()
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 8080,
            },
            printer: printer.clone(),
        };

        let zpl_printer = printer.map(|p| Arc::new(packflow_core::ZplPrinter::new(p)));

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&marketplace) as Arc<dyn MarketplaceApi>,
            zpl_printer,
        ));

        let router = create_router(state);

        Self {
            router,
            marketplace,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a PATCH request.
    pub async fn patch(&self, path: &str) -> TestResponse {
        self.request("PATCH", path, None).await
    }

    /// Send a DELETE request with JSON body.
    pub async fn delete_with_body(&self, path: &str, body: Value) -> TestResponse {
        self.request("DELETE", path, Some(body)).await
    }

    /// Send a GET request and keep the raw response bytes.
    pub async fn get_bytes(&self, path: &str) -> TestRawResponse {
        self.request_raw("GET", path, None).await
    }

    /// Send a POST request and keep the raw response bytes.
    pub async fn post_bytes(&self, path: &str, body: Value) -> TestRawResponse {
        self.request_raw("POST", path, Some(body)).await
    }

    async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> TestRawResponse {
        let response = self.send(method, path, body).await;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestRawResponse {
            status,
            content_type,
            bytes,
        }
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let response = self.send(method, path, body).await;

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> axum::http::Response<Body> {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }
}
