//! Packing pipeline E2E tests through POST /api/v1/scan.
//!
//! The pipeline semantics themselves are covered in the core crate; these
//! tests verify the HTTP surface: report shape, sticker encoding, and that
//! parse failures never reach the marketplace.

mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;

use packflow_core::testing::RecordedCall;
use packflow_core::{MarketplaceError, MetaKind};

use common::TestFixture;

#[tokio::test]
async fn test_scan_full_cycle() {
    let fixture = TestFixture::new().await;
    fixture
        .marketplace
        .set_sticker_bytes(b"png-sticker".to_vec())
        .await;

    let response = fixture
        .post(
            "/api/v1/scan",
            json!({ "scan": "123|789", "supply_id": "WB-GI-1" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["order_id"], 123);
    assert_eq!(response.body["payload"]["kind"], "gtin");
    assert_eq!(response.body["payload"]["value"], "789");
    assert_eq!(response.body["status"]["type"], "completed");

    // All three steps completed, metadata first by default.
    let steps = response.body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["step"], "write_meta");
    assert_eq!(steps[0]["outcome"], "completed");
    assert_eq!(steps[1]["step"], "add_to_supply");
    assert_eq!(steps[2]["step"], "fetch_sticker");

    // The sticker arrives base64-encoded with its content type.
    assert_eq!(response.body["sticker"]["content_type"], "image/png");
    let decoded = BASE64
        .decode(response.body["sticker"]["data"].as_str().unwrap())
        .unwrap();
    assert_eq!(decoded, b"png-sticker");

    let calls = fixture.marketplace.recorded().await;
    assert_eq!(
        calls[0],
        RecordedCall::WriteMeta {
            order_id: 123,
            kind: MetaKind::Gtin,
            value: "789".to_string(),
        }
    );
    assert!(matches!(calls[1], RecordedCall::AddOrderToSupply { .. }));
    assert!(matches!(calls[2], RecordedCall::OrderStickers { .. }));
}

#[tokio::test]
async fn test_scan_imei_classification_visible() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/api/v1/scan",
            json!({ "scan": "55|356938035643809", "supply_id": "WB-GI-1" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["payload"]["kind"], "imei");
}

#[tokio::test]
async fn test_scan_invalid_line_rejected_locally() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/scan", json!({ "scan": "abc|123" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("numeric order id"));
    assert_eq!(fixture.marketplace.call_count().await, 0);
}

#[tokio::test]
async fn test_scan_meta_after_attach() {
    let fixture = TestFixture::new().await;

    fixture
        .post(
            "/api/v1/scan",
            json!({
                "scan": "123|789",
                "supply_id": "WB-GI-1",
                "write_metadata_first": false
            }),
        )
        .await;

    let calls = fixture.marketplace.recorded().await;
    assert!(matches!(calls[0], RecordedCall::AddOrderToSupply { .. }));
    assert!(matches!(calls[1], RecordedCall::WriteMeta { .. }));
}

#[tokio::test]
async fn test_scan_without_supply_skips_attach() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/scan", json!({ "scan": "555", "supply_id": "" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"]["type"], "completed");

    let steps = response.body["steps"].as_array().unwrap();
    let attach = steps.iter().find(|s| s["step"] == "add_to_supply").unwrap();
    assert_eq!(attach["outcome"], "skipped");
    assert_eq!(attach["reason"], "no_supply_id");

    // Sticker still fetched.
    assert!(response.body["sticker"].is_object());
}

#[tokio::test]
async fn test_scan_step_failure_reported_with_skips() {
    let fixture = TestFixture::new().await;
    fixture
        .marketplace
        .fail_operation(
            "write_meta",
            MarketplaceError::Api {
                status: 409,
                message: "duplicate".to_string(),
            },
        )
        .await;

    let response = fixture
        .post(
            "/api/v1/scan",
            json!({ "scan": "123|789", "supply_id": "WB-GI-1" }),
        )
        .await;

    // Remote failures are still a 200: the report carries the outcome.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"]["type"], "failed");
    assert_eq!(response.body["status"]["failed_step"], "write_meta");

    let steps = response.body["steps"].as_array().unwrap();
    assert_eq!(steps[0]["outcome"], "failed");
    assert_eq!(steps[1]["outcome"], "skipped");
    assert_eq!(steps[1]["reason"], "prior_step_failed");
    assert_eq!(steps[2]["outcome"], "skipped");
    assert_eq!(steps[2]["reason"], "prior_step_failed");

    assert!(response.body.get("sticker").is_none());
    assert_eq!(fixture.marketplace.call_count().await, 1);
}

#[tokio::test]
async fn test_scan_no_sticker_when_disabled() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/api/v1/scan",
            json!({ "scan": "555", "supply_id": "WB-GI-1", "auto_sticker": false }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("sticker").is_none());

    let steps = response.body["steps"].as_array().unwrap();
    let sticker = steps.iter().find(|s| s["step"] == "fetch_sticker").unwrap();
    assert_eq!(sticker["outcome"], "skipped");
    assert_eq!(sticker["reason"], "not_requested");
}
