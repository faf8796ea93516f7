//! Types produced by scan classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which regulatory identifier a scanned payload was recognized as.
///
/// The kinds are mutually exclusive: one scan yields at most one of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Serialized GTIN for marked goods.
    Sgtin,
    /// Unique identification number (jewelry and similar).
    Uin,
    /// Device identifier for phones and modems.
    Imei,
    /// Plain product code, the fallback when nothing else matches.
    Gtin,
}

/// The classified second segment of a scan line, value kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanPayload {
    pub kind: PayloadKind,
    pub value: String,
}

/// A parsed scan line: the order id plus an optional classified payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifiedScan {
    pub order_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ScanPayload>,
}

/// Errors from local scan parsing. No network is involved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Scan line does not start with a numeric order id")]
    MissingOrderId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_serialization() {
        assert_eq!(serde_json::to_string(&PayloadKind::Sgtin).unwrap(), "\"sgtin\"");
        assert_eq!(serde_json::to_string(&PayloadKind::Uin).unwrap(), "\"uin\"");
        assert_eq!(serde_json::to_string(&PayloadKind::Imei).unwrap(), "\"imei\"");
        assert_eq!(serde_json::to_string(&PayloadKind::Gtin).unwrap(), "\"gtin\"");
    }

    #[test]
    fn test_classified_scan_serialization_without_payload() {
        let scan = ClassifiedScan {
            order_id: 555,
            payload: None,
        };

        let json = serde_json::to_string(&scan).unwrap();
        assert!(!json.contains("payload"));

        let parsed: ClassifiedScan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scan);
    }

    #[test]
    fn test_classified_scan_roundtrip_with_payload() {
        let scan = ClassifiedScan {
            order_id: 123,
            payload: Some(ScanPayload {
                kind: PayloadKind::Imei,
                value: "35693803355971".to_string(),
            }),
        };

        let json = serde_json::to_string(&scan).unwrap();
        let parsed: ClassifiedScan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scan);
    }
}
