//! Scan line classification.

use super::types::{ClassifiedScan, PayloadKind, ScanError, ScanPayload};

/// Parse one scanned line into an order id plus an optional classified payload.
///
/// Lines are pipe-delimited: `<orderId>` or `<orderId>|<payload>`. Segments
/// beyond the second are ignored. The first segment must be a non-empty digit
/// string; the second, when present, is classified by [`classify_payload`].
pub fn classify(raw: &str) -> Result<ClassifiedScan, ScanError> {
    let mut segments = raw.split('|').map(str::trim);

    let order_segment = segments.next().unwrap_or("");
    if !is_all_digits(order_segment) {
        return Err(ScanError::MissingOrderId);
    }
    let order_id: i64 = order_segment.parse().map_err(|_| ScanError::MissingOrderId)?;

    let payload = segments.next().map(|segment| ScanPayload {
        kind: classify_payload(segment),
        value: segment.to_string(),
    });

    Ok(ClassifiedScan { order_id, payload })
}

/// Classify a payload segment by length and digit content, first match wins.
///
/// The thresholds encode the marketplace's metadata field semantics (IMEI
/// lengths, fixed UIN lengths, long SGTIN strings) and are an external
/// contract: do not adjust them to resolve apparent overlaps such as a
/// 23-digit code landing on SGTIN.
fn classify_payload(payload: &str) -> PayloadKind {
    let digits = is_all_digits(payload);
    match payload.chars().count() {
        14..=16 if digits => PayloadKind::Imei,
        31 | 44 if digits => PayloadKind::Uin,
        len if len > 22 => PayloadKind::Sgtin,
        _ => PayloadKind::Gtin,
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(n: usize) -> String {
        "7".repeat(n)
    }

    #[test]
    fn test_classify_bare_order_id() {
        let scan = classify("555").unwrap();
        assert_eq!(scan.order_id, 555);
        assert!(scan.payload.is_none());
    }

    #[test]
    fn test_classify_trims_whitespace() {
        let scan = classify("  123 | 789 ").unwrap();
        assert_eq!(scan.order_id, 123);
        assert_eq!(scan.payload.unwrap().value, "789");
    }

    #[test]
    fn test_classify_non_numeric_order_id() {
        assert_eq!(classify("abc|123"), Err(ScanError::MissingOrderId));
    }

    #[test]
    fn test_classify_empty_line() {
        assert_eq!(classify(""), Err(ScanError::MissingOrderId));
        assert_eq!(classify("|123"), Err(ScanError::MissingOrderId));
    }

    #[test]
    fn test_classify_mixed_order_id() {
        assert_eq!(classify("12a4|789"), Err(ScanError::MissingOrderId));
    }

    #[test]
    fn test_imei_lengths() {
        for len in [14, 15, 16] {
            let scan = classify(&format!("1|{}", digits(len))).unwrap();
            assert_eq!(scan.payload.unwrap().kind, PayloadKind::Imei, "len {}", len);
        }
    }

    #[test]
    fn test_uin_lengths() {
        for len in [31, 44] {
            let scan = classify(&format!("1|{}", digits(len))).unwrap();
            assert_eq!(scan.payload.unwrap().kind, PayloadKind::Uin, "len {}", len);
        }
    }

    #[test]
    fn test_long_digit_string_between_uin_lengths_is_sgtin() {
        // 23 digits: too long for IMEI, not a UIN length, falls to SGTIN.
        let scan = classify(&format!("1|{}", digits(23))).unwrap();
        assert_eq!(scan.payload.unwrap().kind, PayloadKind::Sgtin);
    }

    #[test]
    fn test_long_mixed_string_is_sgtin() {
        let payload = "0104650075195017215ybN8&gYIHEhb9";
        let scan = classify(&format!("42|{}", payload)).unwrap();
        let payload_out = scan.payload.unwrap();
        assert_eq!(payload_out.kind, PayloadKind::Sgtin);
        assert_eq!(payload_out.value, payload);
    }

    #[test]
    fn test_short_payload_is_gtin() {
        let scan = classify("123|789").unwrap();
        assert_eq!(scan.order_id, 123);
        let payload = scan.payload.unwrap();
        assert_eq!(payload.kind, PayloadKind::Gtin);
        assert_eq!(payload.value, "789");
    }

    #[test]
    fn test_short_mixed_payload_is_gtin() {
        // 15 chars but not all digits: the IMEI rule does not apply.
        let scan = classify("1|46500751950ABC").unwrap();
        assert_eq!(scan.payload.unwrap().kind, PayloadKind::Gtin);
    }

    #[test]
    fn test_extra_segments_ignored() {
        let scan = classify("9|789|extra|segments").unwrap();
        assert_eq!(scan.order_id, 9);
        assert_eq!(scan.payload.unwrap().value, "789");
    }

    #[test]
    fn test_22_char_boundary() {
        // Exactly 22 non-digit chars stays GTIN; 23 crosses into SGTIN.
        let at_boundary = "x".repeat(22);
        let scan = classify(&format!("1|{}", at_boundary)).unwrap();
        assert_eq!(scan.payload.unwrap().kind, PayloadKind::Gtin);

        let over_boundary = "x".repeat(23);
        let scan = classify(&format!("1|{}", over_boundary)).unwrap();
        assert_eq!(scan.payload.unwrap().kind, PayloadKind::Sgtin);
    }
}
