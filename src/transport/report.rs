//! # Report Encoding
//!
//! Builds the notification payloads the peer understands.
//!
//! Two shapes exist, matching the two firmware variants of the device:
//! textual telemetry strings sent over a UART-style characteristic, and a
//! fixed 4-byte boot-mouse relative report where only the wheel field is
//! ever populated.

/// Size of the relative pointer report: `[buttons, x, y, wheel]`
pub const WHEEL_REPORT_SIZE: usize = 4;

/// Byte offset of the wheel field in the pointer report
pub const WHEEL_FIELD_INDEX: usize = 3;

/// Encode a scroll delta as textual telemetry (`SCR:<delta>`)
#[must_use]
pub fn encode_scroll_text(delta: i32) -> Vec<u8> {
    format!("SCR:{}", delta).into_bytes()
}

/// Encode a battery percentage as textual telemetry (`BAT:<percent>`)
#[must_use]
pub fn encode_battery_text(percentage: u8) -> Vec<u8> {
    format!("BAT:{}", percentage).into_bytes()
}

/// Encode a scroll delta as a 4-byte relative pointer report
///
/// Buttons, x and y are always zero; the delta is clamped to the signed
/// 8-bit range of the wheel field.
#[must_use]
pub fn encode_wheel_report(delta: i32) -> [u8; WHEEL_REPORT_SIZE] {
    let wheel = delta.clamp(i8::MIN as i32, i8::MAX as i32) as i8;
    [0, 0, 0, wheel as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Text Payload Tests ====================

    #[test]
    fn test_scroll_text_positive() {
        assert_eq!(encode_scroll_text(12), b"SCR:12".to_vec());
    }

    #[test]
    fn test_scroll_text_negative() {
        assert_eq!(encode_scroll_text(-3), b"SCR:-3".to_vec());
    }

    #[test]
    fn test_battery_text_bounds() {
        assert_eq!(encode_battery_text(0), b"BAT:0".to_vec());
        assert_eq!(encode_battery_text(100), b"BAT:100".to_vec());
    }

    // ==================== Pointer Report Tests ====================

    #[test]
    fn test_wheel_report_structure() {
        let report = encode_wheel_report(5);
        assert_eq!(report.len(), WHEEL_REPORT_SIZE);
        // Buttons, x and y stay zero
        assert_eq!(report[0], 0);
        assert_eq!(report[1], 0);
        assert_eq!(report[2], 0);
        assert_eq!(report[WHEEL_FIELD_INDEX], 5);
    }

    #[test]
    fn test_wheel_report_negative_delta() {
        let report = encode_wheel_report(-1);
        assert_eq!(report[WHEEL_FIELD_INDEX] as i8, -1);
    }

    #[test]
    fn test_wheel_report_clamps_to_i8() {
        assert_eq!(encode_wheel_report(500)[WHEEL_FIELD_INDEX] as i8, 127);
        assert_eq!(encode_wheel_report(-500)[WHEEL_FIELD_INDEX] as i8, -128);
    }
}
