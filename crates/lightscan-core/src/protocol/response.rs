//! Scan response parsing.

use serde_json::Value;

use super::messages::{Device, SCAN_CMD};
use crate::error::PacketError;

/// Parse one inbound datagram into a [`Device`].
///
/// The packet must be UTF-8 JSON of the form
/// `{"msg": {"cmd": "scan", "data": {"sku": ..., "ip": ..., ...}}}`.
/// Anything else is reported as a [`PacketError`] so the caller can skip it.
pub fn parse_scan_response(packet: &[u8]) -> Result<Device, PacketError> {
    let text = std::str::from_utf8(packet)
        .map_err(|e| PacketError::Decode(format!("Invalid UTF-8: {}", e)))?;

    let mut value: Value = serde_json::from_str(text)
        .map_err(|e| PacketError::Decode(format!("Failed to parse JSON: {}", e)))?;

    let msg = value
        .get_mut("msg")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| PacketError::ProtocolMismatch("missing \"msg\" object".to_string()))?;

    match msg.get("cmd").and_then(Value::as_str) {
        Some(SCAN_CMD) => {}
        Some(other) => {
            return Err(PacketError::ProtocolMismatch(format!(
                "unexpected cmd \"{}\"",
                other
            )))
        }
        None => {
            return Err(PacketError::ProtocolMismatch(
                "missing \"cmd\"".to_string(),
            ))
        }
    }

    let data = msg
        .remove("data")
        .filter(Value::is_object)
        .ok_or_else(|| PacketError::ProtocolMismatch("missing \"data\" object".to_string()))?;

    serde_json::from_value(data)
        .map_err(|e| PacketError::ProtocolMismatch(format!("malformed \"data\": {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_response() {
        let packet = br#"{"msg":{"cmd":"scan","data":{"sku":"ABC123","ip":"192.168.1.10"}}}"#;
        let device = parse_scan_response(packet).unwrap();
        assert_eq!(device.sku, "ABC123");
        assert_eq!(device.ip, "192.168.1.10");
        assert!(device.extra.is_empty());
    }

    #[test]
    fn test_device_equals_data_object() {
        let data = json!({
            "ip": "192.168.1.42",
            "device": "AA:BB:CC:DD:EE:FF:00:11",
            "sku": "H6159",
            "bleVersionHard": "1.00.00",
            "bleVersionSoft": "1.00.01",
            "wifiVersionHard": "1.00.10",
            "wifiVersionSoft": "1.02.11",
            "nested": {"a": [1, 2, 3]}
        });
        let packet = serde_json::to_vec(&json!({"msg": {"cmd": "scan", "data": data}})).unwrap();

        let device = parse_scan_response(&packet).unwrap();
        assert_eq!(serde_json::to_value(&device).unwrap(), data);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            parse_scan_response(b"not json"),
            Err(PacketError::Decode(_))
        ));
        assert!(matches!(
            parse_scan_response(&[0xff, 0xfe, 0x00]),
            Err(PacketError::Decode(_))
        ));
    }

    #[test]
    fn test_other_cmd_is_mismatch() {
        let packet = br#"{"msg":{"cmd":"devStatus","data":{"sku":"A","ip":"1.2.3.4"}}}"#;
        assert!(matches!(
            parse_scan_response(packet),
            Err(PacketError::ProtocolMismatch(_))
        ));
    }

    #[test]
    fn test_missing_shapes_are_mismatch() {
        let cases: [&[u8]; 6] = [
            br#"[1, 2, 3]"#,
            br#"{"cmd":"scan"}"#,
            br#"{"msg":{"data":{"sku":"A","ip":"1.2.3.4"}}}"#,
            br#"{"msg":{"cmd":"scan"}}"#,
            br#"{"msg":{"cmd":"scan","data":"oops"}}"#,
            br#"{"msg":{"cmd":"scan","data":{"ip":"1.2.3.4"}}}"#,
        ];

        for packet in cases {
            assert!(
                matches!(parse_scan_response(packet), Err(PacketError::ProtocolMismatch(_))),
                "expected mismatch for {}",
                String::from_utf8_lossy(packet)
            );
        }
    }

    #[test]
    fn test_non_string_sku_is_mismatch() {
        let packet = br#"{"msg":{"cmd":"scan","data":{"sku":42,"ip":"1.2.3.4"}}}"#;
        assert!(matches!(
            parse_scan_response(packet),
            Err(PacketError::ProtocolMismatch(_))
        ));
    }
}
