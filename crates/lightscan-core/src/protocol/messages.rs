//! Wire messages for the scan protocol.
//!
//! Both directions share the same envelope: `{"msg": {"cmd": ..., "data": ...}}`.
//! Requests and responses are correlated only by `cmd`.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Command name used by both the scan request and its responses.
pub const SCAN_CMD: &str = "scan";

/// Account topic sent when none is configured.
pub const DEFAULT_ACCOUNT_TOPIC: &str = "reserve";

/// Outer `{"msg": ...}` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub msg: Message<T>,
}

/// `{"cmd": ..., "data": ...}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message<T> {
    pub cmd: String,
    pub data: T,
}

/// Payload of a scan request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequestData {
    pub account_topic: String,
}

/// Scan request sent to the multicast group. Built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    envelope: Envelope<ScanRequestData>,
}

impl ScanRequest {
    pub fn new(account_topic: impl Into<String>) -> Self {
        Self {
            envelope: Envelope {
                msg: Message {
                    cmd: SCAN_CMD.to_string(),
                    data: ScanRequestData {
                        account_topic: account_topic.into(),
                    },
                },
            },
        }
    }

    pub fn account_topic(&self) -> &str {
        &self.envelope.msg.data.account_topic
    }

    /// Encode as the UTF-8 JSON datagram payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        // A struct of plain strings cannot fail to serialize.
        serde_json::to_vec(&self.envelope).unwrap_or_default()
    }
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_TOPIC)
    }
}

/// A device that answered the scan: the `data` object of its response.
///
/// Fields beyond `sku` and `ip` are kept in `extra` so that serializing a
/// `Device` reproduces the object the device sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub sku: String,
    pub ip: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// The reported IP, if it is a valid IPv4 address.
    pub fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.ip.parse().ok()
    }

    /// A string field from `extra`, e.g. `device` or `wifiVersionSoft`.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}
