//! Scan protocol messages and response parsing.

pub mod messages;
pub mod response;

pub use messages::{Device, Envelope, Message, ScanRequest, ScanRequestData, SCAN_CMD};
pub use response::parse_scan_response;
