//! Shared core library for lightscan.
//!
//! Finds LAN-controllable lights by sending a multicast scan request and
//! collecting the JSON replies that come back on a fixed response port.

pub mod config;
pub mod discovery;
pub mod error;
pub mod interface;
pub mod protocol;

pub use config::ScanConfig;
pub use discovery::DiscoveryClient;
pub use error::{ConfigError, CoreError, DiscoveryError, PacketError};
pub use protocol::{Device, ScanRequest};
