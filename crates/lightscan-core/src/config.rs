//! Scan configuration.
//!
//! Defaults match the protocol's well-known group and ports. A JSON file may
//! override any subset of them; the CLI layers env vars and flags on top.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::interface::InterfaceSelector;
use crate::protocol::messages::DEFAULT_ACCOUNT_TOPIC;

pub const DEFAULT_MULTICAST_ADDRESS: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const DEFAULT_SCAN_PORT: u16 = 4001;
pub const DEFAULT_RESPONSE_PORT: u16 = 4002;
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 5.0;
pub const DEFAULT_MULTICAST_TTL: u32 = 32;

/// Longest accepted collection window (one day).
pub const MAX_TIMEOUT_SECONDS: f64 = 86_400.0;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Everything one scan needs, passed explicitly into the discovery client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub multicast_address: Ipv4Addr,
    pub scan_port: u16,
    /// Local port replies arrive on. `0` lets the OS pick one.
    pub response_port: u16,
    pub interface: InterfaceSelector,
    pub timeout_seconds: f64,
    pub multicast_ttl: u32,
    pub account_topic: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            multicast_address: DEFAULT_MULTICAST_ADDRESS,
            scan_port: DEFAULT_SCAN_PORT,
            response_port: DEFAULT_RESPONSE_PORT,
            interface: InterfaceSelector::Default,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            multicast_ttl: DEFAULT_MULTICAST_TTL,
            account_topic: DEFAULT_ACCOUNT_TOPIC.to_string(),
        }
    }
}

impl ScanConfig {
    /// Load a config file. Keys that are absent keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: ScanConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load the default config file if it exists, otherwise built-in defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.multicast_address.is_multicast() {
            return Err(ConfigError::InvalidValue {
                field: "multicast_address",
                message: format!("{} is not an IPv4 multicast address", self.multicast_address),
            });
        }

        if self.scan_port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan_port",
                message: "port must be non-zero".to_string(),
            });
        }

        if self.timeout_seconds <= 0.0 || Duration::try_from_secs_f64(self.timeout_seconds).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds",
                message: format!("{} is not a positive number of seconds", self.timeout_seconds),
            });
        }

        if self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds",
                message: format!(
                    "{} exceeds the maximum of {} seconds",
                    self.timeout_seconds, MAX_TIMEOUT_SECONDS
                ),
            });
        }

        if self.multicast_ttl > 255 {
            return Err(ConfigError::InvalidValue {
                field: "multicast_ttl",
                message: format!("{} exceeds 255", self.multicast_ttl),
            });
        }

        Ok(())
    }

    /// Length of the collection window.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Where the scan request is sent.
    pub fn scan_target(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.multicast_address, self.scan_port)
    }
}

/// Get the platform config directory for lightscan.
pub fn default_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "lightscan", "lightscan")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Full path of the default config file.
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
