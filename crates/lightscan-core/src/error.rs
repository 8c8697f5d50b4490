//! Error types for lightscan core.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Socket setup stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketStep {
    Create,
    ReuseAddress,
    Bind,
    MulticastTtl,
    MulticastInterface,
    NonBlocking,
    Register,
}

impl fmt::Display for SocketStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SocketStep::Create => "create socket",
            SocketStep::ReuseAddress => "set SO_REUSEADDR",
            SocketStep::Bind => "bind",
            SocketStep::MulticastTtl => "set multicast TTL",
            SocketStep::MulticastInterface => "set multicast interface",
            SocketStep::NonBlocking => "set non-blocking",
            SocketStep::Register => "register with runtime",
        };
        f.write_str(s)
    }
}

/// Fatal discovery errors. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to {step}: {source}")]
    SocketConfig {
        step: SocketStep,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to join multicast group {group} on {interface}: {source}")]
    MulticastJoin {
        group: Ipv4Addr,
        interface: Ipv4Addr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to send scan request to {target}: {source}")]
    Send {
        target: SocketAddrV4,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    pub(crate) fn socket(step: SocketStep) -> impl FnOnce(std::io::Error) -> Self {
        move |source| DiscoveryError::SocketConfig { step, source }
    }
}

/// Per-packet errors. These never escape the collection loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("Undecodable packet: {0}")]
    Decode(String),

    #[error("Unexpected message shape: {0}")]
    ProtocolMismatch(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Interface {0} has no IPv4 address")]
    NoIpv4Address(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
