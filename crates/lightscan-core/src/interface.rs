//! Local interface selection for multicast traffic.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use pnet::datalink::{self, NetworkInterface};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which local interface sends the scan and joins the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InterfaceSelector {
    /// Let the OS pick (`INADDR_ANY`).
    #[default]
    Default,
    /// A local IPv4 address.
    Addr(Ipv4Addr),
    /// An interface name such as `en0` or `eth0`.
    Name(String),
}

impl InterfaceSelector {
    /// Resolve to the IPv4 address handed to `IP_MULTICAST_IF` and the group join.
    pub fn resolve(&self) -> Result<Ipv4Addr, ConfigError> {
        match self {
            InterfaceSelector::Default => Ok(Ipv4Addr::UNSPECIFIED),
            InterfaceSelector::Addr(addr) => Ok(*addr),
            InterfaceSelector::Name(name) => {
                let iface = get_by_name(name)?;
                first_ipv4(&iface).ok_or_else(|| ConfigError::NoIpv4Address(name.clone()))
            }
        }
    }
}

impl FromStr for InterfaceSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            return Ok(InterfaceSelector::Default);
        }
        if let Ok(addr) = s.parse::<Ipv4Addr>() {
            return Ok(InterfaceSelector::Addr(addr));
        }
        if s.parse::<IpAddr>().is_ok() {
            return Err(ConfigError::InvalidValue {
                field: "interface",
                message: format!("'{}' is not an IPv4 address", s),
            });
        }
        Ok(InterfaceSelector::Name(s.to_string()))
    }
}

impl TryFrom<String> for InterfaceSelector {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InterfaceSelector> for String {
    fn from(value: InterfaceSelector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InterfaceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceSelector::Default => f.write_str("auto"),
            InterfaceSelector::Addr(addr) => write!(f, "{}", addr),
            InterfaceSelector::Name(name) => f.write_str(name),
        }
    }
}

/// A usable interface as shown by `lightscan interfaces`.
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub addresses: Vec<Ipv4Addr>,
    pub loopback: bool,
}

/// Interfaces that are up and carry at least one IPv4 address.
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    datalink::interfaces()
        .into_iter()
        .filter(|iface| iface.is_up())
        .filter_map(|iface| {
            let addresses = ipv4_addresses(&iface);
            if addresses.is_empty() {
                return None;
            }
            Some(InterfaceInfo {
                name: iface.name.clone(),
                loopback: iface.is_loopback(),
                addresses,
            })
        })
        .collect()
}

fn get_by_name(name: &str) -> Result<NetworkInterface, ConfigError> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| ConfigError::InterfaceNotFound(name.to_string()))
}

fn ipv4_addresses(iface: &NetworkInterface) -> Vec<Ipv4Addr> {
    iface
        .ips
        .iter()
        .filter_map(|net| match net.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .collect()
}

fn first_ipv4(iface: &NetworkInterface) -> Option<Ipv4Addr> {
    ipv4_addresses(iface).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector() {
        assert_eq!("".parse::<InterfaceSelector>().unwrap(), InterfaceSelector::Default);
        assert_eq!("AUTO".parse::<InterfaceSelector>().unwrap(), InterfaceSelector::Default);
        assert_eq!(
            "192.168.1.5".parse::<InterfaceSelector>().unwrap(),
            InterfaceSelector::Addr(Ipv4Addr::new(192, 168, 1, 5))
        );
        assert_eq!(
            "en0".parse::<InterfaceSelector>().unwrap(),
            InterfaceSelector::Name("en0".to_string())
        );
        assert!("::1".parse::<InterfaceSelector>().is_err());
    }

    #[test]
    fn test_resolve_without_lookup() {
        assert_eq!(InterfaceSelector::Default.resolve().unwrap(), Ipv4Addr::UNSPECIFIED);
        let addr = Ipv4Addr::new(10, 1, 2, 3);
        assert_eq!(InterfaceSelector::Addr(addr).resolve().unwrap(), addr);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = InterfaceSelector::Name("no-such-iface0".to_string())
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InterfaceNotFound(_)));
    }

    #[test]
    fn test_serde_as_string() {
        let sel: InterfaceSelector = serde_json::from_str("\"10.0.0.2\"").unwrap();
        assert_eq!(sel, InterfaceSelector::Addr(Ipv4Addr::new(10, 0, 0, 2)));
        assert_eq!(serde_json::to_string(&InterfaceSelector::Default).unwrap(), "\"auto\"");
    }
}
