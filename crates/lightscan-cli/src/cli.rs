//! CLI argument definitions using clap.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lightscan_core::interface::InterfaceSelector;
use lightscan_core::ScanConfig;

use crate::error::CliError;

/// lightscan - find LAN lights with a multicast scan
#[derive(Parser, Debug)]
#[command(name = "lightscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to config.json in the platform config directory)
    #[arg(long, global = true, env = "LIGHTSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan for devices (default)
    Scan,

    /// List local interfaces usable for the scan
    Interfaces,
}

// ==================== Scan ====================

/// Overrides for the scan config. Unset options keep the file/default value.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Multicast group the scan request is sent to
    #[arg(long, global = true, env = "LIGHTSCAN_MULTICAST_ADDRESS")]
    pub multicast_address: Option<Ipv4Addr>,

    /// Port devices listen on for scan requests
    #[arg(long, global = true, env = "LIGHTSCAN_SCAN_PORT")]
    pub scan_port: Option<u16>,

    /// Local port replies arrive on
    #[arg(long, global = true, env = "LIGHTSCAN_RESPONSE_PORT")]
    pub response_port: Option<u16>,

    /// Interface name or IPv4 address ("auto" lets the OS choose)
    #[arg(short, long, global = true, env = "LIGHTSCAN_INTERFACE")]
    pub interface: Option<String>,

    /// Collection window in seconds
    #[arg(short, long, global = true, env = "LIGHTSCAN_TIMEOUT")]
    pub timeout: Option<f64>,

    /// Multicast TTL
    #[arg(long, global = true, env = "LIGHTSCAN_TTL")]
    pub ttl: Option<u32>,

    /// Account topic sent in the scan request
    #[arg(long, global = true)]
    pub account_topic: Option<String>,
}

impl ScanArgs {
    /// Layer these overrides on top of `config`.
    pub fn apply(&self, config: &mut ScanConfig) -> Result<(), CliError> {
        if let Some(addr) = self.multicast_address {
            config.multicast_address = addr;
        }
        if let Some(port) = self.scan_port {
            config.scan_port = port;
        }
        if let Some(port) = self.response_port {
            config.response_port = port;
        }
        if let Some(ref iface) = self.interface {
            config.interface = iface
                .parse::<InterfaceSelector>()
                .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        }
        if let Some(secs) = self.timeout {
            config.timeout_seconds = secs;
        }
        if let Some(ttl) = self.ttl {
            config.multicast_ttl = ttl;
        }
        if let Some(ref topic) = self.account_topic {
            config.account_topic = topic.clone();
        }
        Ok(())
    }
}

impl Cli {
    /// Build the effective scan config: defaults, then file, then env/flags.
    pub fn scan_config(&self) -> Result<ScanConfig, CliError> {
        let mut config = match self.config {
            Some(ref path) => ScanConfig::from_file(path)?,
            None => ScanConfig::load_default()?,
        };
        self.scan.apply(&mut config)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_arguments_is_default_scan() {
        let cli = Cli::try_parse_from(["lightscan"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert!(cli.scan.timeout.is_none());
    }

    #[test]
    fn test_flags_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["lightscan", "--timeout", "2.5", "scan", "-i", "eth0"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Scan)));
        assert_eq!(cli.scan.timeout, Some(2.5));
        assert_eq!(cli.scan.interface.as_deref(), Some("eth0"));
    }

    #[test]
    fn test_rejects_bad_group() {
        assert!(Cli::try_parse_from(["lightscan", "--multicast-address", "nope"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"response_port": 5002, "timeout_seconds": 9.0}"#)
            .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli =
            Cli::try_parse_from(["lightscan", "--config", path.as_str(), "--timeout", "1"]).unwrap();
        let config = cli.scan_config().unwrap();

        assert_eq!(config.response_port, 5002);
        assert_eq!(config.timeout_seconds, 1.0);
        assert_eq!(config.scan_port, 4001);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let path = path.to_str().unwrap().to_string();
        let cli =
            Cli::try_parse_from(["lightscan", "--config", path.as_str(), "--timeout", "0"]).unwrap();
        let err = cli.scan_config().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let path = path.to_str().unwrap().to_string();
        let cli = Cli::try_parse_from(["lightscan", "--config", path.as_str(), "--timeout", "1e19"])
            .unwrap();
        let err = cli.scan_config().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_apply_interface() {
        let mut config = ScanConfig::default();
        let args = ScanArgs {
            interface: Some("10.0.0.4".to_string()),
            ..ScanArgs::default()
        };
        args.apply(&mut config).unwrap();
        assert_eq!(
            config.interface,
            InterfaceSelector::Addr(Ipv4Addr::new(10, 0, 0, 4))
        );

        let args = ScanArgs {
            interface: Some("fe80::1".to_string()),
            ..ScanArgs::default()
        };
        assert!(matches!(
            args.apply(&mut config),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
