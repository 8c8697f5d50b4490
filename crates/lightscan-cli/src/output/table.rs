//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, ContentArrangement, Table};
use lightscan_core::interface::InterfaceInfo;
use lightscan_core::Device;

use super::OutputFormatter;

/// Message printed when a scan ends without replies.
pub const NO_DEVICES: &str = "No devices found.";

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        if devices.is_empty() {
            return NO_DEVICES.to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["SKU", "IP", "Device ID", "Firmware"]);

        for device in devices {
            table.add_row(vec![
                Cell::new(&device.sku),
                Cell::new(&device.ip),
                Cell::new(device.extra_str("device").unwrap_or("-")),
                Cell::new(device.extra_str("wifiVersionSoft").unwrap_or("-")),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }

    fn format_found(&self, device: &Device) -> Option<String> {
        Some(format!("Device: {} - IP: {}", device.sku.bold(), device.ip))
    }

    fn format_interfaces(&self, interfaces: &[InterfaceInfo]) -> String {
        if interfaces.is_empty() {
            return "No IPv4 interfaces found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "IPv4", "Loopback"]);

        for iface in interfaces {
            let addrs: Vec<String> = iface.addresses.iter().map(|a| a.to_string()).collect();
            table.add_row(vec![
                Cell::new(&iface.name),
                Cell::new(addrs.join(", ")),
                Cell::new(if iface.loopback { "yes" } else { "no" }),
            ]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device(sku: &str, ip: &str) -> Device {
        serde_json::from_value(json!({"sku": sku, "ip": ip})).unwrap()
    }

    #[test]
    fn test_empty_devices_message() {
        assert_eq!(TableOutput::new().format_devices(&[]), "No devices found.");
    }

    #[test]
    fn test_table_lists_each_device() {
        let out = TableOutput::new()
            .format_devices(&[device("ABC123", "192.168.1.10"), device("XYZ789", "192.168.1.11")]);
        assert!(out.contains("ABC123"));
        assert!(out.contains("192.168.1.11"));
        assert!(out.ends_with("Found 2 device(s)"));
    }

    #[test]
    fn test_found_line() {
        colored::control::set_override(false);
        let line = TableOutput::new()
            .format_found(&device("ABC123", "192.168.1.10"))
            .unwrap();
        assert_eq!(line, "Device: ABC123 - IP: 192.168.1.10");
    }
}
