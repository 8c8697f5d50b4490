//! JSON-formatted output for CLI.

use lightscan_core::interface::InterfaceInfo;
use lightscan_core::Device;
use serde::Serialize;
use serde_json::json;

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        let output = json!({
            "devices": devices,
            "count": devices.len()
        });
        Self::to_json(&output)
    }

    fn format_found(&self, _device: &Device) -> Option<String> {
        // The final document carries every device; live lines would break parsing.
        None
    }

    fn format_interfaces(&self, interfaces: &[InterfaceInfo]) -> String {
        Self::to_json(&json!({ "interfaces": interfaces }))
    }
}
