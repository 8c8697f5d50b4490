//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use lightscan_core::interface::InterfaceInfo;
use lightscan_core::Device;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the final device list of a scan
    fn format_devices(&self, devices: &[Device]) -> String;

    /// Format a single device as soon as it is found (`None` prints nothing)
    fn format_found(&self, device: &Device) -> Option<String>;

    /// Format local interface list
    fn format_interfaces(&self, interfaces: &[InterfaceInfo]) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
