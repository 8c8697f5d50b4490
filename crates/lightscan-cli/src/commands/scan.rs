//! Scan command implementation.

use std::io::{self, Write};

use lightscan_core::{DiscoveryClient, ScanConfig};

use crate::error::Result;
use crate::output::get_formatter;

/// Run the scan command
pub async fn run_scan(config: ScanConfig, json: bool) -> Result<()> {
    let formatter = get_formatter(json);

    if !json {
        println!(
            "Sending scan request to {} on interface {}",
            config.scan_target(),
            config.interface
        );
        println!(
            "Listening for responses on port {} for {} seconds...",
            config.response_port, config.timeout_seconds
        );
    }

    let devices = DiscoveryClient::scan(&config, |device| {
        if let Some(line) = formatter.format_found(device) {
            println!("{}", line);
            io::stdout().flush().ok();
        }
    })
    .await?;

    println!("{}", formatter.format_devices(&devices));

    Ok(())
}
