//! Interfaces command implementation.

use lightscan_core::interface::list_interfaces;

use crate::error::Result;
use crate::output::get_formatter;

/// Run the interfaces command
pub fn run_interfaces(json: bool) -> Result<()> {
    let formatter = get_formatter(json);
    println!("{}", formatter.format_interfaces(&list_interfaces()));
    Ok(())
}
