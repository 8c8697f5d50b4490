//! Command implementations.

pub mod interfaces;
pub mod scan;

pub use interfaces::run_interfaces;
pub use scan::run_scan;
