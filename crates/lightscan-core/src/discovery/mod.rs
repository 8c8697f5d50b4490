//! UDP multicast device discovery.
//!
//! Provides socket setup and the one-shot scan client.

pub mod client;
pub mod socket;

pub use client::{collect_until, DiscoveryClient};
pub use socket::create_scan_socket;
