//! lightscan CLI - find LAN lights with a UDP multicast scan.
//!
//! Sends one scan request to the well-known group, prints each device that
//! answers within the window, then a summary.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::Interfaces) => commands::run_interfaces(cli.json),
        Some(Commands::Scan) | None => {
            let config = cli.scan_config()?;
            commands::run_scan(config, cli.json).await
        }
    }
}
