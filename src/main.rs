//! Main entry point for the vpncheck CLI tool
//!
//! Reports the public IP address and location of this machine, or of any
//! IPv4 address given on the command line.

use clap::Parser;
use log::info;
use vpncheck_rs::cli::Cli;
use vpncheck_rs::config::AppConfig;
use vpncheck_rs::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    info!("Starting vpncheck v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}, using defaults", e);
        AppConfig::default()
    });

    // Execute CLI logic
    if !cli.run(config).await? {
        std::process::exit(1);
    }

    Ok(())
}
