//! Credo - Main Entry Point
//!
//! Usage:
//!     credo show kb.txt
//!     credo revise kb.txt --non-prioritized "(A4,A1,F3)"
//!     credo rank weights.txt --format json

use clap::Parser;
use credo::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.config();

    credo::tracing::init_with_filter(&config.log_filter());

    let report = credo::run(&config, &cli.command)?;
    print!("{}", report.render(config.format)?);
    Ok(())
}
