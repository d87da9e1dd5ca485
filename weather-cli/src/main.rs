//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Prompting for a city
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cmd = cli::Cli::parse();
    let outcome = cmd.run().await?;
    Ok(outcome.exit_code())
}

/// Logs go to stderr so they never interleave with the weather report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
