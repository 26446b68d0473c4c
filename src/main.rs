//! Space Missions Dashboard - command line entry point.

use anyhow::Result;
use clap::Parser;
use space_dashboard::cli::{self, Args};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so query output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("space_dashboard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    cli::run(&args)
}
