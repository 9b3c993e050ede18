//! Deckcrew CLI binary entry point.

use anyhow::Result;
use clap::Parser;
use deckcrew_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Cli::parse().run().await
}
