//! Car fleet rental service entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fleet_axum::{ServerConfig, start_server};

/// Car fleet rental service.
#[derive(Debug, Parser)]
#[command(name = "fleet-server", version, about)]
struct Cli {
    /// Port to listen on (overrides the PORT environment variable).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }

    start_server(config).await
}
