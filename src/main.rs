//! Line Chat Server - Entry Point
//!
//! Binds the TCP listener and hands it to the accept loop.

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use line_chat::config::{Config, DEFAULT_LOG_FILTER};
use line_chat::serve;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=line_chat=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::parse();

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Chat server listening on {}", config.addr);

    serve(listener).await;

    Ok(())
}
