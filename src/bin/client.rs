//! Line Chat Client
//!
//! Pipes stdin to the server and server lines to stdout. Exits once stdin
//! is exhausted and the server has closed the connection.

use clap::Parser;
use tokio::io::{self, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use line_chat::config::DEFAULT_ADDR;
use line_chat::AppError;

#[derive(Parser, Debug)]
#[command(name = "line-chat-client")]
#[command(about = "Connect to a line chat server", long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short, long, default_value = DEFAULT_ADDR)]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("line_chat_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let stream = TcpStream::connect(&args.addr).await?;
    info!("Connected to {}", args.addr);
    let (mut reader, mut writer) = stream.into_split();

    let read_task = tokio::spawn(async move {
        let mut stdout = io::stdout();
        if let Err(e) = io::copy(&mut reader, &mut stdout).await {
            error!("Read from server failed: {}", e);
        }
        info!("Connection closed by server");
    });

    io::copy(&mut io::stdin(), &mut writer).await?;
    writer.shutdown().await?;

    if let Err(e) = read_task.await {
        error!("Reader task failed: {}", e);
    }

    Ok(())
}
