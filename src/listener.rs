//! TCP accept loop
//!
//! Starts the hub and spawns one connection handler per accepted socket.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::handler::handle_connection;
use crate::hub::{Hub, HUB_QUEUE_CAPACITY};
use crate::types::IdGenerator;

/// Serve chat connections from `listener` forever
///
/// Accept errors are logged and the loop keeps going.
pub async fn serve(listener: TcpListener) {
    let (cmd_tx, cmd_rx) = mpsc::channel(HUB_QUEUE_CAPACITY);
    tokio::spawn(Hub::new(cmd_rx).run());
    let ids = Arc::new(IdGenerator::new());

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let cmd_tx = cmd_tx.clone();
                let ids = Arc::clone(&ids);

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr.to_string(), ids, cmd_tx).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
