//! Connection handler
//!
//! Drives one connection through its lifecycle: welcome, announce, join,
//! relay chat lines, then leave. The order of the first steps matters: the
//! arrival is broadcast before the join is submitted so the newcomer never
//! hears about itself.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::timeout;
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, warn};

use crate::codec::ChatLineCodec;
use crate::error::AppError;
use crate::hub::HubCommand;
use crate::mailbox::write_mailbox;
use crate::message::ServerMessage;
use crate::participant::Participant;
use crate::types::IdGenerator;

/// How long a departing participant's mailbox writer may keep flushing
pub const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Aborts the mailbox writer if the handler exits while it is still running
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Handle a new connection
///
/// Returns once the peer has gone and the participant's mailbox writer has
/// stopped, or has been aborted after `WRITER_DRAIN_TIMEOUT`. The stream is
/// dropped on every path.
pub async fn handle_connection<S>(
    stream: S,
    peer_addr: String,
    ids: Arc<IdGenerator>,
    cmd_tx: mpsc::Sender<HubCommand>,
) -> Result<(), AppError>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (reader, writer) = tokio::io::split(stream);

    let (participant, mailbox) = Participant::new(ids.next_id(), peer_addr);
    let id = participant.id;
    info!("Participant {} connected from {}", id, participant.addr);

    let mut write_task = tokio::spawn(write_mailbox(writer, mailbox));
    let _writer_guard = AbortOnDrop(write_task.abort_handle());

    // Welcome goes straight into our own outbox, not through the hub.
    if participant.send(ServerMessage::Welcome(id)).await.is_err() {
        debug!("Mailbox writer for {} stopped before welcome", id);
    }

    send(&cmd_tx, HubCommand::Broadcast(ServerMessage::Entered(id))).await?;
    send(&cmd_tx, HubCommand::Join(participant)).await?;

    let mut lines = FramedRead::new(reader, ChatLineCodec::new());
    let writer_finished = loop {
        tokio::select! {
            line = lines.next() => match line {
                Some(Ok(text)) => {
                    debug!("Line from {}: {}", id, text);
                    send(&cmd_tx, HubCommand::Broadcast(ServerMessage::Chat { from: id, text })).await?;
                }
                None => {
                    debug!("Participant {} closed the connection", id);
                    break false;
                }
                Some(Err(e)) => {
                    warn!("Read error for {}: {}", id, e);
                    break false;
                }
            },
            result = &mut write_task => {
                match result {
                    Ok(Err(e)) => warn!("Write error for {}: {}", id, e),
                    Ok(Ok(())) => debug!("Mailbox writer for {} finished early", id),
                    Err(e) => error!("Mailbox writer for {} panicked: {}", id, e),
                }
                break true;
            }
        }
    };

    send(&cmd_tx, HubCommand::Leave(id)).await?;
    send(&cmd_tx, HubCommand::Broadcast(ServerMessage::Left(id))).await?;

    // The hub closes our outbox on leave, so the writer drains and stops
    // unless the peer has stopped reading.
    if !writer_finished {
        match timeout(WRITER_DRAIN_TIMEOUT, &mut write_task).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => debug!("Mailbox writer for {} ended with: {}", id, e),
            Ok(Err(e)) => error!("Mailbox writer for {} panicked: {}", id, e),
            Err(_) => {
                warn!("Mailbox writer for {} still blocked, aborting", id);
                write_task.abort();
            }
        }
    }

    info!("Participant {} disconnected", id);

    Ok(())
}

/// Submit a command to the hub
async fn send(cmd_tx: &mpsc::Sender<HubCommand>, cmd: HubCommand) -> Result<(), AppError> {
    cmd_tx.send(cmd).await.map_err(|_| AppError::HubClosed)
}
