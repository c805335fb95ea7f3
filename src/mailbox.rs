//! Mailbox writer
//!
//! Drains a participant's outbox onto its connection, one line per message.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::participant::Mailbox;

/// Write every queued message to `writer` until the outbox is closed
///
/// Returns `Ok(())` once the hub closes the outbox, after shutting down the
/// write side. Returns the first write error otherwise.
pub async fn write_mailbox<W>(mut writer: W, mut mailbox: Mailbox) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(msg) = mailbox.recv().await {
        let line = format!("{}\n", msg);
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }

    debug!("Outbox closed, mailbox writer finished");
    writer.shutdown().await
}
