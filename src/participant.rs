//! Participant struct definition
//!
//! Represents one connected chat user together with their outbox.

use std::time::SystemTime;

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::message::ServerMessage;
use crate::types::ParticipantId;

/// Outbox capacity per participant
pub const MAILBOX_CAPACITY: usize = 8;

/// Receive side of a participant's outbox, drained by its mailbox writer
pub type Mailbox = mpsc::Receiver<ServerMessage>;

/// Connected participant information
///
/// Holds the only sender into the participant's outbox. Dropping the
/// `Participant` closes the outbox, which stops its mailbox writer.
#[derive(Debug)]
pub struct Participant {
    /// Unique identifier for this participant
    pub id: ParticipantId,
    /// Peer address of the connection
    pub addr: String,
    /// Time the participant was created
    pub joined_at: SystemTime,
    /// Server → Client outbox
    outbox: mpsc::Sender<ServerMessage>,
}

impl Participant {
    /// Create a participant and the mailbox its writer will drain
    pub fn new(id: ParticipantId, addr: String) -> (Self, Mailbox) {
        let (outbox, mailbox) = mpsc::channel(MAILBOX_CAPACITY);
        let participant = Self {
            id,
            addr,
            joined_at: SystemTime::now(),
            outbox,
        };
        (participant, mailbox)
    }

    /// Enqueue a message into this participant's outbox
    ///
    /// Waits while the outbox is full. Returns an error if the mailbox
    /// writer has stopped.
    pub async fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        self.outbox
            .send(msg)
            .await
            .map_err(|_| SendError::MailboxClosed)
    }
}
