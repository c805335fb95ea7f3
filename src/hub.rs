//! Hub actor implementation
//!
//! The single task that owns the roster and fans broadcasts out to every
//! registered participant. All roster changes arrive as `HubCommand`s over
//! one mpsc channel, so no locks are needed.

use std::collections::HashMap;
use std::time::SystemTime;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::message::ServerMessage;
use crate::participant::Participant;
use crate::types::ParticipantId;

/// Capacity of the hub's command queue
pub const HUB_QUEUE_CAPACITY: usize = 8;

/// Commands sent from connection workers to the hub
#[derive(Debug)]
pub enum HubCommand {
    /// Register a participant in the roster
    Join(Participant),
    /// Remove a participant from the roster and close their outbox
    Leave(ParticipantId),
    /// Deliver a message to every registered participant
    Broadcast(ServerMessage),
}

/// The hub actor
///
/// Processes exactly one command at a time, so every broadcast sees the
/// roster as left by all joins and leaves processed before it.
pub struct Hub {
    /// Registered participants: ParticipantId -> Participant
    roster: HashMap<ParticipantId, Participant>,
    /// Command receiver channel
    receiver: mpsc::Receiver<HubCommand>,
}

impl Hub {
    /// Create a new hub with the given command receiver
    pub fn new(receiver: mpsc::Receiver<HubCommand>) -> Self {
        Self {
            roster: HashMap::new(),
            receiver,
        }
    }

    /// Run the hub event loop
    ///
    /// Runs until every command sender is dropped. Remaining participants are
    /// dropped on return, which closes their outboxes.
    pub async fn run(mut self) {
        info!("Hub started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Hub shutting down with {} participants", self.roster.len());
    }

    /// Process a single command
    async fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Join(participant) => self.handle_join(participant),
            HubCommand::Leave(id) => self.handle_leave(id),
            HubCommand::Broadcast(msg) => self.handle_broadcast(msg).await,
        }
    }

    fn handle_join(&mut self, participant: Participant) {
        info!("Participant {} joined from {}", participant.id, participant.addr);
        self.roster.insert(participant.id, participant);
        debug!("Roster size: {}", self.roster.len());
    }

    fn handle_leave(&mut self, id: ParticipantId) {
        // Dropping the participant drops the last outbox sender.
        let Some(participant) = self.roster.remove(&id) else {
            warn!("Leave for participant {} not in roster", id);
            return;
        };

        let session = SystemTime::now()
            .duration_since(participant.joined_at)
            .unwrap_or_default();
        info!(
            "Participant {} ({}) left after {:?}",
            id, participant.addr, session
        );
        debug!("Roster size: {}", self.roster.len());
    }

    /// Fan a message out to the roster
    ///
    /// Blocks on any full outbox, stalling the whole hub until that
    /// participant's writer catches up.
    async fn handle_broadcast(&mut self, msg: ServerMessage) {
        debug!("Broadcasting to {} participants: {}", self.roster.len(), msg);

        for participant in self.roster.values() {
            if participant.send(msg.clone()).await.is_err() {
                debug!("Mailbox of participant {} already closed", participant.id);
            }
        }
    }
}
