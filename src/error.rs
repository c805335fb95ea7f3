//! Error types for the chat server
//!
//! Defines connection-level errors and outbox send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Every variant is terminal to the single connection that hit it.
/// Nothing here is ever propagated into the hub.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error on the connection or listener
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The hub's command queue is closed (hub task is gone)
    #[error("Hub closed")]
    HubClosed,
}

/// Outbox send errors
///
/// Occurs when enqueuing into a participant whose mailbox writer has stopped.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the outbox has been dropped
    #[error("Mailbox closed")]
    MailboxClosed,
}
