//! Line-oriented TCP Chat Server Library
//!
//! A single chat room over plain TCP. Every line a client sends is
//! relayed to everyone in the room.
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Hub` is the central actor owning the roster
//! - Each connection runs a `handler` task that talks to the hub
//! - Each participant has a mailbox writer task draining its outbox
//! - No locks on the roster - all changes go through message passing
//!
//! # Wire format
//! - `welcome: <id>` (to the newcomer only)
//! - `user '<id>' has entered`
//! - `<id>: <text>`
//! - `user '<id>' has left`
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:2020").await.unwrap();
//!     line_chat::serve(listener).await;
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod hub;
pub mod listener;
pub mod mailbox;
pub mod message;
pub mod participant;
pub mod types;

// Re-export main types for convenience
pub use codec::{ChatLineCodec, MAX_LINE_LENGTH};
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use hub::{Hub, HubCommand};
pub use listener::serve;
pub use mailbox::write_mailbox;
pub use message::ServerMessage;
pub use participant::{Mailbox, Participant};
pub use types::{IdGenerator, ParticipantId};
