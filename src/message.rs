//! Message protocol definitions
//!
//! Line-oriented text protocol. Clients send one chat line per message,
//! verbatim. The server sends `ServerMessage`s, each rendered as a single
//! line through `Display`.

use std::fmt;

use crate::types::ParticipantId;

/// Server → Client message
///
/// Everything a mailbox writer can put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Greeting sent only to the participant it names
    Welcome(ParticipantId),
    /// A participant joined the room
    Entered(ParticipantId),
    /// A chat line relayed from a participant
    Chat { from: ParticipantId, text: String },
    /// A participant left the room
    Left(ParticipantId),
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::Welcome(id) => write!(f, "welcome: {}", id),
            ServerMessage::Entered(id) => write!(f, "user '{}' has entered", id),
            ServerMessage::Chat { from, text } => write!(f, "{}: {}", from, text),
            ServerMessage::Left(id) => write!(f, "user '{}' has left", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_lines() {
        let id = ParticipantId(7);
        assert_eq!(ServerMessage::Welcome(id).to_string(), "welcome: 7");
        assert_eq!(ServerMessage::Entered(id).to_string(), "user '7' has entered");
        assert_eq!(ServerMessage::Left(id).to_string(), "user '7' has left");
    }

    #[test]
    fn test_chat_text_is_verbatim() {
        let msg = ServerMessage::Chat {
            from: ParticipantId(3),
            text: "  hello: world ".to_string(),
        };
        assert_eq!(msg.to_string(), "3:   hello: world ");
    }
}
