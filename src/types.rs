//! Basic type definitions for the chat server
//!
//! Provides:
//! - `ParticipantId`: sequential participant identifier
//! - `IdGenerator`: mutex-guarded source of `ParticipantId`s

use std::sync::{Mutex, PoisonError};

/// Unique participant identifier (newtype pattern)
///
/// Issued once per connection and never reused for the process lifetime.
/// Doubles as the roster key inside the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub u64);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential identifier source
///
/// Shared between connection workers behind an `Arc`. Yields 1, 2, 3, ...
/// with no gaps and no duplicates under concurrent use.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Mutex<u64>,
}

impl IdGenerator {
    /// Create a generator whose first id is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next identifier
    pub fn next_id(&self) -> ParticipantId {
        // A panic while holding the lock cannot leave the counter half-updated.
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        *last += 1;
        ParticipantId(*last)
    }
}
