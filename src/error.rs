//! The crate-wide error taxonomy (§7): one `thiserror`-derived enum unifying
//! `domain::DomainError` (via `room::RoomError`) and the protocol-level
//! failures the transport adapter can raise on its own (a malformed frame
//! never reaches the room coordinator at all). `GameError::message()` is
//! what actually goes out in an `error` envelope; `Display` (from
//! `thiserror`) backs `tracing`'s `%err` logging at the rejection site.

use thiserror::Error;

use crate::room::RoomError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Envelope didn't parse as any known `ClientMsg` variant, or a known
    /// variant was missing a required field.
    #[error("malformed message: {0}")]
    Protocol(String),

    /// The envelope's `type` tag wasn't recognized.
    #[error("unknown message type: {0}")]
    UnknownType(String),

    /// Raised by the room coordinator or the domain state machine it wraps.
    #[error(transparent)]
    Room(#[from] RoomError),
}

impl GameError {
    /// The string sent back to the offending client in an `error` envelope
    /// (§4.F, §7: "every rejected command reported synchronously to sender
    /// only").
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_error_converts_and_renders() {
        let err: GameError = RoomError::RoomFull.into();
        assert_eq!(err.message(), "room is full");
    }

    #[test]
    fn protocol_error_renders_detail() {
        let err = GameError::Protocol("missing field `roomCode`".to_string());
        assert_eq!(err.message(), "malformed message: missing field `roomCode`");
    }
}
