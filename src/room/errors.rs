//! Room coordinator errors (component E, §7 `RoomError`/`SeatError`).

use std::fmt;

use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub enum RoomError {
    /// No room exists for the given join code.
    RoomNotFound,
    /// All four seats are already taken.
    RoomFull,
    /// The deal has already been started; late joins aren't seats.
    AlreadyStarted,
    /// `StartGame` issued before all four seats are filled.
    NotEnoughPlayers,
    /// A command that needs an in-progress deal arrived before `StartGame`.
    NotStarted,
    /// The acting session isn't seated in this room.
    NotSeated,
    /// A deal/bidding/play/belote rule was violated.
    Domain(DomainError),
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::RoomNotFound => write!(f, "room not found"),
            RoomError::RoomFull => write!(f, "room is full"),
            RoomError::AlreadyStarted => write!(f, "game already started"),
            RoomError::NotEnoughPlayers => write!(f, "need four players to start"),
            RoomError::NotStarted => write!(f, "game has not started"),
            RoomError::NotSeated => write!(f, "you are not seated in this room"),
            RoomError::Domain(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<DomainError> for RoomError {
    fn from(e: DomainError) -> Self {
        RoomError::Domain(e)
    }
}
