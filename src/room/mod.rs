//! Room coordinator (component E): table lifecycle, seat assignment, and
//! dispatch of client commands into the pure `domain` state machine. Nothing
//! here is actix-aware; broadcast fan-out to actual sockets lives in `ws`.

pub mod errors;
pub mod registry;
pub mod room;

pub use errors::RoomError;
pub use registry::RoomRegistry;
pub use room::{ClientId, Room, RoomRoster, RosterEntry};
