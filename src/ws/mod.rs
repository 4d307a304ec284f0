//! Session/transport adapter (component F) and the websocket broadcast hub.
//! Everything actix-aware lives here; `room` and `domain` know nothing
//! about sockets.

pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::WsHub;
