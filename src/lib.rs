//! Belote server library: the pure rule engine (`domain`), the room
//! coordinator (`room`), the websocket transport adapter (`ws`), and the
//! ambient stack (`error`, `telemetry`, `state`, `health`) tying them to an
//! actix-web process.

pub mod domain;
pub mod error;
pub mod health;
pub mod room;
pub mod state;
pub mod telemetry;
#[cfg(test)]
pub mod test_support;
pub mod ws;

pub use error::GameError;
pub use state::AppState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
