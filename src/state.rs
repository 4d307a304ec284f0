//! Process-wide application state (mirrors the teacher's
//! `state::app_state::AppState`, minus the database pool and security
//! config this crate has no use for): the room registry and the websocket
//! broadcast hub, shared across every connection via `web::Data`.

use std::sync::Arc;

use crate::room::RoomRegistry;
use crate::ws::hub::WsHub;

#[derive(Clone)]
pub struct AppState {
    rooms: Arc<RoomRegistry>,
    hub: Arc<WsHub>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::new()),
            hub: Arc::new(WsHub::new()),
        }
    }

    pub fn rooms(&self) -> &Arc<RoomRegistry> {
        &self.rooms
    }

    pub fn hub(&self) -> &Arc<WsHub> {
        &self.hub
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
