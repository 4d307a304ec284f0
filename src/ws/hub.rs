//! The process-wide websocket broadcast registry (§4.F, §5): a `DashMap` of
//! per-room session maps, mirroring the teacher's `ws::hub::GameSessionRegistry`
//! (there keyed by game id, here by room code) but without a Redis fan-out
//! layer — every session for a room lives in this one process, so delivery
//! is a direct `Recipient::do_send`.

use actix::prelude::*;
use dashmap::DashMap;

use crate::room::ClientId;
use crate::ws::protocol::ServerMsg;

/// One outbound envelope, addressed to a single session actor.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Deliver(pub ServerMsg);

type RoomSessions = DashMap<ClientId, Recipient<Deliver>>;

#[derive(Default)]
pub struct WsHub {
    rooms: DashMap<String, RoomSessions>,
}

impl WsHub {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn register(&self, room_code: &str, client: ClientId, recipient: Recipient<Deliver>) {
        self.rooms
            .entry(room_code.to_string())
            .or_default()
            .insert(client, recipient);
    }

    /// Drop `client` from `room_code`'s session map, and the map itself if
    /// it's now empty (the registry holds no entries for rooms with no
    /// live connections).
    pub fn unregister(&self, room_code: &str, client: ClientId) {
        if let Some(sessions) = self.rooms.get(room_code) {
            sessions.remove(&client);
        }
        let now_empty = self
            .rooms
            .get(room_code)
            .map(|s| s.is_empty())
            .unwrap_or(false);
        if now_empty {
            self.rooms.remove(room_code);
        }
    }

    /// Send the same envelope to every session currently registered for
    /// `room_code` (§4.E: "broadcast room-update... to all clients of the
    /// room").
    pub fn broadcast(&self, room_code: &str, msg: ServerMsg) {
        if let Some(sessions) = self.rooms.get(room_code) {
            for entry in sessions.iter() {
                entry.value().do_send(Deliver(msg.clone()));
            }
        }
    }

    /// Send each `(client, view)` pair to that client's own session only
    /// (the per-viewer `game_state` projection — §9 Design Notes
    /// hand-visibility).
    pub fn broadcast_views(
        &self,
        room_code: &str,
        views: Vec<(ClientId, crate::domain::DealView)>,
    ) {
        if let Some(sessions) = self.rooms.get(room_code) {
            for (client, view) in views {
                if let Some(entry) = sessions.get(&client) {
                    entry.do_send(Deliver(ServerMsg::game_state(view)));
                }
            }
        }
    }

    pub fn session_count(&self, room_code: &str) -> usize {
        self.rooms.get(room_code).map(|s| s.len()).unwrap_or(0)
    }
}
