//! The process-wide room registry (component E): a lazily-populated map
//! from room code to `Room`. Creation/lookup/deletion are the only
//! operations under this registry-level lock (§5); a room's own content is
//! protected separately, by the room's own per-room mutex (see
//! `room::room::Room`).

use std::sync::Arc;

use dashmap::DashMap;

use crate::room::room::Room;

/// Shared across every connection. Mirrors the teacher's `DashMap`-backed
/// websocket session registry in `ws::hub`, keyed by room code instead of
/// game id.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Look up `code` (already normalized by the caller), creating the room
    /// if it doesn't exist yet (§3 Lifecycles: "Rooms are created lazily on
    /// first join").
    pub fn get_or_create(&self, code: &str) -> Arc<Room> {
        self.rooms
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(Room::new(code.to_string())))
            .clone()
    }

    pub fn get(&self, code: &str) -> Option<Arc<Room>> {
        self.rooms.get(code).map(|r| r.clone())
    }

    /// Drop `code` from the registry if its room has no seated clients left
    /// (§3: "destroyed when they become empty"). A no-op if the room still
    /// has players or no longer exists.
    pub fn remove_if_empty(&self, code: &str) {
        let should_remove = self.rooms.get(code).map(|r| r.is_empty()).unwrap_or(false);
        if should_remove {
            self.rooms.remove(code);
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
