//! A single table (component E, §3 `Room`): four seats, an optional
//! in-progress `DealState`, and the command dispatch that turns a seated
//! client's request into a deal transition. All mutable content lives
//! behind one `parking_lot::Mutex`, realizing the per-room critical section
//! §5 requires — one command at a time, never interleaved with another
//! command on the same room.

use std::time::Instant;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::bidding::{submit_bid as domain_submit_bid, BidAction};
use crate::domain::cards::Card;
use crate::domain::deal::{next_deal, start_deal};
use crate::domain::play::play_card as domain_play_card;
use crate::domain::snapshot::DealView;
use crate::domain::state::{DealState, Phase, PlayerId};
use crate::domain::belote;
use crate::room::errors::RoomError;

/// Opaque per-connection identity (§4.F: "Client id is server-generated,
/// opaque, unique per connection").
pub type ClientId = Uuid;

#[derive(Debug, Clone)]
struct SeatInfo {
    client_id: ClientId,
    nickname: String,
}

struct RoomState {
    seats: [Option<SeatInfo>; 4],
    deal: Option<DealState>,
    rng: ChaCha8Rng,
}

/// One entry of a `room_update` broadcast (§4.F).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub id: ClientId,
    pub nickname: String,
    pub seat: PlayerId,
}

/// The full roster broadcast to every client of a room on any seating
/// change (§4.E Join/Disconnect).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRoster {
    pub room_code: String,
    pub players: Vec<RosterEntry>,
}

pub struct Room {
    pub code: String,
    pub created_at: Instant,
    state: Mutex<RoomState>,
}

impl Room {
    pub fn new(code: String) -> Self {
        // Seeded from process entropy, not a fixed constant: production play
        // must not be predictable even though the seed *source* (an
        // injectable `RngCore`) is the same abstraction the domain layer's
        // tests pin down (§9 Design Notes).
        let seed: u64 = rand::random();
        Room {
            code,
            created_at: Instant::now(),
            state: Mutex::new(RoomState {
                seats: Default::default(),
                deal: None,
                rng: ChaCha8Rng::seed_from_u64(seed),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().seats.iter().all(Option::is_none)
    }

    pub fn seat_of(&self, client: ClientId) -> Option<PlayerId> {
        seat_of_locked(&self.state.lock(), client)
    }

    pub fn roster(&self) -> RoomRoster {
        roster_of(&self.code, &self.state.lock())
    }

    /// Join (or re-join) this room under `nickname`. Re-assigns the same
    /// seat if `client` already holds one (idempotent per §4.E); otherwise
    /// takes the lowest empty seat, or fails if the room is full.
    pub fn join(&self, client: ClientId, nickname: String) -> Result<RoomRoster, RoomError> {
        let mut st = self.state.lock();
        if let Some(idx) = seat_index_of(&st, client) {
            st.seats[idx] = Some(SeatInfo {
                client_id: client,
                nickname,
            });
            return Ok(roster_of(&self.code, &st));
        }
        let idx = st
            .seats
            .iter()
            .position(Option::is_none)
            .ok_or(RoomError::RoomFull)?;
        st.seats[idx] = Some(SeatInfo {
            client_id: client,
            nickname,
        });
        info!(room = %self.code, seat = idx, "[ROOM] client seated");
        Ok(roster_of(&self.code, &st))
    }

    /// Vacate `client`'s seat if it holds one (§4.E Disconnect: a no-op if
    /// the deal continues running with a vacated seat — Open Question 3,
    /// kept as documented source behavior). Returns the updated roster, or
    /// `None` if the room now has no seated clients (caller should drop it
    /// from the registry).
    pub fn disconnect(&self, client: ClientId) -> Option<RoomRoster> {
        let mut st = self.state.lock();
        if let Some(idx) = seat_index_of(&st, client) {
            st.seats[idx] = None;
            info!(room = %self.code, seat = idx, "[ROOM] client left");
        }
        if st.seats.iter().all(Option::is_none) {
            None
        } else {
            Some(roster_of(&self.code, &st))
        }
    }

    /// Begin the first deal, or the next deal once the previous one
    /// finished (Open Question 5, resolved: dealer rotates on a fresh deal
    /// after `Finished`; see `domain::deal::next_deal`). Rejects unless
    /// `client` is seated, all four seats are filled, and no deal is
    /// currently in progress.
    pub fn start_game(&self, client: ClientId) -> Result<(), RoomError> {
        let mut st = self.state.lock();
        seat_index_of(&st, client).ok_or(RoomError::NotSeated)?;
        if st.seats.iter().any(Option::is_none) {
            return Err(RoomError::NotEnoughPlayers);
        }
        if let Some(existing) = &st.deal {
            if existing.phase != Phase::Finished {
                return Err(RoomError::AlreadyStarted);
            }
        }

        let deal = match st.deal.take() {
            Some(prev) => next_deal(&prev, &mut st.rng),
            None => start_deal(0, 1, [0, 0], &mut st.rng),
        };
        debug!(room = %self.code, dealer = deal.dealer, deal_number = deal.deal_number, "[ROOM] deal started");
        st.deal = Some(deal);
        Ok(())
    }

    pub fn submit_bid(&self, client: ClientId, action: BidAction) -> Result<(), RoomError> {
        let mut guard = self.state.lock();
        let seat = seat_index_of(&guard, client).ok_or(RoomError::NotSeated)?;
        // Destructure the guard once so `deal` and `rng` borrow disjoint
        // fields instead of re-deref'ing the guard twice.
        let RoomState { deal, rng, .. } = &mut *guard;
        let deal = deal.as_mut().ok_or(RoomError::NotStarted)?;
        domain_submit_bid(deal, seat as PlayerId, action, rng)?;
        debug!(room = %self.code, seat, "[ROOM] bid accepted");
        Ok(())
    }

    pub fn play_card(&self, client: ClientId, card: Card) -> Result<(), RoomError> {
        let mut st = self.state.lock();
        let seat = seat_index_of(&st, client).ok_or(RoomError::NotSeated)?;
        let deal = st.deal.as_mut().ok_or(RoomError::NotStarted)?;
        domain_play_card(deal, seat as PlayerId, card).map_err(RoomError::from)?;
        debug!(room = %self.code, seat, card = %card.to_token(), "[ROOM] card played");
        Ok(())
    }

    pub fn announce_belote(&self, client: ClientId) -> Result<(), RoomError> {
        let mut st = self.state.lock();
        let seat = seat_index_of(&st, client).ok_or(RoomError::NotSeated)?;
        let deal = st.deal.as_mut().ok_or(RoomError::NotStarted)?;
        belote::announce_belote(deal, seat as PlayerId).map_err(RoomError::from)?;
        debug!(room = %self.code, seat, "[ROOM] belote announced");
        Ok(())
    }

    /// The per-viewer `game_state` projection for every currently seated
    /// client (§9 Design Notes hand-visibility), or `None` if no deal has
    /// started yet. Called after every accepted `StartGame`/`Bid`/`Play`/
    /// `AnnounceBelote` command to drive the broadcast fan-out.
    pub fn deal_views(&self) -> Option<Vec<(ClientId, DealView)>> {
        let st = self.state.lock();
        let deal = st.deal.as_ref()?;
        Some(
            st.seats
                .iter()
                .enumerate()
                .filter_map(|(idx, seat)| {
                    seat.as_ref()
                        .map(|s| (s.client_id, DealView::for_player(deal, idx as PlayerId)))
                })
                .collect(),
        )
    }
}

fn seat_index_of(st: &RoomState, client: ClientId) -> Option<usize> {
    st.seats
        .iter()
        .position(|s| s.as_ref().map(|si| si.client_id) == Some(client))
}

fn seat_of_locked(st: &RoomState, client: ClientId) -> Option<PlayerId> {
    seat_index_of(st, client).map(|idx| idx as PlayerId)
}

fn roster_of(code: &str, st: &RoomState) -> RoomRoster {
    RoomRoster {
        room_code: code.to_string(),
        players: st
            .seats
            .iter()
            .enumerate()
            .filter_map(|(idx, seat)| {
                seat.as_ref().map(|s| RosterEntry {
                    id: s.client_id,
                    nickname: s.nickname.clone(),
                    seat: idx as PlayerId,
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid() -> ClientId {
        Uuid::new_v4()
    }

    #[test]
    fn join_assigns_lowest_empty_seat() {
        let room = Room::new("ABCDE".to_string());
        let c1 = uid();
        let c2 = uid();
        let roster = room.join(c1, "Alice".to_string()).unwrap();
        assert_eq!(roster.players.len(), 1);
        assert_eq!(roster.players[0].seat, 0);
        let roster = room.join(c2, "Bob".to_string()).unwrap();
        assert_eq!(roster.players.len(), 2);
        assert_eq!(room.seat_of(c2), Some(1));
    }

    #[test]
    fn join_is_idempotent_for_the_same_client() {
        let room = Room::new("ABCDE".to_string());
        let c1 = uid();
        room.join(c1, "Alice".to_string()).unwrap();
        room.join(c1, "Alice2".to_string()).unwrap();
        assert_eq!(room.seat_of(c1), Some(0));
        assert_eq!(room.roster().players.len(), 1);
    }

    #[test]
    fn fifth_join_is_rejected() {
        let room = Room::new("ABCDE".to_string());
        for _ in 0..4 {
            room.join(uid(), "P".to_string()).unwrap();
        }
        let result = room.join(uid(), "Extra".to_string());
        assert_eq!(result, Err(RoomError::RoomFull));
    }

    #[test]
    fn start_game_requires_four_seated() {
        let room = Room::new("ABCDE".to_string());
        let c1 = uid();
        room.join(c1, "Alice".to_string()).unwrap();
        assert_eq!(room.start_game(c1), Err(RoomError::NotEnoughPlayers));
    }

    #[test]
    fn scenario_6_disconnect_updates_roster() {
        let room = Room::new("X".to_string());
        let c1 = uid();
        let c2 = uid();
        room.join(c1, "A".to_string()).unwrap();
        room.join(c2, "B".to_string()).unwrap();
        let roster = room.disconnect(c1).expect("room still has c2");
        assert_eq!(roster.players.len(), 1);
        assert_eq!(roster.players[0].nickname, "B");
        assert_eq!(roster.players[0].seat, 1);
    }

    #[test]
    fn disconnecting_the_last_client_signals_room_is_empty() {
        let room = Room::new("X".to_string());
        let c1 = uid();
        room.join(c1, "A".to_string()).unwrap();
        assert!(room.disconnect(c1).is_none());
        assert!(room.is_empty());
    }

    #[test]
    fn start_game_then_play_commands_flow_through_to_domain() {
        let room = Room::new("X".to_string());
        let clients: Vec<ClientId> = (0..4).map(|_| uid()).collect();
        for c in &clients {
            room.join(*c, "P".to_string()).unwrap();
        }
        room.start_game(clients[0]).unwrap();
        let views = room.deal_views().unwrap();
        assert_eq!(views.len(), 4);

        let bidder_seat = {
            let view = views.iter().find(|(c, _)| *c == clients[0]).unwrap().1.clone();
            view.bidding_player.unwrap()
        };
        let bidder = clients[bidder_seat as usize];
        room.submit_bid(bidder, BidAction::Take).unwrap();
        let views = room.deal_views().unwrap();
        let any_view = &views[0].1;
        assert_eq!(any_view.phase, Phase::PlayingTricks);
    }

    #[test]
    fn commands_before_start_are_rejected_as_not_started() {
        let room = Room::new("X".to_string());
        let c1 = uid();
        room.join(c1, "A".to_string()).unwrap();
        assert_eq!(
            room.submit_bid(c1, BidAction::Pass),
            Err(RoomError::NotStarted)
        );
    }
}
