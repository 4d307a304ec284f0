//! Wire envelopes for the session/transport adapter (§4.F): the five
//! inbound command types and the three outbound types, as tagged enums so
//! an unrecognized `type` or a payload missing a required field fails to
//! parse rather than being silently accepted (§9 Design Notes).

use serde::{Deserialize, Serialize};

use crate::domain::bidding::BidAction;
use crate::domain::cards::{Card, Suit};
use crate::domain::snapshot::DealView;
use crate::room::RoomRoster;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    JoinRoom {
        #[serde(rename = "roomCode")]
        room_code: String,
        nickname: String,
    },
    StartGame,
    PlayCard {
        card: Card,
    },
    ChooseTrump {
        action: ChooseTrumpAction,
        #[serde(default)]
        suit: Option<Suit>,
    },
    AnnounceBelote,
}

/// The `action` field of `choose_trump` (§4.F): `"take"` accepts the
/// proposed trump (carrying `suit` only in the second round, where it
/// names the player's chosen suit instead of the turned card's), `"pass"`
/// declines.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChooseTrumpAction {
    Take,
    Pass,
}

/// Resolves a `choose_trump` envelope into a `BidAction`. Which round a
/// bare `take` (no `suit`) or a `take` with `suit` means is a matter for
/// `domain::bidding::submit_bid` — it rejects whichever doesn't fit the
/// current round, so no round-awareness is needed here.
pub fn to_bid_action(action: ChooseTrumpAction, suit: Option<Suit>) -> BidAction {
    match (action, suit) {
        (ChooseTrumpAction::Take, Some(suit)) => BidAction::TakeSuit(suit),
        (ChooseTrumpAction::Take, None) => BidAction::Take,
        (ChooseTrumpAction::Pass, _) => BidAction::Pass,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    RoomUpdate {
        #[serde(rename = "roomCode")]
        room_code: String,
        players: Vec<crate::room::RosterEntry>,
    },
    GameState {
        state: DealView,
    },
    Error {
        message: String,
    },
}

impl ServerMsg {
    pub fn room_update(roster: RoomRoster) -> Self {
        ServerMsg::RoomUpdate {
            room_code: roster.room_code,
            players: roster.players,
        }
    }

    pub fn game_state(view: DealView) -> Self {
        ServerMsg::GameState { state: view }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMsg::Error {
            message: message.into(),
        }
    }
}
