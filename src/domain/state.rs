//! The deal/bidding state machine's datum (§3 `DealState`) and the small
//! supporting types (`Phase`, `Trick`, `BeloteState`) it's built from.
//!
//! This module only defines the shape; transitions live in `domain::deal`,
//! `domain::bidding`, `domain::play`, `domain::scoring` and `domain::belote`.

use serde::Serialize;

use crate::domain::cards::{Card, Suit};

pub type PlayerId = u8; // 0..=3
pub type Team = u8; // 0 or 1

/// team0 = {0, 2}, team1 = {1, 3}.
pub fn team_of(player: PlayerId) -> Team {
    player % 2
}

pub fn partner_of(player: PlayerId) -> PlayerId {
    (player + 2) % 4
}

pub fn next_player(player: PlayerId) -> PlayerId {
    (player + 1) % 4
}

pub fn same_team(a: PlayerId, b: PlayerId) -> bool {
    team_of(a) == team_of(b)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ChoosingTrumpFirstRound,
    ChoosingTrumpSecondRound,
    PlayingTricks,
    Finished,
}

impl Phase {
    pub fn is_bidding(self) -> bool {
        matches!(
            self,
            Phase::ChoosingTrumpFirstRound | Phase::ChoosingTrumpSecondRound
        )
    }
}

/// An in-progress or just-completed trick: an ordered sequence of up to
/// four (player, card) plays with a designated leader. Once 4 plays are in,
/// `winner` is set; the object is replaced (never reused) on the next play.
#[derive(Debug, Clone)]
pub struct Trick {
    pub leader: PlayerId,
    pub plays: Vec<(PlayerId, Card)>,
    pub winner: Option<PlayerId>,
}

impl Trick {
    pub fn new(leader: PlayerId) -> Self {
        Trick {
            leader,
            plays: Vec::with_capacity(4),
            winner: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|(_, c)| c.suit)
    }
}

/// Tracks the belote/rebelote declaration (§4.D): a 20-point bonus for
/// holding both trump king and queen, credited at end-of-deal once both
/// halves have been announced.
#[derive(Debug, Clone, Default)]
pub struct BeloteState {
    pub holder: Option<PlayerId>,
    /// 0 = not announced, 1 = first half announced, 2 = rebelote announced.
    pub stage: u8,
    pub points: u16,
    pub team: Option<Team>,
}

/// The full per-deal datum (§3).
#[derive(Debug, Clone)]
pub struct DealState {
    pub phase: Phase,
    pub dealer: PlayerId,
    pub current_player: PlayerId,
    pub deck: Vec<Card>,
    pub hands: [Vec<Card>; 4],
    /// Every card dealt to each player this deal (first 5 + second batch),
    /// never shrunk by play. Used only to verify belote announcements
    /// against what the announcer actually held (§9 Design Notes).
    pub original_hands: [Vec<Card>; 4],
    pub turned_card: Option<Card>,
    pub proposed_trump: Option<Suit>,
    pub trump_suit: Option<Suit>,
    pub trump_chooser: Option<PlayerId>,
    pub bidding_player: Option<PlayerId>,
    pub passes_in_current_round: u8,
    pub trick: Option<Trick>,
    /// Every (player, card) play from tricks already completed this deal
    /// (the current, possibly-partial trick is NOT included here). Kept
    /// only so the §8 universe/per-player invariants can be checked; the
    /// engine itself never looks a completed trick's cards up again.
    pub played: Vec<(PlayerId, Card)>,
    /// (team0, team1) points accumulated during this deal.
    pub deal_scores: [u16; 2],
    /// (team0, team1) cumulative across deals.
    pub match_scores: [u32; 2],
    pub deal_number: u32,
    pub belote: BeloteState,
}

impl DealState {
    /// Invariant 1 (§3/§8): every hand + deck + turned card + current
    /// trick + already-completed-trick cards equals the 32-card universe
    /// with no duplicates. Checked by tests after every transition, not on
    /// the hot path.
    #[cfg(test)]
    pub fn assert_universe_consistent(&self) {
        let mut all: Vec<Card> = Vec::with_capacity(32);
        for hand in &self.hands {
            all.extend(hand.iter().copied());
        }
        all.extend(self.deck.iter().copied());
        if let Some(c) = self.turned_card {
            all.push(c);
        }
        if let Some(trick) = &self.trick {
            all.extend(trick.plays.iter().map(|&(_, c)| c));
        }
        all.extend(self.played.iter().map(|&(_, c)| c));
        assert_eq!(
            all.len(),
            32,
            "expected 32 live cards, found {} (phase={:?})",
            all.len(),
            self.phase
        );
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert!(
                    !(all[i].suit == all[j].suit && all[i].rank == all[j].rank),
                    "duplicate card {:?} found",
                    all[i]
                );
            }
        }
    }

    /// Invariant 2 (§8): for every player, hand size plus cards played this
    /// deal (completed tricks + current partial trick) equals 8, once
    /// `PlayingTricks` has begun.
    #[cfg(test)]
    pub fn assert_hand_budget_consistent(&self) {
        for p in 0u8..4 {
            let played_in_history = self.played.iter().filter(|&&(pl, _)| pl == p).count();
            let played_in_trick = self
                .trick
                .as_ref()
                .map(|t| t.plays.iter().filter(|&&(pl, _)| pl == p).count())
                .unwrap_or(0);
            let total = self.hands[p as usize].len() + played_in_history + played_in_trick;
            assert_eq!(total, 8, "player {p} hand budget mismatch");
        }
    }
}
