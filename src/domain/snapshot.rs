//! Per-viewer deal projection (§9 Design Notes: broadcasts must carry
//! per-viewer hand visibility, not a shared snapshot with every hand
//! attached). `DealView` is what a room sends a given seat: that seat's
//! own cards in full, everyone else's hands as a count only.

use serde::Serialize;

use crate::domain::cards::{Card, Suit};
use crate::domain::state::{DealState, Phase, PlayerId};

#[derive(Debug, Clone, Serialize)]
pub struct DealView {
    pub phase: Phase,
    pub dealer: PlayerId,
    pub current_player: PlayerId,
    pub viewer: PlayerId,
    /// The viewer's own hand, face up.
    pub your_hand: Vec<Card>,
    /// Card counts for all four seats, viewer included (so the UI can
    /// render everyone's hand backs uniformly).
    pub hand_counts: [usize; 4],
    pub turned_card: Option<Card>,
    pub proposed_trump: Option<Suit>,
    pub trump_suit: Option<Suit>,
    pub trump_chooser: Option<PlayerId>,
    pub bidding_player: Option<PlayerId>,
    /// Plays made so far in the trick currently in progress, if any.
    pub current_trick: Vec<(PlayerId, Card)>,
    pub deal_scores: [u16; 2],
    pub match_scores: [u32; 2],
    pub belote_holder: Option<PlayerId>,
    /// 0 = silent, 1 = belote announced, 2 = rebelote announced.
    pub belote_stage: u8,
}

impl DealView {
    pub fn for_player(state: &DealState, viewer: PlayerId) -> Self {
        let mut hand_counts = [0usize; 4];
        for (p, count) in hand_counts.iter_mut().enumerate() {
            *count = state.hands[p].len();
        }

        DealView {
            phase: state.phase,
            dealer: state.dealer,
            current_player: state.current_player,
            viewer,
            your_hand: state.hands[viewer as usize].clone(),
            hand_counts,
            turned_card: state.turned_card,
            proposed_trump: state.proposed_trump,
            trump_suit: state.trump_suit,
            trump_chooser: state.trump_chooser,
            bidding_player: state.bidding_player,
            current_trick: state
                .trick
                .as_ref()
                .map(|t| t.plays.clone())
                .unwrap_or_default(),
            deal_scores: state.deal_scores,
            match_scores: state.match_scores,
            belote_holder: state.belote.holder,
            belote_stage: state.belote.stage,
        }
    }
}
