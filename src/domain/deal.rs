//! Deal lifecycle: building a fresh deal, and completing the "second deal"
//! once a trump is taken (§4.D).

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::domain::cards::{full_deck, Card};
use crate::domain::state::{BeloteState, DealState, Phase, PlayerId};

/// Number of cards dealt to each player before bidding starts.
const INITIAL_HAND_SIZE: usize = 5;
/// Number of cards each player holds once the second deal completes.
const FINAL_HAND_SIZE: usize = 8;

/// Build a fresh deal for `dealer`, carrying `match_scores` forward.
/// `deal_number` is the 1-indexed counter the caller maintains across the
/// match (see `domain::deal::next_dealer` for how it and the dealer seat
/// should advance between deals).
pub fn start_deal<R: RngCore>(
    dealer: PlayerId,
    deal_number: u32,
    match_scores: [u32; 2],
    rng: &mut R,
) -> DealState {
    let mut deck = full_deck();
    deck.shuffle(rng); // Fisher-Yates, per §4.A

    let mut hands: [Vec<Card>; 4] = Default::default();
    let order = seating_order(dealer);
    for &player in &order {
        let dealt: Vec<Card> = deck.drain(0..INITIAL_HAND_SIZE).collect();
        hands[player as usize] = dealt;
    }

    let turned_card = deck.remove(0);
    let proposed_trump = turned_card.suit;

    let bidding_player = next_player(dealer);

    DealState {
        phase: Phase::ChoosingTrumpFirstRound,
        dealer,
        current_player: bidding_player,
        deck,
        original_hands: hands.clone(),
        hands,
        turned_card: Some(turned_card),
        proposed_trump: Some(proposed_trump),
        trump_suit: None,
        trump_chooser: None,
        bidding_player: Some(bidding_player),
        passes_in_current_round: 0,
        trick: None,
        played: Vec::new(),
        deal_scores: [0, 0],
        match_scores,
        deal_number,
        belote: BeloteState::default(),
    }
}

/// Restart the whole deal after four second-round passes: same dealer,
/// same deal number, fresh shuffle, match scores preserved (§4.D).
pub fn restart_deal<R: RngCore>(prev: &DealState, rng: &mut R) -> DealState {
    start_deal(prev.dealer, prev.deal_number, prev.match_scores, rng)
}

/// Start the next deal after the previous one finished: dealer rotates to
/// `(previous dealer + 1) % 4` (Open Question 5, resolved — see DESIGN.md),
/// deal number increments, match scores carry forward.
pub fn next_deal<R: RngCore>(prev: &DealState, rng: &mut R) -> DealState {
    let dealer = next_player(prev.dealer);
    start_deal(dealer, prev.deal_number + 1, prev.match_scores, rng)
}

/// Complete the "second deal" once `taker` has taken the proposed or
/// chosen trump: give the turned card to `taker`, then top every hand up
/// to 8 cards in dealer-relative order (§4.D; Open Question 4: this nets
/// to a 3/3/3/2 split by player rather than the traditional 3-then-2
/// split, matching the source's simplification). The deck empties exactly
/// (§8 invariant 6).
///
/// The taker leads the first trick (Open Question 1, resolved).
pub fn complete_second_deal(state: &mut DealState, taker: PlayerId) {
    if let Some(turned) = state.turned_card.take() {
        state.hands[taker as usize].push(turned);
        state.original_hands[taker as usize].push(turned);
    }
    state.proposed_trump = None;

    let order = seating_order(state.dealer);
    while !state.deck.is_empty() {
        for &player in &order {
            if state.deck.is_empty() {
                break;
            }
            if state.hands[player as usize].len() >= FINAL_HAND_SIZE {
                continue;
            }
            let card = state.deck.remove(0);
            state.hands[player as usize].push(card);
            state.original_hands[player as usize].push(card);
        }
    }

    state.bidding_player = None;
    state.passes_in_current_round = 0;
    state.current_player = taker;
    state.trick = Some(crate::domain::state::Trick::new(taker));
    state.phase = Phase::PlayingTricks;
}

/// Seating order starting just after `dealer`: `[dealer+1, dealer+2,
/// dealer+3, dealer]`, the order bidding and dealing proceed in.
fn seating_order(dealer: PlayerId) -> [PlayerId; 4] {
    [
        next_player(dealer),
        next_player(next_player(dealer)),
        next_player(next_player(next_player(dealer))),
        dealer,
    ]
}

fn next_player(p: PlayerId) -> PlayerId {
    crate::domain::state::next_player(p)
}
