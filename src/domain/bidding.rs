//! The two-round bidding state machine (§4.D "Bidding command"): each
//! player in turn takes the proposed trump, proposes a different one (round
//! two only), or passes. Four passes in round one opens round two; four
//! passes in round two restarts the deal with a fresh shuffle.

use rand::RngCore;

use crate::domain::deal::{complete_second_deal, restart_deal};
use crate::domain::errors::DomainError;
use crate::domain::state::{next_player, DealState, Phase, PlayerId};
use crate::domain::cards::Suit;

/// What a player does on their bidding turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BidAction {
    /// Round one only: take the turned card's suit as trump.
    Take,
    /// Round two only: propose `Suit` as trump (must differ from the suit
    /// barred by round one).
    TakeSuit(Suit),
    Pass,
}

/// Apply one bidding action. On rejection, `state` is left untouched (§4.D
/// failure semantics). `rng` is only consulted when four round-two passes
/// force a reshuffle.
pub fn submit_bid<R: RngCore>(
    state: &mut DealState,
    player: PlayerId,
    action: BidAction,
    rng: &mut R,
) -> Result<(), DomainError> {
    if !state.phase.is_bidding() {
        return Err(DomainError::PhaseMismatch);
    }
    if state.bidding_player != Some(player) {
        return Err(DomainError::OutOfTurn);
    }

    match state.phase {
        Phase::ChoosingTrumpFirstRound => match action {
            // A suit named alongside `take` in round one is ignored — the
            // turned card's suit is the only legal trump at this point.
            BidAction::Take | BidAction::TakeSuit(_) => {
                let suit = state.proposed_trump.ok_or(DomainError::InvalidBidAction)?;
                state.trump_suit = Some(suit);
                state.trump_chooser = Some(player);
                complete_second_deal(state, player);
                Ok(())
            }
            BidAction::Pass => {
                advance_or_open_round_two(state);
                Ok(())
            }
        },
        Phase::ChoosingTrumpSecondRound => match action {
            BidAction::Take => Err(DomainError::InvalidBidAction),
            BidAction::TakeSuit(suit) => {
                if state.proposed_trump == Some(suit) {
                    return Err(DomainError::InvalidBidAction);
                }
                state.trump_suit = Some(suit);
                state.trump_chooser = Some(player);
                complete_second_deal(state, player);
                Ok(())
            }
            BidAction::Pass => {
                state.passes_in_current_round += 1;
                if state.passes_in_current_round == 4 {
                    *state = restart_deal(state, rng);
                } else {
                    let next = next_player(player);
                    state.bidding_player = Some(next);
                    state.current_player = next;
                }
                Ok(())
            }
        },
        Phase::PlayingTricks | Phase::Finished => unreachable!("guarded by is_bidding above"),
    }
}

fn advance_or_open_round_two(state: &mut DealState) {
    state.passes_in_current_round += 1;
    if state.passes_in_current_round == 4 {
        state.phase = Phase::ChoosingTrumpSecondRound;
        state.passes_in_current_round = 0;
        let next = next_player(state.dealer);
        state.bidding_player = Some(next);
        state.current_player = next;
    } else {
        let next = next_player(state.bidding_player.expect("bidding in progress"));
        state.bidding_player = Some(next);
        state.current_player = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::deal::start_deal;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn out_of_turn_bid_rejected() {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(1));
        let not_turn = next_player(deal.bidding_player.unwrap());
        let before = deal.clone();
        let result = submit_bid(&mut deal, not_turn, BidAction::Pass, &mut rng(2));
        assert_eq!(result, Err(DomainError::OutOfTurn));
        assert_eq!(deal.bidding_player, before.bidding_player);
    }

    #[test]
    fn first_round_take_starts_play() {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(1));
        let player = deal.bidding_player.unwrap();
        let proposed = deal.proposed_trump.unwrap();
        submit_bid(&mut deal, player, BidAction::Take, &mut rng(2)).unwrap();
        assert_eq!(deal.phase, Phase::PlayingTricks);
        assert_eq!(deal.trump_suit, Some(proposed));
        assert_eq!(deal.trump_chooser, Some(player));
        assert_eq!(deal.current_player, player);
    }

    #[test]
    fn first_round_take_suit_ignores_the_suit() {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(1));
        let player = deal.bidding_player.unwrap();
        let proposed = deal.proposed_trump.unwrap();
        let other = crate::domain::cards::Suit::ALL
            .into_iter()
            .find(|&s| s != proposed)
            .unwrap();
        submit_bid(&mut deal, player, BidAction::TakeSuit(other), &mut rng(2)).unwrap();
        assert_eq!(deal.phase, Phase::PlayingTricks);
        assert_eq!(deal.trump_suit, Some(proposed));
    }

    #[test]
    fn four_passes_opens_second_round() {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(1));
        for _ in 0..4 {
            let player = deal.bidding_player.unwrap();
            submit_bid(&mut deal, player, BidAction::Pass, &mut rng(9)).unwrap();
        }
        assert_eq!(deal.phase, Phase::ChoosingTrumpSecondRound);
        assert_eq!(deal.passes_in_current_round, 0);
        assert_eq!(deal.bidding_player, Some(next_player(deal.dealer)));
    }

    #[test]
    fn second_round_cannot_take_barred_suit() {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(1));
        for _ in 0..4 {
            let player = deal.bidding_player.unwrap();
            submit_bid(&mut deal, player, BidAction::Pass, &mut rng(9)).unwrap();
        }
        let barred = deal.proposed_trump.unwrap();
        let player = deal.bidding_player.unwrap();
        let result = submit_bid(&mut deal, player, BidAction::TakeSuit(barred), &mut rng(9));
        assert_eq!(result, Err(DomainError::InvalidBidAction));
    }

    #[test]
    fn second_round_take_different_suit_starts_play() {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(1));
        for _ in 0..4 {
            let player = deal.bidding_player.unwrap();
            submit_bid(&mut deal, player, BidAction::Pass, &mut rng(9)).unwrap();
        }
        let barred = deal.proposed_trump.unwrap();
        let chosen = crate::domain::cards::Suit::ALL
            .into_iter()
            .find(|&s| s != barred)
            .unwrap();
        let player = deal.bidding_player.unwrap();
        submit_bid(&mut deal, player, BidAction::TakeSuit(chosen), &mut rng(9)).unwrap();
        assert_eq!(deal.phase, Phase::PlayingTricks);
        assert_eq!(deal.trump_suit, Some(chosen));
        assert_eq!(deal.current_player, player);
    }

    #[test]
    fn eight_passes_restarts_deal_with_same_dealer_and_number() {
        let mut deal = start_deal(2, 7, [40, 30], &mut rng(1));
        for _ in 0..8 {
            let player = deal.bidding_player.unwrap();
            submit_bid(&mut deal, player, BidAction::Pass, &mut rng(123)).unwrap();
        }
        assert_eq!(deal.phase, Phase::ChoosingTrumpFirstRound);
        assert_eq!(deal.dealer, 2);
        assert_eq!(deal.deal_number, 7);
        assert_eq!(deal.match_scores, [40, 30]);
    }
}
