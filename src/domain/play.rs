//! The "play a card" command (§4.D "Play command"): validates phase, turn,
//! and legality, mutates the hand and trick, resolves a completed trick,
//! and hands off to `domain::scoring` once the eighth trick closes a deal.

use crate::domain::cards::Card;
use crate::domain::errors::DomainError;
use crate::domain::legality::check_play;
use crate::domain::scoring::finish_deal;
use crate::domain::state::{next_player, team_of, DealState, Phase, PlayerId, Trick};
use crate::domain::trick::{trick_points, trick_winner};

/// Play `card` on behalf of `player`. On rejection `state` is left
/// untouched (§4.D failure semantics): the legality check runs before any
/// mutation.
pub fn play_card(state: &mut DealState, player: PlayerId, card: Card) -> Result<(), DomainError> {
    if state.phase != Phase::PlayingTricks {
        return Err(DomainError::PhaseMismatch);
    }
    if state.current_player != player {
        return Err(DomainError::OutOfTurn);
    }
    check_play(state, player, card)?;

    let hand = &mut state.hands[player as usize];
    let pos = hand
        .iter()
        .position(|&c| c == card)
        .expect("check_play already confirmed the card is in hand");
    hand.remove(pos);

    let trump = state.trump_suit.expect("trump set while playing tricks");
    {
        let trick = state
            .trick
            .as_mut()
            .expect("trick exists while playing tricks");
        trick.plays.push((player, card));
    }

    let trick_complete = state.trick.as_ref().unwrap().is_complete();
    if !trick_complete {
        state.current_player = next_player(player);
        return Ok(());
    }

    let trick = state.trick.as_mut().unwrap();
    let winner = trick_winner(&trick.plays, trump).expect("complete trick has a winner");
    let points = trick_points(&trick.plays, trump);
    trick.winner = Some(winner);
    state.deal_scores[team_of(winner) as usize] += points;

    let finished = state.trick.take().unwrap();
    state.played.extend(finished.plays);

    if state.hands.iter().all(|h| h.is_empty()) {
        finish_deal(state, winner);
    } else {
        state.current_player = winner;
        state.trick = Some(Trick::new(winner));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bidding::{submit_bid, BidAction};
    use crate::domain::deal::start_deal;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// Deal where `taker` has taken the proposed trump in round one, ready
    /// for trick play.
    fn played_deal(seed: u64) -> DealState {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(seed));
        let taker = deal.bidding_player.unwrap();
        submit_bid(&mut deal, taker, BidAction::Take, &mut rng(seed + 1)).unwrap();
        deal
    }

    #[test]
    fn out_of_turn_play_rejected_and_state_untouched() {
        let mut deal = played_deal(1);
        let not_turn = next_player(deal.current_player);
        let card = deal.hands[not_turn as usize][0];
        let before = deal.clone();
        let result = play_card(&mut deal, not_turn, card);
        assert_eq!(result, Err(DomainError::OutOfTurn));
        assert_eq!(deal.hands, before.hands);
    }

    #[test]
    fn playing_a_card_not_in_hand_is_rejected_and_state_untouched() {
        let mut deal = played_deal(1);
        let leader = deal.current_player;
        let not_in_hand = crate::domain::cards::full_deck()
            .into_iter()
            .find(|c| !deal.hands[leader as usize].contains(c))
            .unwrap();
        let before = deal.clone();
        let result = play_card(&mut deal, leader, not_in_hand);
        assert_eq!(result, Err(DomainError::IllegalPlay(crate::domain::errors::RuleReason::NotInHand)));
        assert_eq!(deal.hands, before.hands);
    }

    #[test]
    fn playing_a_full_trick_advances_leader_and_credits_points() {
        let mut deal = played_deal(5);
        for _ in 0..4 {
            let player = deal.current_player;
            let candidate = deal.hands[player as usize]
                .iter()
                .copied()
                .find(|&c| check_play(&deal, player, c).is_ok())
                .expect("at least one legal card exists");
            play_card(&mut deal, player, candidate).unwrap();
        }
        // A fresh trick is open, led by whoever won the first one.
        let trick = deal.trick.as_ref().unwrap();
        assert!(trick.plays.is_empty());
        assert_eq!(trick.leader, deal.current_player);
        assert_eq!(deal.played.len(), 4);
        let total_points: u16 = deal.deal_scores.iter().sum();
        assert!(total_points <= crate::domain::ranking::DECK_POINTS);
    }

    #[test]
    fn playing_out_the_whole_deal_finishes_it() {
        let mut deal = played_deal(11);
        while deal.phase == Phase::PlayingTricks {
            let player = deal.current_player;
            let candidate = deal.hands[player as usize]
                .iter()
                .copied()
                .find(|&c| check_play(&deal, player, c).is_ok())
                .expect("at least one legal card exists");
            play_card(&mut deal, player, candidate).unwrap();
        }
        assert_eq!(deal.phase, Phase::Finished);
        assert!(deal.hands.iter().all(|h| h.is_empty()));
        assert!(deal.trick.is_none());
        let deal_total: u16 = deal.deal_scores.iter().sum();
        assert_eq!(deal_total, crate::domain::ranking::DECK_POINTS + crate::domain::ranking::LAST_TRICK_BONUS);
        deal.assert_hand_budget_consistent();
    }
}
