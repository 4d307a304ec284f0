//! The belote/rebelote announcement command (§4.D, §9 Design Notes):
//! a two-stage declaration worth 20 points, available to whichever player
//! was originally dealt both the trump king and queen. Verified against
//! `original_hands` rather than trusted at face value, per the
//! announcement-verification Design Note.

use crate::domain::cards::Rank;
use crate::domain::errors::DomainError;
use crate::domain::state::{team_of, DealState, Phase, PlayerId};

/// Record one half of a belote/rebelote declaration for `player`. The
/// first call of a deal establishes the holder and credits 20 points
/// (only actually paid out at `domain::scoring::finish_deal`, once both
/// halves have landed); the second call must come from the same holder.
pub fn announce_belote(state: &mut DealState, player: PlayerId) -> Result<(), DomainError> {
    if state.phase != Phase::PlayingTricks {
        return Err(DomainError::PhaseMismatch);
    }
    let trump = state.trump_suit.expect("trump set while playing tricks");

    let hand = &state.original_hands[player as usize];
    let has_king = hand.iter().any(|c| c.suit == trump && c.rank == Rank::King);
    let has_queen = hand.iter().any(|c| c.suit == trump && c.rank == Rank::Queen);
    if !(has_king && has_queen) {
        return Err(DomainError::BeloteNotHeld);
    }

    match state.belote.stage {
        0 => {
            state.belote.holder = Some(player);
            state.belote.team = Some(team_of(player));
            state.belote.points = 20;
            state.belote.stage = 1;
            Ok(())
        }
        1 => {
            if state.belote.holder != Some(player) {
                return Err(DomainError::NotBeloteHolder);
            }
            state.belote.stage = 2;
            Ok(())
        }
        _ => Err(DomainError::BeloteAlreadyAnnounced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bidding::{submit_bid, BidAction};
    use crate::domain::cards::{Card, Suit};
    use crate::domain::deal::start_deal;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn deal_in_play(seed: u64) -> DealState {
        let mut deal = start_deal(0, 1, [0, 0], &mut rng(seed));
        let taker = deal.bidding_player.unwrap();
        submit_bid(&mut deal, taker, BidAction::Take, &mut rng(seed + 1)).unwrap();
        deal
    }

    fn give_trump_king_and_queen(deal: &mut DealState, player: PlayerId) {
        let trump = deal.trump_suit.unwrap();
        deal.original_hands[player as usize].push(Card { suit: trump, rank: Rank::King });
        deal.original_hands[player as usize].push(Card { suit: trump, rank: Rank::Queen });
    }

    #[test]
    fn rejects_announcement_without_both_cards() {
        let mut deal = deal_in_play(1);
        let player = 0;
        deal.original_hands[player as usize].retain(|c| c.rank != Rank::King);
        assert_eq!(
            announce_belote(&mut deal, player),
            Err(DomainError::BeloteNotHeld)
        );
    }

    #[test]
    fn first_announcement_sets_holder_and_second_confirms() {
        let mut deal = deal_in_play(2);
        give_trump_king_and_queen(&mut deal, 1);
        announce_belote(&mut deal, 1).unwrap();
        assert_eq!(deal.belote.stage, 1);
        assert_eq!(deal.belote.holder, Some(1));
        assert_eq!(deal.belote.team, Some(team_of(1)));

        announce_belote(&mut deal, 1).unwrap();
        assert_eq!(deal.belote.stage, 2);
    }

    #[test]
    fn rebelote_from_a_different_player_is_rejected() {
        let mut deal = deal_in_play(3);
        give_trump_king_and_queen(&mut deal, 1);
        give_trump_king_and_queen(&mut deal, 2); // contrived, but irrelevant to the check
        announce_belote(&mut deal, 1).unwrap();
        assert_eq!(
            announce_belote(&mut deal, 2),
            Err(DomainError::NotBeloteHolder)
        );
    }

    #[test]
    fn third_announcement_after_rebelote_rejected() {
        let mut deal = deal_in_play(4);
        give_trump_king_and_queen(&mut deal, 0);
        announce_belote(&mut deal, 0).unwrap();
        announce_belote(&mut deal, 0).unwrap();
        assert_eq!(
            announce_belote(&mut deal, 0),
            Err(DomainError::BeloteAlreadyAnnounced)
        );
    }

    #[test]
    fn suit_not_trump() {
        // Sanity: king+queen of a non-trump suit never qualifies.
        let mut deal = deal_in_play(5);
        let off_suit = Suit::ALL.into_iter().find(|&s| Some(s) != deal.trump_suit).unwrap();
        deal.original_hands[3].push(Card { suit: off_suit, rank: Rank::King });
        deal.original_hands[3].push(Card { suit: off_suit, rank: Rank::Queen });
        // player 3's original hand might also already have trump K/Q from
        // the real deal; strip those to isolate the check.
        let trump = deal.trump_suit.unwrap();
        deal.original_hands[3].retain(|c| !(c.suit == trump && (c.rank == Rank::King || c.rank == Rank::Queen)));
        assert_eq!(
            announce_belote(&mut deal, 3),
            Err(DomainError::BeloteNotHeld)
        );
    }
}
