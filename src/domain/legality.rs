//! The legality oracle (§4.C): a pure predicate deciding whether a
//! proposed card play is legal given the current trick, trump suit, and
//! the acting player's hand. Never mutates its input; applying it twice
//! to the same state yields the same result (§8 invariant 5).

use crate::domain::cards::{hand_has_suit, Card};
use crate::domain::errors::RuleReason;
use crate::domain::ranking::rank_strength;
use crate::domain::state::{same_team, DealState, Phase, PlayerId};
use crate::domain::trick::{highest_trump, trick_winner};

/// Check whether `player` may play `card` right now. Returns `Ok(())` if
/// legal, `Err(reason)` naming the first cascade clause (§4.C) that the
/// proposed play violates.
pub fn check_play(deal: &DealState, player: PlayerId, card: Card) -> Result<(), RuleReason> {
    if deal.phase != Phase::PlayingTricks {
        return Err(RuleReason::WrongPhase);
    }

    let hand = &deal.hands[player as usize];
    if !hand.contains(&card) {
        return Err(RuleReason::NotInHand);
    }

    let trump = deal.trump_suit.expect("trump set once PlayingTricks");

    let trick = match &deal.trick {
        None => return Ok(()),
        Some(t) => t,
    };
    if trick.plays.is_empty() || trick.is_complete() {
        // Trick is empty, or complete and about to be reset: any card is legal.
        return Ok(());
    }

    let lead_suit = trick.lead_suit().expect("non-empty trick has a lead card");
    let winner_so_far = trick_winner(&trick.plays, trump).expect("non-empty trick has a winner");
    let winner_is_partner = same_team(winner_so_far, player);

    if card.suit == lead_suit {
        if lead_suit != trump {
            return Ok(());
        }
        // Trump was led: every play in the trick so far is trump.
        if winner_is_partner {
            return Ok(());
        }
        let (_, highest) = highest_trump(&trick.plays, trump).expect("trump led implies a trump in trick");
        let stronger_in_hand = hand
            .iter()
            .any(|c| c.suit == trump && rank_strength(c.rank, true) > rank_strength(highest.rank, true));
        if stronger_in_hand && rank_strength(card.rank, true) <= rank_strength(highest.rank, true) {
            return Err(RuleReason::MustOvertrump);
        }
        return Ok(());
    }

    // Card doesn't match the lead suit.
    if hand_has_suit(hand, lead_suit) {
        return Err(RuleReason::MustFollowSuit);
    }

    let has_trump = hand_has_suit(hand, trump);
    if !has_trump {
        return Ok(()); // free discard
    }

    match highest_trump(&trick.plays, trump) {
        None => {
            // No trump yet in trick; hand has trump (and no lead suit).
            if winner_is_partner {
                Ok(())
            } else if card.suit == trump {
                Ok(())
            } else {
                Err(RuleReason::MustTrump)
            }
        }
        Some((_, highest)) => {
            // Some trump already in trick.
            if winner_is_partner {
                return Ok(());
            }
            let strongest_strength = rank_strength(highest.rank, true);
            let stronger_in_hand = hand
                .iter()
                .any(|c| c.suit == trump && rank_strength(c.rank, true) > strongest_strength);
            if stronger_in_hand {
                if card.suit == trump && rank_strength(card.rank, true) > strongest_strength {
                    Ok(())
                } else {
                    Err(RuleReason::MustOvertrump)
                }
            } else if card.suit == trump {
                Ok(())
            } else {
                Err(RuleReason::MustUndertrump)
            }
        }
    }
}
