//! The trick evaluator: given an ordered sequence of (player, card) plays
//! and the trump suit, determine the winner and the trick's point value.
//!
//! Pure; never touches a `DealState`. Used both by `domain::play` (to
//! resolve a completed trick) and by `domain::legality` (to recompute the
//! "current winner so far" of a partial trick for the legality cascade).

use crate::domain::cards::{Card, Suit};
use crate::domain::ranking::{card_points, rank_strength};
use crate::domain::state::PlayerId;

/// One play: the seat that played it, and the card.
pub type Play = (PlayerId, Card);

/// Determine the winner of a (possibly partial) sequence of plays under
/// `trump`. The first play's suit is the lead suit. Returns `None` only if
/// `plays` is empty.
///
/// Rules (§4.B):
/// 1. A trump beats any non-trump.
/// 2. Among two trumps, the higher trump-ordered card wins.
/// 3. Among non-trumps, only cards matching the lead suit can win; highest
///    non-trump rank among those wins.
/// 4. A non-trump card off the lead suit never wins, regardless of rank.
pub fn trick_winner(plays: &[Play], trump: Suit) -> Option<PlayerId> {
    let (leader, lead_card) = *plays.first()?;
    let lead_suit = lead_card.suit;

    let mut best_player = leader;
    let mut best_card = lead_card;
    for &(player, card) in &plays[1..] {
        if beats(card, best_card, lead_suit, trump) {
            best_player = player;
            best_card = card;
        }
    }
    Some(best_player)
}

/// True if `challenger` beats `incumbent`, given the lead suit and trump.
fn beats(challenger: Card, incumbent: Card, lead_suit: Suit, trump: Suit) -> bool {
    let challenger_trump = challenger.suit == trump;
    let incumbent_trump = incumbent.suit == trump;

    if challenger_trump != incumbent_trump {
        return challenger_trump;
    }
    if challenger_trump && incumbent_trump {
        return rank_strength(challenger.rank, true) > rank_strength(incumbent.rank, true);
    }

    // Neither is trump: only lead-suit cards are in contention.
    let challenger_follows = challenger.suit == lead_suit;
    let incumbent_follows = incumbent.suit == lead_suit;
    if challenger_follows != incumbent_follows {
        return challenger_follows;
    }
    if challenger_follows && incumbent_follows {
        return rank_strength(challenger.rank, false) > rank_strength(incumbent.rank, false);
    }
    false
}

/// Sum of card point values in a complete or partial trick.
pub fn trick_points(plays: &[Play], trump: Suit) -> u16 {
    plays
        .iter()
        .map(|&(_, card)| card_points(card.rank, card.suit == trump) as u16)
        .sum()
}

/// The highest trump played so far in a (possibly partial) trick, if any.
pub fn highest_trump(plays: &[Play], trump: Suit) -> Option<Play> {
    plays
        .iter()
        .copied()
        .filter(|&(_, card)| card.suit == trump)
        .max_by_key(|&(_, card)| rank_strength(card.rank, true))
}
