//! Rank orderings and point tables for trump and non-trump cards.
//!
//! Belote uses two distinct rank orderings depending on whether a card's
//! suit is the trump suit, and two distinct point tables to match.

use crate::domain::cards::Rank;

/// Strength of `rank` within its own ordering (trump or non-trump). Higher
/// wins. Only comparable between two ranks of the *same* trump-ness; never
/// compare a trump strength against a non-trump strength directly.
pub fn rank_strength(rank: Rank, is_trump: bool) -> u8 {
    if is_trump {
        match rank {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Queen => 2,
            Rank::King => 3,
            Rank::Ten => 4,
            Rank::Ace => 5,
            Rank::Nine => 6,
            Rank::Jack => 7,
        }
    } else {
        match rank {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Nine => 2,
            Rank::Jack => 3,
            Rank::Queen => 4,
            Rank::King => 5,
            Rank::Ten => 6,
            Rank::Ace => 7,
        }
    }
}

/// Point value of a single card, given whether it's in the trump suit.
pub fn card_points(rank: Rank, is_trump: bool) -> u8 {
    if is_trump {
        match rank {
            Rank::Seven | Rank::Eight => 0,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
            Rank::Nine => 14,
            Rank::Jack => 20,
        }
    } else {
        match rank {
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }
}

/// Last-trick bonus credited to the winner of the eighth trick of a deal.
pub const LAST_TRICK_BONUS: u16 = 10;

/// Total card points in a 32-card deck (excludes the last-trick bonus and
/// any belote declaration). Used to assert the scoring invariant in §8.
pub const DECK_POINTS: u16 = 152;
