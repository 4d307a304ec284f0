//! Domain-level error types: pure rule/state-machine failures, with no
//! knowledge of rooms, transport, or clients. `crate::error::GameError`
//! wraps these (and `room::RoomError`) into the full §7 error taxonomy.

use std::fmt;

/// Why a proposed card play is illegal (§4.C). The first matching clause
/// of the legality cascade determines which variant is returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RuleReason {
    /// The command was issued outside `PlayingTricks`.
    WrongPhase,
    /// The card is not currently in the acting player's hand.
    NotInHand,
    /// Lead suit is in hand and the card doesn't follow it.
    MustFollowSuit,
    /// Hand has trump, no trump played yet, opponent leads a non-trump.
    MustTrump,
    /// Hand has a trump stronger than the best trump in trick; it wasn't played.
    MustOvertrump,
    /// Hand has trump but none stronger than the best trump in trick; some
    /// non-strictly-stronger trump must still be played.
    MustUndertrump,
}

impl fmt::Display for RuleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleReason::WrongPhase => "not in the trick-playing phase",
            RuleReason::NotInHand => "card not in hand",
            RuleReason::MustFollowSuit => "must follow suit",
            RuleReason::MustTrump => "must play trump",
            RuleReason::MustOvertrump => "must overtrump",
            RuleReason::MustUndertrump => "must still play trump",
        };
        f.write_str(s)
    }
}

/// Errors raised by the deal/bidding state machine (component D). Every
/// rejected command leaves `DealState` untouched (§4.D failure semantics).
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Command issued in a phase that doesn't support it (§7 `PhaseError`).
    PhaseMismatch,
    /// `currentPlayer`/`biddingPlayer` doesn't match the acting player (§7 `TurnError`).
    OutOfTurn,
    /// Second-round take without a suit, or with the already-proposed suit (§7 `BiddingError`).
    InvalidBidAction,
    /// Legality oracle rejected the play (§7 `RuleError`).
    IllegalPlay(RuleReason),
    /// A belote/rebelote announcement that the announcer's dealt hand doesn't support.
    BeloteNotHeld,
    /// Rebelote announced by someone other than whoever announced belote first.
    NotBeloteHolder,
    /// Both halves of belote/rebelote were already announced this deal.
    BeloteAlreadyAnnounced,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::PhaseMismatch => write!(f, "wrong phase for this command"),
            DomainError::OutOfTurn => write!(f, "not your turn"),
            DomainError::InvalidBidAction => write!(f, "invalid bidding action"),
            DomainError::IllegalPlay(reason) => write!(f, "illegal play: {reason}"),
            DomainError::BeloteNotHeld => {
                write!(f, "you were not dealt both trump king and queen")
            }
            DomainError::NotBeloteHolder => {
                write!(f, "only the player who announced belote can announce rebelote")
            }
            DomainError::BeloteAlreadyAnnounced => write!(f, "belote already fully announced"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<RuleReason> for DomainError {
    fn from(reason: RuleReason) -> Self {
        DomainError::IllegalPlay(reason)
    }
}
