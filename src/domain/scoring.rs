//! End-of-deal scoring (§4.D "Match scoring"): folding the last trick's
//! bonus and any credited belote into the deal total, then merging the
//! deal into the running match score.

use crate::domain::ranking::LAST_TRICK_BONUS;
use crate::domain::state::{team_of, DealState, Phase, PlayerId, Team};

/// Finalize a deal once its eighth trick completes: credit the last-trick
/// bonus to `last_trick_winner`'s team, fold in any announced belote bonus,
/// merge the deal score into the match score, and move to `Finished`.
pub fn finish_deal(state: &mut DealState, last_trick_winner: PlayerId) {
    state.deal_scores[team_of(last_trick_winner) as usize] += LAST_TRICK_BONUS;

    if state.belote.stage == 2 {
        if let Some(team) = state.belote.team {
            state.deal_scores[team as usize] += state.belote.points;
        }
    }

    state.match_scores[0] += state.deal_scores[0] as u32;
    state.match_scores[1] += state.deal_scores[1] as u32;
    state.phase = Phase::Finished;
}

/// Target match score (§9, Open Question 2). Belote is traditionally played
/// to 1001 points, but match termination is out of scope here (a room
/// keeps dealing past it if asked); this is exposed as a pure helper so a
/// caller that does want to stop the match can check it after every
/// finished deal.
pub const MATCH_TARGET: u32 = 1001;

/// `Some(team)` if exactly one team has reached `MATCH_TARGET` and is
/// strictly ahead; `None` otherwise (nobody there yet, or a tie at/above
/// target with no sole leader). Never mutates, never panics.
pub fn match_leader(match_scores: [u32; 2]) -> Option<Team> {
    if match_scores[0] < MATCH_TARGET && match_scores[1] < MATCH_TARGET {
        return None;
    }
    match match_scores[0].cmp(&match_scores[1]) {
        std::cmp::Ordering::Greater => Some(0),
        std::cmp::Ordering::Less => Some(1),
        std::cmp::Ordering::Equal => None,
    }
}
