//! Bet resolution: pattern action + sequence -> bet side
//!
//! Pure and deterministic. Directional rules ("same side as", "opposite
//! of") are undefined when the deciding symbol is a tie; those resolve to
//! `UnresolvableAction` and the signal is skipped rather than guessed.
//! Rules phrased as "Player if X-colored, else Banker" are total: the tie
//! falls into the else arm.

use crate::catalog::{Pattern, PatternAction};
use crate::error::{BotError, Result};
use crate::types::{BetSide, Outcome};

fn side_of(outcome: Outcome) -> Option<BetSide> {
    match outcome {
        Outcome::BankerWon => Some(BetSide::Banker),
        Outcome::PlayerWon => Some(BetSide::Player),
        Outcome::Tie => None,
    }
}

pub fn resolve(pattern: &Pattern) -> Result<BetSide> {
    // Catalog validation guarantees a non-empty sequence; guard anyway so a
    // hand-built pattern cannot panic the loop.
    let (Some(&first), Some(&last)) = (pattern.sequence.first(), pattern.sequence.last()) else {
        return Err(BotError::UnresolvableAction {
            pattern_id: pattern.id,
            reason: "empty sequence".to_string(),
        });
    };

    let directional = |outcome: Outcome, which: &str| {
        side_of(outcome).ok_or_else(|| BotError::UnresolvableAction {
            pattern_id: pattern.id,
            reason: format!("{} symbol is a tie", which),
        })
    };

    match pattern.action {
        PatternAction::FollowTrend => directional(last, "last"),
        PatternAction::OpposeLast | PatternAction::AgainstLast => {
            directional(last, "last").map(|s| s.opposite())
        }
        PatternAction::StartingSide => directional(first, "first"),
        PatternAction::FollowBreakout | PatternAction::FollowNewColor => {
            Ok(if last == Outcome::PlayerWon {
                BetSide::Player
            } else {
                BetSide::Banker
            })
        }
        PatternAction::FollowAlternation => Ok(if last == Outcome::BankerWon {
            BetSide::Player
        } else {
            BetSide::Banker
        }),
        PatternAction::FollowBanker | PatternAction::IgnoreTieFollowBanker => Ok(BetSide::Banker),
        PatternAction::FollowPlayer | PatternAction::BackToPlayer => Ok(BetSide::Player),
        PatternAction::FollowPairs | PatternAction::FollowDouble => {
            let n = pattern.sequence.len();
            if n < 2 {
                return Err(BotError::UnresolvableAction {
                    pattern_id: pattern.id,
                    reason: "pairs rule needs at least two symbols".to_string(),
                });
            }
            Ok(if pattern.sequence[n - 2] == Outcome::BankerWon {
                BetSide::Banker
            } else {
                BetSide::Player
            })
        }
        PatternAction::FollowCycle => directional(first, "first"),
        PatternAction::NewStart => Ok(if first == Outcome::PlayerWon {
            BetSide::Player
        } else {
            BetSide::Banker
        }),
    }
}
