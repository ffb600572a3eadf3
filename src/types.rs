//! Core domain types: round outcomes, bet sides, game events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-way result of one Bac Bo round.
///
/// Serde names match the upstream API strings (`BankerWon`, `PlayerWon`, `Tie`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    BankerWon,
    PlayerWon,
    Tie,
}

impl Outcome {
    /// Emoji alphabet used by the pattern catalog file and chat messages.
    pub fn emoji(&self) -> &'static str {
        match self {
            Outcome::BankerWon => "🔴",
            Outcome::PlayerWon => "🔵",
            Outcome::Tie => "🟡",
        }
    }

    pub fn from_emoji(s: &str) -> Option<Self> {
        match s {
            "🔴" => Some(Outcome::BankerWon),
            "🔵" => Some(Outcome::PlayerWon),
            "🟡" => Some(Outcome::Tie),
            _ => None,
        }
    }
}

/// Side a signal tells the channel to bet on. Ties are protected, never bet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetSide {
    Banker,
    Player,
}

impl BetSide {
    pub fn opposite(&self) -> Self {
        match self {
            BetSide::Banker => BetSide::Player,
            BetSide::Player => BetSide::Banker,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            BetSide::Banker => "🔴",
            BetSide::Player => "🔵",
        }
    }

    /// The round outcome that wins this bet outright (ties handled separately).
    pub fn winning_outcome(&self) -> Outcome {
        match self {
            BetSide::Banker => Outcome::BankerWon,
            BetSide::Player => Outcome::PlayerWon,
        }
    }
}

impl std::fmt::Display for BetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetSide::Banker => write!(f, "Banker"),
            BetSide::Player => write!(f, "Player"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Pending,
    Resolved,
}

/// One observed round. Constructed once from an API payload, never mutated.
/// `id` is the dedup key for the history buffer and the fetch cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub status: RoundStatus,
    pub outcome: Outcome,
}
