//! Pattern catalog: static sequence-to-action rules
//!
//! Loaded once at startup from a JSON file and validated all-or-nothing.
//! Any invalid entry aborts startup; there is no partial catalog.

use crate::error::{BotError, Result};
use crate::types::Outcome;
use serde::Deserialize;
use std::path::Path;

/// Closed set of betting actions a pattern can declare.
///
/// Tags are the `snake_case` strings used in the catalog file. An unknown
/// tag fails catalog validation; there is no silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternAction {
    /// Bet the same side as the sequence's last symbol.
    FollowTrend,
    /// Bet the opposite side of the sequence's last symbol.
    OpposeLast,
    /// Alias of `OpposeLast` kept for older catalog files.
    AgainstLast,
    /// Bet the side the sequence started on.
    StartingSide,
    /// Player if the last symbol is Player-colored, else Banker.
    FollowBreakout,
    /// Player if the last symbol is Banker-colored, else Banker.
    FollowAlternation,
    /// Player if the last symbol is Player-colored, else Banker.
    FollowNewColor,
    /// Constant Banker.
    FollowBanker,
    /// Constant Player.
    FollowPlayer,
    /// Constant Banker; the tie in the sequence is only context.
    IgnoreTieFollowBanker,
    /// Constant Player.
    BackToPlayer,
    /// Banker if the second-to-last symbol is Banker-colored, else Player.
    FollowPairs,
    /// Same rule as `FollowPairs`, for the "2x" catalog entries.
    FollowDouble,
    /// Bet the same side as the sequence's first symbol.
    FollowCycle,
    /// Player if the first symbol is Player-colored, else Banker.
    NewStart,
}

impl PatternAction {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "follow_trend" => Some(Self::FollowTrend),
            "oppose_last" => Some(Self::OpposeLast),
            "against_last" => Some(Self::AgainstLast),
            "starting_side" => Some(Self::StartingSide),
            "follow_breakout" => Some(Self::FollowBreakout),
            "follow_alternation" => Some(Self::FollowAlternation),
            "follow_new_color" => Some(Self::FollowNewColor),
            "follow_banker" => Some(Self::FollowBanker),
            "follow_player" => Some(Self::FollowPlayer),
            "ignore_tie_follow_banker" => Some(Self::IgnoreTieFollowBanker),
            "back_to_player" => Some(Self::BackToPlayer),
            "follow_pairs" => Some(Self::FollowPairs),
            "follow_double" => Some(Self::FollowDouble),
            "follow_cycle" => Some(Self::FollowCycle),
            "new_start" => Some(Self::NewStart),
            _ => None,
        }
    }
}

/// One validated catalog entry.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub id: u32,
    /// Ordered outcome sequence, oldest-first. Never empty.
    pub sequence: Vec<Outcome>,
    pub action: PatternAction,
}

/// File representation: sequences are emoji strings, actions are tags.
#[derive(Debug, Deserialize)]
struct RawPattern {
    id: u32,
    sequence: Vec<String>,
    action: String,
}

/// The full static pattern set, read-only after load.
#[derive(Debug)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// Load and validate the catalog file. Fatal on any invalid entry.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<RawPattern> = serde_json::from_str(&raw)?;
        Self::from_raw(entries)
    }

    fn from_raw(entries: Vec<RawPattern>) -> Result<Self> {
        let mut patterns = Vec::with_capacity(entries.len());
        let mut seen_ids = std::collections::HashSet::new();

        for entry in entries {
            if !seen_ids.insert(entry.id) {
                return Err(BotError::CatalogValidation {
                    pattern_id: entry.id,
                    detail: "duplicate pattern id".to_string(),
                });
            }

            if entry.sequence.is_empty() {
                return Err(BotError::CatalogValidation {
                    pattern_id: entry.id,
                    detail: "empty sequence".to_string(),
                });
            }

            let mut sequence = Vec::with_capacity(entry.sequence.len());
            for symbol in &entry.sequence {
                match Outcome::from_emoji(symbol) {
                    Some(outcome) => sequence.push(outcome),
                    None => {
                        return Err(BotError::CatalogValidation {
                            pattern_id: entry.id,
                            detail: format!("unknown symbol {:?}", symbol),
                        });
                    }
                }
            }

            let action = PatternAction::from_tag(&entry.action).ok_or_else(|| {
                BotError::CatalogValidation {
                    pattern_id: entry.id,
                    detail: format!("unknown action {:?}", entry.action),
                }
            })?;

            patterns.push(Pattern {
                id: entry.id,
                sequence,
                action,
            });
        }

        tracing::info!("Loaded {} patterns", patterns.len());
        Ok(Self { patterns })
    }

    /// Patterns in declaration order. The matcher's tie-break depends on it.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn catalog_from_json(json: &str) -> Result<PatternCatalog> {
    let entries: Vec<RawPattern> = serde_json::from_str(json)?;
    PatternCatalog::from_raw(entries)
}
