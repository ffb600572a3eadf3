//! Signal/validation state machine
//!
//! Tracks the active bet, the single allowed gale retry and the win streak,
//! and decides what to notify on each new round. Decision logic is pure and
//! I/O-free: `process_round` returns `EngineEvent`s that the runner maps to
//! chat notifications, so the machine is testable without a network.
//!
//! Phases: Idle -> Armed (signal sent) -> on loss GaleArmed (one retry)
//! -> back to Idle on the next resolution either way. A tie always counts
//! as protected, never as a loss.


use crate::catalog::Pattern;
use crate::types::{BetSide, GameEvent, Outcome, RoundStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBet {
    pub side: BetSide,
    pub pattern_id: u32,
}

/// All mutable signal state, in one place. Only the engine mutates the
/// betting fields; the runner records dispatched message ids.
#[derive(Debug, Default)]
pub struct BettingState {
    pub active_bet: Option<ActiveBet>,
    /// Whether the one allowed retry for the active signal is in progress.
    pub gale_active: bool,
    pub streak: u32,
    /// Id of the last chat message still pending replacement.
    pub last_message_id: Option<i64>,
    pub last_pattern_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Armed,
    GaleArmed,
}

impl BettingState {
    pub fn phase(&self) -> Phase {
        match (&self.active_bet, self.gale_active) {
            (None, _) => Phase::Idle,
            (Some(_), false) => Phase::Armed,
            (Some(_), true) => Phase::GaleArmed,
        }
    }
}

/// What the runner should do after one round was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Send a fresh signal (replacing the prior pending message first).
    SignalDispatched { pattern_id: u32, bet: BetSide },
    /// A pattern matched but the round was already too old to act on.
    SignalSuppressed { pattern_id: u32, elapsed_secs: i64 },
    BetWon { streak: u32 },
    GaleEntered,
    BetLost,
    /// Idle notice when nothing is pending in the chat.
    Monitoring,
}

pub struct SignalEngine {
    max_round_age_secs: i64,
}

impl SignalEngine {
    pub fn new(max_round_age_secs: u64) -> Self {
        Self {
            max_round_age_secs: max_round_age_secs as i64,
        }
    }

    /// Process one freshly observed round.
    ///
    /// Order matters: an armed bet is validated against the new round
    /// first, then (if idle) a fresh match may arm a new signal. The round
    /// that completes a pattern therefore never validates its own signal.
    pub fn process_round(
        &self,
        state: &mut BettingState,
        event: &GameEvent,
        matched: Option<(&Pattern, BetSide)>,
        now: DateTime<Utc>,
    ) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        if let Some(bet) = state.active_bet {
            if event.status == RoundStatus::Resolved {
                events.push(self.validate(state, bet, event.outcome));
            }
        }

        if state.active_bet.is_none() {
            if let Some((pattern, bet)) = matched {
                let elapsed = (now - event.started_at).num_seconds();
                if elapsed < self.max_round_age_secs {
                    state.active_bet = Some(ActiveBet {
                        side: bet,
                        pattern_id: pattern.id,
                    });
                    state.last_pattern_id = Some(pattern.id);
                    events.push(EngineEvent::SignalDispatched {
                        pattern_id: pattern.id,
                        bet,
                    });
                } else {
                    tracing::warn!(
                        "Signal for pattern {} suppressed: round {}s old",
                        pattern.id,
                        elapsed
                    );
                    events.push(EngineEvent::SignalSuppressed {
                        pattern_id: pattern.id,
                        elapsed_secs: elapsed,
                    });
                }
            }
        }

        if state.active_bet.is_none() && state.last_message_id.is_none() && events.is_empty() {
            events.push(EngineEvent::Monitoring);
        }

        events
    }

    fn validate(&self, state: &mut BettingState, bet: ActiveBet, outcome: Outcome) -> EngineEvent {
        let won = outcome == bet.side.winning_outcome() || outcome == Outcome::Tie;

        if won {
            state.streak += 1;
            state.gale_active = false;
            state.active_bet = None;
            state.last_pattern_id = None;
            EngineEvent::BetWon {
                streak: state.streak,
            }
        } else if !state.gale_active {
            // First loss: same bet rides for one more round.
            state.gale_active = true;
            EngineEvent::GaleEntered
        } else {
            state.streak = 0;
            state.gale_active = false;
            state.active_bet = None;
            state.last_pattern_id = None;
            EngineEvent::BetLost
        }
    }
}
