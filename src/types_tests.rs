//! Tests for core domain types

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_outcome_emoji_round_trip() {
        for outcome in [Outcome::BankerWon, Outcome::PlayerWon, Outcome::Tie] {
            assert_eq!(Outcome::from_emoji(outcome.emoji()), Some(outcome));
        }
    }

    #[test]
    fn test_outcome_from_unknown_emoji() {
        assert_eq!(Outcome::from_emoji("🟢"), None);
        assert_eq!(Outcome::from_emoji(""), None);
        assert_eq!(Outcome::from_emoji("banker"), None);
    }

    #[test]
    fn test_bet_side_opposite() {
        assert_eq!(BetSide::Banker.opposite(), BetSide::Player);
        assert_eq!(BetSide::Player.opposite(), BetSide::Banker);
    }

    #[test]
    fn test_bet_side_winning_outcome() {
        assert_eq!(BetSide::Banker.winning_outcome(), Outcome::BankerWon);
        assert_eq!(BetSide::Player.winning_outcome(), Outcome::PlayerWon);
    }

    #[test]
    fn test_bet_side_display() {
        assert_eq!(BetSide::Banker.to_string(), "Banker");
        assert_eq!(BetSide::Player.to_string(), "Player");
    }

    #[test]
    fn test_game_event_serde_round_trip() {
        let event = GameEvent {
            id: "abc123".to_string(),
            started_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap(),
            status: RoundStatus::Resolved,
            outcome: Outcome::PlayerWon,
        };

        let raw = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&raw).unwrap();

        assert_eq!(back.id, event.id);
        assert_eq!(back.started_at, event.started_at);
        assert_eq!(back.status, event.status);
        assert_eq!(back.outcome, event.outcome);
    }

    #[test]
    fn test_outcome_serde_uses_api_names() {
        assert_eq!(serde_json::to_string(&Outcome::BankerWon).unwrap(), "\"BankerWon\"");
        assert_eq!(serde_json::to_string(&Outcome::PlayerWon).unwrap(), "\"PlayerWon\"");
        assert_eq!(serde_json::to_string(&Outcome::Tie).unwrap(), "\"Tie\"");
    }
}
