//! Tests for the results API client

#[cfg(test)]
mod tests {
    use super::super::client::{backoff_delay, parse_event_json};
    use super::super::types::{Outcome, RoundStatus};
    use std::time::Duration;

    const SAMPLE: &str = r#"{
        "id": "evt-1001",
        "data": {
            "startedAt": "2025-06-01T12:30:05.123Z",
            "status": "Resolved",
            "result": {"outcome": "BankerWon"}
        }
    }"#;

    #[test]
    fn test_parse_resolved_event() {
        let event = parse_event_json(SAMPLE).unwrap();
        assert_eq!(event.id, "evt-1001");
        assert_eq!(event.status, RoundStatus::Resolved);
        assert_eq!(event.outcome, Outcome::BankerWon);
        assert_eq!(event.started_at.timestamp(), 1748781005);
    }

    #[test]
    fn test_parse_numeric_id() {
        let raw = r#"{
            "id": 42,
            "data": {
                "startedAt": "2025-06-01T12:30:05Z",
                "status": "InProgress",
                "result": {"outcome": "Tie"}
            }
        }"#;
        let event = parse_event_json(raw).unwrap();
        assert_eq!(event.id, "42");
        // Anything that is not "Resolved" counts as pending
        assert_eq!(event.status, RoundStatus::Pending);
        assert_eq!(event.outcome, Outcome::Tie);
    }

    #[test]
    fn test_parse_rejects_unknown_outcome() {
        let raw = r#"{
            "id": "x",
            "data": {
                "startedAt": "2025-06-01T12:30:05Z",
                "status": "Resolved",
                "result": {"outcome": "DealerWon"}
            }
        }"#;
        assert!(parse_event_json(raw).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_event_json(r#"{"id": "x"}"#).is_err());
        assert!(parse_event_json("{}").is_err());
        assert!(parse_event_json("not json").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let raw = r#"{
            "id": "x",
            "data": {
                "startedAt": "yesterday",
                "status": "Resolved",
                "result": {"outcome": "Tie"}
            }
        }"#;
        assert!(parse_event_json(raw).is_err());
    }

    #[test]
    fn test_backoff_schedule_grows_and_caps() {
        let base = Duration::from_millis(500);
        let max = Duration::from_millis(5000);

        assert_eq!(backoff_delay(base, max, 0), Duration::from_millis(500));
        assert_eq!(backoff_delay(base, max, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(base, max, 2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(base, max, 3), Duration::from_millis(4000));
        // Capped from here on
        assert_eq!(backoff_delay(base, max, 4), max);
        assert_eq!(backoff_delay(base, max, 30), max);
    }
}
