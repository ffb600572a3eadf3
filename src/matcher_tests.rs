//! Tests for the pattern matcher

#[cfg(test)]
mod tests {
    use super::super::catalog::catalog_from_json;
    use super::super::matcher::find_match;
    use super::super::types::Outcome::{self, BankerWon as B, PlayerWon as P, Tie as T};

    fn tail(symbols: &[Outcome]) -> Vec<Outcome> {
        symbols.to_vec()
    }

    #[test]
    fn test_suffix_match() {
        let catalog = catalog_from_json(
            r#"[{"id": 1, "sequence": ["🔴", "🔴", "🔴"], "action": "follow_trend"}]"#,
        )
        .unwrap();

        let matched = find_match(&catalog, &tail(&[P, B, B, B])).unwrap();
        assert_eq!(matched.id, 1);

        // Sequence present but not as a suffix: no match
        assert!(find_match(&catalog, &tail(&[B, B, B, P])).is_none());
    }

    #[test]
    fn test_exact_symbols_no_wildcards() {
        let catalog = catalog_from_json(
            r#"[{"id": 1, "sequence": ["🔴", "🟡", "🔴"], "action": "follow_banker"}]"#,
        )
        .unwrap();

        assert!(find_match(&catalog, &tail(&[B, T, B])).is_some());
        assert!(find_match(&catalog, &tail(&[B, B, B])).is_none());
    }

    #[test]
    fn test_longest_match_wins() {
        let catalog = catalog_from_json(
            r#"[
                {"id": 1, "sequence": ["🔴", "🔴"], "action": "follow_trend"},
                {"id": 2, "sequence": ["🔵", "🔴", "🔴"], "action": "follow_trend"}
            ]"#,
        )
        .unwrap();

        let matched = find_match(&catalog, &tail(&[P, B, B])).unwrap();
        assert_eq!(matched.id, 2);
    }

    #[test]
    fn test_equal_length_tie_break_is_declaration_order() {
        // Two distinct ids with the same sequence length both match; the
        // first declared wins, deterministically.
        let catalog = catalog_from_json(
            r#"[
                {"id": 10, "sequence": ["🔴", "🔴"], "action": "follow_trend"},
                {"id": 11, "sequence": ["🔴", "🔴"], "action": "oppose_last"}
            ]"#,
        )
        .unwrap();

        for _ in 0..5 {
            let matched = find_match(&catalog, &tail(&[B, B, B])).unwrap();
            assert_eq!(matched.id, 10);
        }
    }

    #[test]
    fn test_pattern_longer_than_history() {
        let catalog = catalog_from_json(
            r#"[{"id": 1, "sequence": ["🔴", "🔴", "🔴", "🔴"], "action": "follow_trend"}]"#,
        )
        .unwrap();

        assert!(find_match(&catalog, &tail(&[B, B])).is_none());
        assert!(find_match(&catalog, &[]).is_none());
    }

    #[test]
    fn test_matched_sequence_is_tail_suffix() {
        let catalog = catalog_from_json(
            r#"[
                {"id": 1, "sequence": ["🔵", "🔴"], "action": "follow_trend"},
                {"id": 2, "sequence": ["🟡", "🔵", "🔴"], "action": "follow_banker"}
            ]"#,
        )
        .unwrap();

        let history = tail(&[B, T, P, B]);
        let matched = find_match(&catalog, &history).unwrap();
        let n = matched.sequence.len();
        assert_eq!(&history[history.len() - n..], &matched.sequence[..]);
    }
}
