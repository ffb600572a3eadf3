//! Tests for the pattern catalog loader

#[cfg(test)]
mod tests {
    use super::super::catalog::*;
    use super::super::error::BotError;
    use super::super::types::Outcome;

    #[test]
    fn test_load_valid_catalog() {
        let json = r#"[
            {"id": 1, "sequence": ["🔴", "🔴", "🔴"], "action": "follow_trend"},
            {"id": 2, "sequence": ["🔵", "🔴", "🔵"], "action": "oppose_last"}
        ]"#;

        let catalog = catalog_from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = &catalog.patterns()[0];
        assert_eq!(first.id, 1);
        assert_eq!(
            first.sequence,
            vec![Outcome::BankerWon, Outcome::BankerWon, Outcome::BankerWon]
        );
        assert_eq!(first.action, PatternAction::FollowTrend);
    }

    #[test]
    fn test_invalid_symbol_names_offending_pattern() {
        let json = r#"[
            {"id": 1, "sequence": ["🔴"], "action": "follow_trend"},
            {"id": 7, "sequence": ["🔴", "🟢"], "action": "follow_trend"}
        ]"#;

        let err = catalog_from_json(json).unwrap_err();
        match err {
            BotError::CatalogValidation { pattern_id, .. } => assert_eq!(pattern_id, 7),
            other => panic!("expected CatalogValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"[
            {"id": 3, "sequence": ["🔴"], "action": "do_something_wild"}
        ]"#;

        let err = catalog_from_json(json).unwrap_err();
        match err {
            BotError::CatalogValidation { pattern_id, detail } => {
                assert_eq!(pattern_id, 3);
                assert!(detail.contains("unknown action"));
            }
            other => panic!("expected CatalogValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let json = r#"[{"id": 4, "sequence": [], "action": "follow_trend"}]"#;

        let err = catalog_from_json(json).unwrap_err();
        match err {
            BotError::CatalogValidation { pattern_id, detail } => {
                assert_eq!(pattern_id, 4);
                assert!(detail.contains("empty"));
            }
            other => panic!("expected CatalogValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id": 5, "sequence": ["🔴"], "action": "follow_banker"},
            {"id": 5, "sequence": ["🔵"], "action": "follow_player"}
        ]"#;

        let err = catalog_from_json(json).unwrap_err();
        match err {
            BotError::CatalogValidation { pattern_id, detail } => {
                assert_eq!(pattern_id, 5);
                assert!(detail.contains("duplicate"));
            }
            other => panic!("expected CatalogValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_no_partial_catalog_on_failure() {
        // One bad entry poisons the whole load, per the all-or-nothing rule.
        let json = r#"[
            {"id": 1, "sequence": ["🔴"], "action": "follow_trend"},
            {"id": 2, "sequence": ["x"], "action": "follow_trend"},
            {"id": 3, "sequence": ["🔵"], "action": "follow_trend"}
        ]"#;

        assert!(catalog_from_json(json).is_err());
    }

    #[test]
    fn test_all_action_tags_parse() {
        let tags = [
            "follow_trend",
            "oppose_last",
            "against_last",
            "starting_side",
            "follow_breakout",
            "follow_alternation",
            "follow_new_color",
            "follow_banker",
            "follow_player",
            "ignore_tie_follow_banker",
            "back_to_player",
            "follow_pairs",
            "follow_double",
            "follow_cycle",
            "new_start",
        ];
        for tag in tags {
            assert!(PatternAction::from_tag(tag).is_some(), "tag {} should parse", tag);
        }
        assert!(PatternAction::from_tag("martingale").is_none());
    }
}
