//! Tests for entry construction and entry-level behaviour.

use super::*;

mod keys {
    use super::*;

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["", " padded", "padded ", "a:b", "a=b", "two\nlines"] {
            assert!(
                matches!(
                    ConfigEntry::new(key, IntValue::new(0)),
                    Err(EntryError::InvalidKey { .. })
                ),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn inner_spaces_and_dots_are_fine() {
        assert!(ConfigEntry::new("max players.total", IntValue::new(0)).is_ok());
    }
}

mod flags {
    use super::*;

    #[test]
    fn code_entries_are_used() {
        let entry = ConfigEntry::new("a", BoolValue::new(true)).unwrap();
        assert!(entry.is_used());
    }

    #[test]
    fn loaded_entries_are_unused() {
        let entry = ConfigEntry::loaded("a", BoolValue::new(true)).unwrap();
        assert!(!entry.is_used());
    }

    #[test]
    fn builder_sets_metadata() {
        let entry = ConfigEntry::new("a", BoolValue::new(true))
            .unwrap()
            .with_sync(SyncKind::ServerToClient)
            .with_reload(ReloadRequirement::World);
        assert_eq!(entry.sync(), SyncKind::ServerToClient);
        assert_eq!(entry.reload(), Some(ReloadRequirement::World));
        assert_eq!(entry.prefix(), 'B');
    }
}

mod comments {
    use super::*;

    #[test]
    fn multiline_comment_is_split() {
        let entry = ConfigEntry::new("a", IntValue::new(1))
            .unwrap()
            .with_comment("first\nsecond");
        assert_eq!(entry.comment(), ["first", "second"]);
    }

    #[test]
    fn empty_comment_has_no_lines() {
        let mut entry = ConfigEntry::new("a", IntValue::new(1))
            .unwrap()
            .with_comment("x");
        entry.set_comment("");
        assert!(entry.comment().is_empty());
    }
}

mod change_tracking {
    use super::*;

    #[test]
    fn unused_entries_never_report_changes() {
        let mut entry = ConfigEntry::loaded("a", IntValue::new(1)).unwrap();
        entry.set_text("2").unwrap();
        assert!(!entry.has_changed());

        entry.set_used(true);
        assert!(entry.has_changed());
    }

    #[test]
    fn snapshot_resets_change_state() {
        let mut entry = ConfigEntry::new("a", StringValue::new("x")).unwrap();
        entry.set_text("y").unwrap();
        assert!(entry.has_changed());

        entry.snapshot();
        assert!(!entry.has_changed());
        assert!(!entry.is_default());
    }

    #[test]
    fn reset_restores_default() {
        let mut entry = ConfigEntry::new("a", DoubleValue::new(1.5)).unwrap();
        entry.set_text("3").unwrap();
        entry.reset();
        assert!(entry.is_default());
    }
}

mod suggestions {
    use super::*;

    fn colour() -> ConfigEntry {
        ConfigEntry::new("colour", StringValue::new("red"))
            .unwrap()
            .with_suggestion(Suggestion::value("red"))
            .unwrap()
            .with_suggestion(Suggestion::new("Blue", "blue"))
            .unwrap()
    }

    #[test]
    fn invalid_suggestion_is_rejected() {
        let result = ConfigEntry::new("n", IntValue::new(1).with_range(0, 5))
            .unwrap()
            .with_suggestion(Suggestion::value("9"));
        assert!(matches!(result, Err(EntryError::InvalidSuggestion { .. })));
    }

    #[test]
    fn unforced_suggestions_do_not_restrict() {
        let mut entry = colour();
        assert!(entry.set_text("green").is_ok());
    }

    #[test]
    fn forced_suggestions_restrict_text() {
        let mut entry = colour().force_suggestions();
        assert!(!entry.can_set_text("green"));
        assert!(entry.set_text("green").is_err());
        assert_eq!(entry.as_str().map(StringValue::get), Some("red"));

        assert!(entry.can_set_text("blue"));
        entry.set_text("blue").unwrap();
        assert_eq!(entry.as_str().map(StringValue::get), Some("blue"));
    }

    #[test]
    fn forced_suggestions_compare_normalised_text() {
        let mut entry = ConfigEntry::new("n", IntValue::new(1))
            .unwrap()
            .with_suggestion(Suggestion::value("1"))
            .unwrap()
            .with_suggestion(Suggestion::value("10"))
            .unwrap()
            .force_suggestions();
        assert!(entry.set_text(" 10 ").is_ok());
        assert!(entry.set_text("+1").is_ok());
        assert!(entry.set_text("2").is_err());
    }

    #[test]
    fn forced_suggestions_are_listed() {
        let entry = colour().force_suggestions();
        assert_eq!(entry.limitations(), vec!["Must be one of: [red, blue]"]);
    }

    #[test]
    fn tags_are_retrievable() {
        let suggestion = Suggestion::value("red").with_tag(7_u32);
        assert_eq!(suggestion.tag::<u32>(), Some(&7));
        assert_eq!(suggestion.tag::<i64>(), None);
    }
}

mod text {
    use super::*;

    #[test]
    fn block_wrapper_is_optional() {
        let mut entry = ConfigEntry::new("a", ArrayValue::new(["x"])).unwrap();
        entry.set_text("<\n    a,\n    b\n>").unwrap();
        assert_eq!(entry.as_array().unwrap().get(), ["a", "b"]);

        entry.set_text("c, d").unwrap();
        assert_eq!(entry.as_array().unwrap().get(), ["c", "d"]);
    }

    #[test]
    fn unresolved_keeps_raw_text() {
        let mut entry = ConfigEntry::loaded("a", Unresolved::new('P', "x")).unwrap();
        entry.set_text("<\n    [a=1]\n>").unwrap();
        assert_eq!(entry.serialize_value(&TextLayout::default(), 0), "<\n    [a=1]\n>");
        assert_eq!(entry.prefix(), 'P');
    }

    #[test]
    fn failed_set_reports_key() {
        let mut entry = ConfigEntry::new("count", IntValue::new(1)).unwrap();
        let err = entry.set_text("many").unwrap_err();
        assert!(matches!(err, EntryError::Value { ref key, .. } if key == "count"));
        assert!(err.to_string().contains("count"));
    }
}
