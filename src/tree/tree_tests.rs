//! Tests for sections and the config tree.

use crate::codec::ConfigWriter;
use crate::entry::{ConfigEntry, IntValue, StringValue, SyncKind, Unresolved};

use super::*;

fn int(key: &str, value: i64) -> ConfigEntry {
    ConfigEntry::new(key, IntValue::new(value)).unwrap()
}

fn text(key: &str, value: &str) -> ConfigEntry {
    ConfigEntry::new(key, StringValue::new(value)).unwrap()
}

fn loaded(key: &str, entry: impl Into<crate::entry::EntryValue>, raw: &str) -> ConfigEntry {
    let mut e = ConfigEntry::loaded(key, entry).unwrap();
    e.set_text(raw).unwrap();
    e
}

mod names {
    use super::*;

    #[test]
    fn section_names_reject_separators() {
        for name in ["", " a", "a.b", "[a]", "a\nb"] {
            assert!(
                matches!(ConfigSection::new(name), Err(TreeError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
        assert!(ConfigSection::new("limits").is_ok());
    }

    #[test]
    fn config_names_must_be_file_names() {
        for name in ["", "  ", "a/b", "..", " x"] {
            assert!(Config::new(name).is_err(), "{name:?} should be rejected");
        }
        assert_eq!(Config::new("server").unwrap().name(), "server");
    }
}

mod paths {
    use super::*;

    #[test]
    fn nested_sections_report_dotted_paths() {
        let inner = ConfigSection::new("c").unwrap();
        let middle = ConfigSection::new("b").unwrap().with_section(inner).unwrap();
        let mut config = Config::new("demo").unwrap();
        config
            .add_section(ConfigSection::new("a").unwrap().with_section(middle).unwrap())
            .unwrap();

        let c = config.section_by_path("a.b.c").unwrap();
        assert_eq!(c.path(), "a.b.c");
        assert_eq!(c.parent_path(), Some("a.b"));
    }

    #[test]
    fn attached_section_cannot_be_attached_again() {
        let mut root = ConfigSection::new("root").unwrap();
        root.add_section(ConfigSection::new("child").unwrap()).unwrap();
        let attached = root.section("child").unwrap().clone();

        let mut other = ConfigSection::new("other").unwrap();
        assert!(matches!(
            other.add_section(attached),
            Err(TreeError::AlreadyAttached { ref parent, .. }) if parent == "root"
        ));
    }

    #[test]
    fn recursive_lookup_creates_unused_sections() {
        let mut config = Config::new("demo").unwrap();
        let section = config.section_recursive(&["x", "y"]).unwrap();
        assert_eq!(section.path(), "x.y");
        assert!(!section.is_used());

        assert!(!config.section("x").unwrap().is_used());
        assert!(matches!(
            config.section_recursive::<&str>(&[]),
            Err(TreeError::EmptyPath)
        ));
    }

    #[test]
    fn registering_a_section_merges_into_the_implicit_one() {
        let mut config = Config::new("demo").unwrap();
        config
            .section_recursive(&["server"])
            .unwrap()
            .add(loaded("port", IntValue::new(0), "9000"));

        let registered = ConfigSection::new("server")
            .unwrap()
            .with_comment("Server options")
            .with_entry(int("port", 8080))
            .with_entry(int("slots", 10));
        let section = config.add_section(registered).unwrap();

        assert!(section.is_used());
        assert_eq!(section.comment(), ["Server options"]);
        assert_eq!(section.entry("port").and_then(|e| e.as_int()).map(IntValue::get), Some(9000));
        assert_eq!(section.entries().len(), 2);
        assert_eq!(config.sections().len(), 1);
    }
}

mod dedup {
    use super::*;

    #[test]
    fn placeholder_is_reparsed_into_registered_type() {
        let mut section = ConfigSection::new("s").unwrap();
        section.add(loaded("foo", Unresolved::new('S', ""), "bar"));

        let entry = section.add(int("foo", 3));
        assert!(entry.is_used());
        assert_eq!(entry.as_int().map(IntValue::get), Some(3));
    }

    #[test]
    fn placeholder_text_survives_when_it_fits() {
        let mut section = ConfigSection::new("s").unwrap();
        section.add(loaded("foo", Unresolved::new('P', ""), "42"));

        let entry = section.add(int("foo", 3));
        assert_eq!(entry.as_int().map(IntValue::get), Some(42));
        assert!(!entry.has_changed());
    }

    #[test]
    fn prefix_change_favours_the_registered_type() {
        let mut section = ConfigSection::new("s").unwrap();
        section.add(loaded("foo", IntValue::new(0), "5"));

        let entry = section.add(text("foo", "hello"));
        assert_eq!(entry.prefix(), 'S');
        assert!(entry.is_used());
        assert_eq!(entry.as_str().map(StringValue::get), Some("hello"));
    }

    #[test]
    fn unused_entry_of_same_type_keeps_file_value() {
        let mut section = ConfigSection::new("s").unwrap();
        section.add(loaded("foo", IntValue::new(0), "5"));

        let entry = section.add(ConfigEntry::new("foo", IntValue::new(1).with_range(0, 3)).unwrap());
        assert_eq!(entry.as_int().map(IntValue::get), Some(3));
        assert_eq!(entry.limitations(), ["Range: 0 ~ 3"]);
    }

    #[test]
    fn registered_entry_is_kept() {
        let mut section = ConfigSection::new("s").unwrap();
        section.add(int("foo", 1)).set_text("7").unwrap();

        let entry = section.add(int("foo", 2));
        assert_eq!(entry.as_int().map(IntValue::get), Some(7));
        assert_eq!(section.entries().len(), 1);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn unused_empty_section_writes_nothing() {
        let mut config = Config::new("demo").unwrap();
        config.section_recursive(&["empty"]).unwrap();

        assert_eq!(config.serialize(&ConfigWriter::default()), "");
        assert_eq!(config.serialize(&ConfigWriter::default().with_keep_unused(false)), "");
    }

    #[test]
    fn used_section_without_entries_writes_nothing() {
        let mut config = Config::new("demo").unwrap();
        config.add_section(ConfigSection::new("empty").unwrap()).unwrap();
        assert_eq!(config.serialize(&ConfigWriter::default()), "");
    }

    #[test]
    fn sections_and_entries_are_separated_by_blank_lines() {
        let child = ConfigSection::new("limits")
            .unwrap()
            .with_entry(int("slots", 20));
        let section = ConfigSection::new("server")
            .unwrap()
            .with_comment("Server options")
            .with_entry(int("port", 8080).with_comment("Listen port"))
            .with_entry(text("name", "main"))
            .with_section(child)
            .unwrap();
        let mut config = Config::new("demo").unwrap();
        config.add_section(section).unwrap();

        assert_eq!(
            config.serialize(&ConfigWriter::default()),
            "# Server options\n[server]\n# Listen port\nI:port=8080\n\nS:name=main\n\n[server.limits]\nI:slots=20\n"
        );
    }

    #[test]
    fn unused_content_is_dropped_on_request() {
        let mut config = Config::new("demo").unwrap();
        config
            .section_recursive(&["old"])
            .unwrap()
            .add(loaded("stale", IntValue::new(0), "1"));
        config
            .add_section(ConfigSection::new("new").unwrap().with_entry(int("fresh", 2)))
            .unwrap();

        assert_eq!(
            config.serialize(&ConfigWriter::default()),
            "[old]\nI:stale=1\n\n[new]\nI:fresh=2\n"
        );
        assert_eq!(
            config.serialize(&ConfigWriter::default().with_keep_unused(false)),
            "[new]\nI:fresh=2\n"
        );
    }

    #[test]
    fn limitations_are_marked_as_generated() {
        let section = ConfigSection::new("s")
            .unwrap()
            .with_entry(ConfigEntry::new("n", IntValue::new(1).with_range(0, 9)).unwrap());
        let mut config = Config::new("demo").unwrap();
        config.add_section(section).unwrap();

        assert_eq!(
            config.serialize(&ConfigWriter::default()),
            "[s]\n# \u{200B}Range: 0 ~ 9\nI:n=1\n"
        );
    }
}

mod state {
    use super::*;

    fn config() -> Config {
        let child = ConfigSection::new("client")
            .unwrap()
            .with_entry(int("fov", 90).with_sync(SyncKind::ClientToServer));
        let section = ConfigSection::new("game")
            .unwrap()
            .with_entry(int("difficulty", 2).with_sync(SyncKind::ServerToClient))
            .with_entry(int("local", 0))
            .with_section(child)
            .unwrap();
        let mut config = Config::new("demo").unwrap();
        config.add_section(section).unwrap();
        config
    }

    #[test]
    fn synced_entries_are_keyed_by_full_path() {
        let config = config();
        let keys: Vec<String> = config
            .synced_entries(SyncKind::ServerToClient)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["game.difficulty"]);

        let client = config.synced_entries(SyncKind::ClientToServer);
        assert_eq!(client.len(), 1);
        assert_eq!(client[0].0, "game.client.fov");
    }

    #[test]
    fn synced_entries_can_be_updated() {
        let mut config = config();
        for (_, entry) in config.synced_entries_mut(SyncKind::ServerToClient) {
            entry.set_text("3").unwrap();
        }
        let difficulty = config.section("game").and_then(|s| s.entry("difficulty")).unwrap();
        assert_eq!(difficulty.as_int().map(IntValue::get), Some(3));
    }

    #[test]
    fn change_tracking_snapshot_and_reset() {
        let mut config = config();
        assert!(!config.has_changed());

        config
            .section_by_path_mut("game.client")
            .and_then(|s| s.entry_mut("fov"))
            .unwrap()
            .set_text("100")
            .unwrap();
        assert!(config.has_changed());

        config.snapshot_all();
        assert!(!config.has_changed());

        config.reset_all();
        assert!(config.has_changed());
        let fov = config.section_by_path("game.client").and_then(|s| s.entry("fov")).unwrap();
        assert!(fov.is_default());
    }
}
