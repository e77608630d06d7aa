//! Tests for the file-backed config handler.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use crate::entry::{ConfigEntry, IntValue, SyncKind};
use crate::tree::{Config, ConfigSection};

use super::*;

fn config() -> Config {
    Config::new("game").unwrap()
}

fn server_section() -> ConfigSection {
    ConfigSection::new("server")
        .unwrap()
        .with_entry(ConfigEntry::new("port", IntValue::new(8080)).unwrap())
        .with_entry(
            ConfigEntry::new("difficulty", IntValue::new(1).with_range(0, 3))
                .unwrap()
                .with_sync(SyncKind::ServerToClient),
        )
}

fn port(handler: &ConfigHandler) -> Option<i64> {
    handler
        .config()
        .section("server")
        .and_then(|s| s.entry("port"))
        .and_then(ConfigEntry::as_int)
        .map(IntValue::get)
}

/// Owner that registers the server section and records every callback.
#[derive(Default)]
struct RecordingOwner {
    calls: Vec<&'static str>,
    synced_keys: Vec<String>,
}

impl ConfigOwner for RecordingOwner {
    fn on_config_created(&mut self, handler: &mut ConfigHandler) {
        self.calls.push("created");
        handler.config_mut().add_section(server_section()).unwrap();
    }

    fn register_config_handler(&mut self, _handler: &ConfigHandler) {
        self.calls.push("config");
    }

    fn register_sync_handler(&mut self, handler: &ConfigHandler) {
        self.calls.push("sync");
        self.synced_keys = handler
            .config()
            .synced_entries(SyncKind::ServerToClient)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
    }
}

mod loading {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut handler = ConfigHandler::new(config(), dir.path().join("game.cfg"));

        let outcome = handler.load().unwrap();
        assert_eq!(outcome, LoadOutcome::NotFound);
        assert!(!outcome.is_loaded());
        assert!(outcome.report().is_none());
    }

    #[test]
    fn values_are_read_and_snapshotted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.cfg");
        std::fs::write(&path, "[server]\nI:port=9000\nI:bogus=x\n").unwrap();

        let mut handler = ConfigHandler::new(config(), &path);
        handler.config_mut().add_section(server_section()).unwrap();
        let outcome = handler.load().unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(port(&handler), Some(9000));
        assert!(!handler.config().has_changed());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut handler = ConfigHandler::new(config(), dir.path());

        assert!(matches!(handler.load(), Err(HandlerError::Read { .. })));
    }

    #[test]
    fn listeners_run_after_each_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.cfg");
        let mut handler = ConfigHandler::new(config(), &path);

        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        handler.add_loaded_listener(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        handler.load().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        std::fs::write(&path, "[server]\nI:port=1\n").unwrap();
        handler.load().unwrap();
        handler.load().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}

mod saving {
    use super::*;

    #[test]
    fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("game.cfg");
        let mut handler = ConfigHandler::new(config(), &path);
        handler.config_mut().add_section(server_section()).unwrap();

        handler.save().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[server]\nI:port=8080\n"));
        assert!(!dir.path().join("nested/deeper/game.cfg.tmp").exists());
    }

    #[test]
    fn save_then_load_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.cfg");

        let mut first = ConfigHandler::new(config(), &path);
        first.config_mut().add_section(server_section()).unwrap();
        first
            .config_mut()
            .section_mut("server")
            .and_then(|s| s.entry_mut("port"))
            .unwrap()
            .set_text("25565")
            .unwrap();
        first.save().unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        let mut second = ConfigHandler::new(config(), &path);
        second.config_mut().add_section(server_section()).unwrap();
        second.load().unwrap();
        second.save().unwrap();

        assert_eq!(port(&second), Some(25565));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn blocked_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let handler = ConfigHandler::new(config(), blocker.join("game.cfg"));
        assert!(matches!(handler.save(), Err(HandlerError::CreateDir { .. })));
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn init_runs_owner_callbacks_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.cfg");
        std::fs::write(&path, "[server]\nI:port=7000\n").unwrap();

        let mut owner = RecordingOwner::default();
        let mut handler = ConfigHandler::new(config(), &path);
        let outcome = handler.init(&mut owner).unwrap();

        assert!(outcome.is_loaded());
        assert_eq!(owner.calls, ["created", "config", "sync"]);
        assert_eq!(owner.synced_keys, ["server.difficulty"]);
        assert_eq!(port(&handler), Some(7000));
    }

    #[test]
    fn init_writes_a_fresh_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.cfg");

        let mut owner = RecordingOwner::default();
        let mut handler = ConfigHandler::new(config(), &path);
        assert_eq!(handler.init(&mut owner).unwrap(), LoadOutcome::NotFound);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "[server]\nI:port=8080\n\n# \u{200B}Range: 0 ~ 3\nI:difficulty=1\n"
        );
    }

    #[test]
    fn init_stops_before_registration_on_error() {
        let dir = TempDir::new().unwrap();
        let mut owner = RecordingOwner::default();
        let mut handler = ConfigHandler::new(config(), dir.path());

        assert!(handler.init(&mut owner).is_err());
        assert_eq!(owner.calls, ["created"]);
    }
}
