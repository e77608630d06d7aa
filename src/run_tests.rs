//! Tests for the run module.

use std::path::PathBuf;

use tempfile::TempDir;

use super::*;

fn write_file(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

mod run_error {
    use super::*;

    #[test]
    fn malformed_displays_count_and_path() {
        let error = RunError::Malformed {
            path: PathBuf::from("game.cfg"),
            count: 3,
        };
        assert_eq!(error.to_string(), "3 malformed line(s) in 'game.cfg'");
        assert!(error.is_content_error());
    }

    #[test]
    fn not_found_is_not_a_content_error() {
        let error = RunError::NotFound {
            path: PathBuf::from("missing.cfg"),
        };
        assert_eq!(error.to_string(), "Config file 'missing.cfg' does not exist");
        assert!(!error.is_content_error());
    }
}

mod check {
    use super::*;

    #[test]
    fn clean_file_reports_entry_count() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "game.cfg", "[server]\nI:port=8080\nS:motd=hi\n");
        let command = Command::Check { file: path };

        let output = execute(&command, &CodecSettings::default()).unwrap();
        assert!(output.ends_with("2 entries, no problems\n"));
    }

    #[test]
    fn malformed_lines_fail() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "game.cfg",
            "I:orphan=1\n[server]\nI:port=eighty\nnonsense\n",
        );
        let command = Command::Check { file: path };

        let error = execute(&command, &CodecSettings::default()).unwrap_err();
        assert!(matches!(error, RunError::Malformed { count: 3, .. }));
    }

    #[test]
    fn missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let command = Command::Check {
            file: dir.path().join("absent.cfg"),
        };

        let error = execute(&command, &CodecSettings::default()).unwrap_err();
        assert!(matches!(error, RunError::NotFound { .. }));
    }

    #[test]
    fn invalid_file_name_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, " .cfg", "");
        let command = Command::Check { file: path };

        let error = execute(&command, &CodecSettings::default()).unwrap_err();
        assert!(matches!(error, RunError::InvalidName { .. }));
    }
}

mod fmt {
    use super::*;

    const MESSY: &str = "\n\n[server]\n   I:port=8080   \n\n\nS:motd=hi\n";
    const CANONICAL: &str = "[server]\nI:port=8080\n\nS:motd=hi\n";

    #[test]
    fn prints_canonical_form() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "game.cfg", MESSY);
        let command = Command::Fmt {
            file: path.clone(),
            write: false,
        };

        let output = execute(&command, &CodecSettings::default()).unwrap();
        assert_eq!(output, CANONICAL);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), MESSY);
    }

    #[test]
    fn write_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "game.cfg", MESSY);
        let command = Command::Fmt {
            file: path.clone(),
            write: true,
        };

        let output = execute(&command, &CodecSettings::default()).unwrap();
        assert!(output.starts_with("Formatted "));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CANONICAL);
    }

    #[test]
    fn is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "game.cfg", CANONICAL);
        let command = Command::Fmt {
            file: path,
            write: false,
        };

        assert_eq!(
            execute(&command, &CodecSettings::default()).unwrap(),
            CANONICAL
        );
    }
}

mod dump {
    use super::*;

    #[test]
    fn renders_tree_as_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "game.cfg",
            "# Network\n[server]\n# Listen port\nI:port=8080\n\n[server.limits]\nA:names=<\n    a,\n    b\n>\n",
        );
        let command = Command::Dump { file: path };

        let output = execute(&command, &CodecSettings::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["name"], "game");
        let server = &json["sections"][0];
        assert_eq!(server["path"], "server");
        assert_eq!(server["comment"][0], "Network");
        assert_eq!(server["entries"][0]["key"], "port");
        assert_eq!(server["entries"][0]["prefix"], "I");
        assert_eq!(server["entries"][0]["value"], "8080");
        assert_eq!(server["entries"][0]["comment"][0], "Listen port");
        assert_eq!(server["entries"][0]["used"], false);

        let limits = &server["sections"][0];
        assert_eq!(limits["path"], "server.limits");
        assert_eq!(limits["entries"][0]["value"], "a, b");
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_settings_template() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("structcfg.toml");
        let command = Command::Init {
            output: output.clone(),
        };

        let message = execute(&command, &CodecSettings::default()).unwrap();
        assert!(message.starts_with("Settings template written to: "));

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(structcfg::settings::SettingsFile::parse(&text).is_ok());
    }
}
