//! Tests for resolved settings.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::text::{MultilinePolicy, TextLayout};

use super::SettingsError;
use super::cli::Cli;
use super::file::SettingsFile;
use super::resolved::{CodecSettings, write_default_settings};

fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["structcfg", "check", "a.cfg"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

fn file(content: &str) -> SettingsFile {
    SettingsFile::parse(content).unwrap()
}

mod precedence {
    use super::*;

    #[test]
    fn defaults_without_sources() {
        let settings = CodecSettings::from_raw(&cli(&[]), None).unwrap();
        assert_eq!(settings, CodecSettings::default());
        assert_eq!(settings.layout(), TextLayout::default());
        assert!(settings.keep_unused);
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml = file("[layout]\nmultiline = \"disabled\"\nline_width = 120\nkeep_unused = false");
        let settings = CodecSettings::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(settings.multiline, MultilinePolicy::Disabled);
        assert_eq!(settings.line_width, 120);
        assert!(!settings.keep_unused);
        assert!(!settings.writer().keeps_unused());
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = file("[layout]\nmultiline = \"disabled\"\nline_width = 120\nindent = 8");
        let settings = CodecSettings::from_raw(
            &cli(&["--multiline", "always", "--line-width", "60"]),
            Some(&toml),
        )
        .unwrap();

        assert_eq!(settings.multiline, MultilinePolicy::AlwaysMultiline);
        assert_eq!(settings.line_width, 60);
        assert_eq!(settings.indent, 8);
    }

    #[test]
    fn from_file_ignores_cli() {
        let toml = file("[layout]\nindent = 2");
        let settings = CodecSettings::from_file(Some(&toml)).unwrap();
        assert_eq!(settings.layout().indent, 2);
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_width_is_rejected() {
        let result = CodecSettings::from_raw(&cli(&["--line-width", "0"]), None);
        assert!(matches!(result, Err(SettingsError::InvalidLineWidth { value: 0 })));
    }

    #[test]
    fn large_indent_is_rejected() {
        let toml = file("[layout]\nindent = 17");
        let result = CodecSettings::from_file(Some(&toml));
        assert!(matches!(result, Err(SettingsError::InvalidIndent { value: 17, max: 16 })));
    }

    #[test]
    fn escaping_subfolders_are_rejected() {
        for subfolder in ["../outside", "/etc", "a/../../b"] {
            let toml = file(&format!("[storage]\nsubfolder = \"{subfolder}\""));
            assert!(
                matches!(
                    CodecSettings::from_file(Some(&toml)),
                    Err(SettingsError::InvalidSubfolder { .. })
                ),
                "{subfolder}"
            );
        }
    }
}

mod paths {
    use super::*;

    #[test]
    fn config_path_joins_base_subfolder_and_name() {
        let toml = file("[storage]\nbase_dir = \"/srv/game\"\nsubfolder = \"mymod\"");
        let settings = CodecSettings::from_file(Some(&toml)).unwrap();

        assert_eq!(settings.config_path("server"), PathBuf::from("/srv/game/mymod/server.cfg"));
    }

    #[test]
    fn default_path_is_relative() {
        let settings = CodecSettings::default();
        assert_eq!(settings.config_path("client"), PathBuf::from("./client.cfg"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let toml = file("[storage]\nbase_dir = \"~/configs\"");
        let settings = CodecSettings::from_file(Some(&toml)).unwrap();
        assert_eq!(settings.base_dir, home.join("configs"));
    }

    #[test]
    fn tilde_inside_a_name_is_kept() {
        let toml = file("[storage]\nbase_dir = \"~user/configs\"");
        let settings = CodecSettings::from_file(Some(&toml)).unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("~user/configs"));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_the_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("structcfg.toml");
        std::fs::write(&path, "[layout]\nline_width = 90\n").unwrap();

        let path_str = path.to_string_lossy().to_string();
        let settings = CodecSettings::load(&cli(&["--settings", path_str.as_str()])).unwrap();
        assert_eq!(settings.line_width, 90);
    }

    #[test]
    fn written_template_loads_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("structcfg.toml");
        write_default_settings(&path).unwrap();

        let loaded = SettingsFile::load(&path).unwrap();
        let settings = CodecSettings::from_file(Some(&loaded)).unwrap();
        assert_eq!(settings, CodecSettings::default());
    }
}
