//! Tests for TOML settings parsing.

use crate::text::MultilinePolicy;

use super::SettingsError;
use super::file::{SettingsFile, default_settings_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_settings() {
        let settings = SettingsFile::parse("").unwrap();
        assert!(settings.layout.multiline.is_none());
        assert!(settings.storage.base_dir.is_none());
    }

    #[test]
    fn parse_full_settings() {
        let toml = r#"
            [layout]
            multiline = "always"
            line_width = 100
            indent = 2
            keep_unused = false

            [storage]
            base_dir = "~/configs"
            subfolder = "mymod"
        "#;

        let settings = SettingsFile::parse(toml).unwrap();
        assert_eq!(settings.layout.multiline, Some(MultilinePolicy::AlwaysMultiline));
        assert_eq!(settings.layout.line_width, Some(100));
        assert_eq!(settings.layout.indent, Some(2));
        assert_eq!(settings.layout.keep_unused, Some(false));
        assert_eq!(settings.storage.base_dir.as_deref(), Some("~/configs"));
        assert_eq!(settings.storage.subfolder.as_deref(), Some("mymod"));
    }

    #[test]
    fn multiline_accepts_long_and_short_names() {
        for (name, policy) in [
            ("disabled", MultilinePolicy::Disabled),
            ("always_multiline", MultilinePolicy::AlwaysMultiline),
            ("if_too_long", MultilinePolicy::MultilineIfTooLong),
            ("multiline_if_too_long", MultilinePolicy::MultilineIfTooLong),
        ] {
            let settings = SettingsFile::parse(&format!("[layout]\nmultiline = \"{name}\"")).unwrap();
            assert_eq!(settings.layout.multiline, Some(policy), "{name}");
        }
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_fields_are_rejected() {
        let result = SettingsFile::parse("[layout]\nwidth = 80");
        assert!(matches!(result, Err(SettingsError::TomlParse(_))));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(SettingsFile::parse("[network]\nport = 1").is_err());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(SettingsFile::parse("[layout]\nmultiline = \"sometimes\"").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = SettingsFile::load(std::path::Path::new("/nonexistent/structcfg.toml"));
        assert!(matches!(result, Err(SettingsError::FileRead { .. })));
    }
}

#[test]
fn template_parses_to_defaults() {
    let settings = SettingsFile::parse(&default_settings_template()).unwrap();
    assert!(settings.layout.multiline.is_none());
    assert!(settings.layout.line_width.is_none());
    assert!(settings.storage.subfolder.is_none());
}
