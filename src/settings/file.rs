//! TOML settings file parsing.

use std::path::Path;

use serde::Deserialize;

use crate::text::MultilinePolicy;

use super::SettingsError;

/// Root structure of the settings file.
///
/// All fields are optional so a partial file can be merged with CLI
/// arguments and defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Value layout section
    #[serde(default)]
    pub layout: LayoutSection,

    /// File location section
    #[serde(default)]
    pub storage: StorageSection,
}

/// Value layout section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// `disabled`, `always` or `if_too_long`
    pub multiline: Option<MultilinePolicy>,

    /// Width budget for wrapped values
    pub line_width: Option<usize>,

    /// Spaces per nesting level
    pub indent: Option<usize>,

    /// Write back entries no code registered
    pub keep_unused: Option<bool>,
}

/// File location section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    /// Base directory; a leading `~` is the home directory
    pub base_dir: Option<String>,

    /// Subfolder of the base directory
    pub subfolder: Option<String>,
}

impl SettingsFile {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(SettingsError::from)
    }
}

/// Generates a default settings file with comments.
#[must_use]
pub fn default_settings_template() -> String {
    r#"# structcfg settings

[layout]
# How array and structured values wrap: "disabled", "always" or "if_too_long"
# (default: "if_too_long", can be overridden by --multiline)
# multiline = "if_too_long"

# Width budget for wrapped values (default: 75)
# line_width = 75

# Spaces per nesting level (default: 4, at most 16)
# indent = 4

# Write back entries and sections that no code registered (default: true)
# keep_unused = true

[storage]
# Directory config files live under; "~" expands to the home directory
# base_dir = "."

# Subfolder of base_dir, e.g. "mymod"
# subfolder = ""
"#
    .to_string()
}
