//! Settings after merging CLI, TOML and defaults.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::codec::ConfigWriter;
use crate::text::{MultilinePolicy, TextLayout};

use super::cli::Cli;
use super::defaults;
use super::error::SettingsError;
use super::file::SettingsFile;

/// Fully resolved codec settings.
///
/// # Construction
///
/// Use [`CodecSettings::from_raw`] to merge CLI arguments with an optional
/// settings file, or [`CodecSettings::from_file`] when there is no CLI.
/// Invalid values are rejected during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecSettings {
    /// Multiline policy
    pub multiline: MultilinePolicy,

    /// Width budget for wrapped values
    pub line_width: usize,

    /// Spaces per nesting level
    pub indent: usize,

    /// Write back entries no code registered
    pub keep_unused: bool,

    /// Base directory, with `~` expanded
    pub base_dir: PathBuf,

    /// Subfolder of the base directory
    pub subfolder: PathBuf,
}

/// CLI values that take precedence over the settings file.
#[derive(Debug, Default)]
struct Overrides {
    multiline: Option<MultilinePolicy>,
    line_width: Option<usize>,
    indent: Option<usize>,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            multiline: defaults::MULTILINE,
            line_width: defaults::LINE_WIDTH,
            indent: defaults::INDENT,
            keep_unused: defaults::KEEP_UNUSED,
            base_dir: PathBuf::from(defaults::BASE_DIR),
            subfolder: PathBuf::new(),
        }
    }
}

impl fmt::Display for CodecSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "multiline={:?}, line_width={}, indent={}, keep_unused={}, dir={}",
            self.multiline,
            self.line_width,
            self.indent,
            self.keep_unused,
            self.config_dir().display()
        )
    }
}

impl CodecSettings {
    /// Merges CLI arguments with an optional settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if a merged value is invalid.
    pub fn from_raw(cli: &Cli, file: Option<&SettingsFile>) -> Result<Self, SettingsError> {
        let overrides = Overrides {
            multiline: cli.multiline.map(MultilinePolicy::from),
            line_width: cli.line_width,
            indent: cli.indent,
        };
        Self::resolve(&overrides, file)
    }

    /// Builds settings from a settings file and defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is invalid.
    pub fn from_file(file: Option<&SettingsFile>) -> Result<Self, SettingsError> {
        Self::resolve(&Overrides::default(), file)
    }

    /// Loads the settings file named by `cli.settings`, if any, and merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// merged settings are invalid.
    pub fn load(cli: &Cli) -> Result<Self, SettingsError> {
        let file = if let Some(ref path) = cli.settings {
            Some(SettingsFile::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, file.as_ref())
    }

    fn resolve(overrides: &Overrides, file: Option<&SettingsFile>) -> Result<Self, SettingsError> {
        let layout = file.map(|f| &f.layout);
        let storage = file.map(|f| &f.storage);

        // Priority: CLI explicit > TOML > default
        let multiline = overrides
            .multiline
            .or_else(|| layout.and_then(|l| l.multiline))
            .unwrap_or(defaults::MULTILINE);

        let line_width = overrides
            .line_width
            .or_else(|| layout.and_then(|l| l.line_width))
            .unwrap_or(defaults::LINE_WIDTH);

        let indent = overrides
            .indent
            .or_else(|| layout.and_then(|l| l.indent))
            .unwrap_or(defaults::INDENT);

        let keep_unused = layout
            .and_then(|l| l.keep_unused)
            .unwrap_or(defaults::KEEP_UNUSED);

        if line_width == 0 {
            return Err(SettingsError::InvalidLineWidth { value: line_width });
        }
        if indent > defaults::MAX_INDENT {
            return Err(SettingsError::InvalidIndent {
                value: indent,
                max: defaults::MAX_INDENT,
            });
        }

        let base_dir = storage
            .and_then(|s| s.base_dir.as_deref())
            .map_or_else(|| PathBuf::from(defaults::BASE_DIR), expand_tilde);

        let subfolder = storage
            .and_then(|s| s.subfolder.as_deref())
            .map(validate_subfolder)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            multiline,
            line_width,
            indent,
            keep_unused,
            base_dir,
            subfolder,
        })
    }

    /// Layout derived from these settings.
    #[must_use]
    pub const fn layout(&self) -> TextLayout {
        TextLayout::new(self.multiline)
            .with_line_width(self.line_width)
            .with_indent(self.indent)
    }

    /// Writer derived from these settings.
    #[must_use]
    pub const fn writer(&self) -> ConfigWriter {
        ConfigWriter::new(self.layout()).with_keep_unused(self.keep_unused)
    }

    /// `<base>/<subfolder>`.
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.join(&self.subfolder)
    }

    /// `<base>/<subfolder>/<name>.cfg`.
    #[must_use]
    pub fn config_path(&self, name: &str) -> PathBuf {
        self.config_dir()
            .join(format!("{name}.{}", defaults::FILE_EXTENSION))
    }
}

/// Writes the default settings template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_settings(path: &Path) -> Result<(), SettingsError> {
    let template = super::file::default_settings_template();
    std::fs::write(path, template).map_err(|e| SettingsError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(path),
    };
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };
    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() { home } else { home.join(rest) }
}

fn validate_subfolder(value: &str) -> Result<PathBuf, SettingsError> {
    let path = PathBuf::from(value);
    let invalid = |reason| SettingsError::InvalidSubfolder {
        value: value.to_string(),
        reason,
    };
    if path.is_absolute() || path.has_root() {
        return Err(invalid("must be relative"));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(invalid("must not contain '..'"));
    }
    Ok(path)
}
