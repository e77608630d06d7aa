//! Command execution.
//!
//! Every command opens a config file with no registered entries, so the
//! default parser registry decides each entry's type from its prefix.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use structcfg::codec::LoadReport;
use structcfg::entry::{ConfigEntry, ReloadRequirement, SyncKind};
use structcfg::handler::{ConfigHandler, HandlerError, LoadOutcome};
use structcfg::settings::{CodecSettings, Command, SettingsError, write_default_settings};
use structcfg::text::TextLayout;
use structcfg::tree::{Config, ConfigSection, TreeError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The file stem is not a valid config name.
    #[error("Invalid config file name '{}': {source}", path.display())]
    InvalidName {
        /// Path given on the command line
        path: PathBuf,
        /// Why the name was rejected
        #[source]
        source: TreeError,
    },

    /// The config file does not exist.
    #[error("Config file '{}' does not exist", path.display())]
    NotFound {
        /// Path given on the command line
        path: PathBuf,
    },

    /// Reading or writing the config file failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// Writing the settings template failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The tree could not be rendered as JSON.
    #[error("Failed to render JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// `check` found malformed lines.
    #[error("{count} malformed line(s) in '{}'", path.display())]
    Malformed {
        /// Path given on the command line
        path: PathBuf,
        /// Number of skipped lines
        count: usize,
    },
}

impl RunError {
    /// Returns `true` for failures caused by the file's content rather than I/O.
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::InvalidName { .. })
    }
}

/// Runs `command`, returning the text to print on stdout.
///
/// # Errors
///
/// Returns a [`RunError`] if the file cannot be opened, read or written, or
/// if `check` finds malformed lines.
pub fn execute(command: &Command, settings: &CodecSettings) -> Result<String, RunError> {
    match command {
        Command::Check { file } => check(file, settings),
        Command::Fmt { file, write } => reformat(file, settings, *write),
        Command::Dump { file } => dump(file, settings),
        Command::Init { output } => init(output),
    }
}

/// Writes the settings template to `output`.
///
/// # Errors
///
/// Returns [`RunError::Settings`] if the file cannot be written.
pub fn init(output: &Path) -> Result<String, RunError> {
    write_default_settings(output)?;
    Ok(format!("Settings template written to: {}\n", output.display()))
}

fn open(file: &Path, settings: &CodecSettings) -> Result<(ConfigHandler, LoadReport), RunError> {
    let name = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let config = Config::new(name).map_err(|source| RunError::InvalidName {
        path: file.to_path_buf(),
        source,
    })?;

    let mut handler = ConfigHandler::new(config, file).with_writer(settings.writer());
    match handler.load()? {
        LoadOutcome::Loaded(report) => Ok((handler, report)),
        LoadOutcome::NotFound => Err(RunError::NotFound {
            path: file.to_path_buf(),
        }),
    }
}

fn check(file: &Path, settings: &CodecSettings) -> Result<String, RunError> {
    let (_, report) = open(file, settings)?;
    if !report.is_clean() {
        return Err(RunError::Malformed {
            path: file.to_path_buf(),
            count: report.skipped.len(),
        });
    }
    Ok(format!(
        "{}: {} entries, no problems\n",
        file.display(),
        report.loaded
    ))
}

fn reformat(file: &Path, settings: &CodecSettings, write: bool) -> Result<String, RunError> {
    let (handler, report) = open(file, settings)?;
    if !write {
        return Ok(handler.render());
    }
    handler.save()?;
    Ok(format!(
        "Formatted {} ({} line(s) dropped)\n",
        file.display(),
        report.skipped.len()
    ))
}

fn dump(file: &Path, settings: &CodecSettings) -> Result<String, RunError> {
    let (handler, _) = open(file, settings)?;
    let view = ConfigView::new(handler.config());
    let mut json = serde_json::to_string_pretty(&view).map_err(RunError::Json)?;
    json.push('\n');
    Ok(json)
}

#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    name: &'a str,
    sections: Vec<SectionView<'a>>,
}

#[derive(Debug, Serialize)]
struct SectionView<'a> {
    path: String,
    used: bool,
    comment: &'a [String],
    entries: Vec<EntryView<'a>>,
    sections: Vec<SectionView<'a>>,
}

#[derive(Debug, Serialize)]
struct EntryView<'a> {
    key: &'a str,
    prefix: char,
    value: String,
    used: bool,
    comment: &'a [String],
    limitations: Vec<String>,
    sync: SyncKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    reload: Option<ReloadRequirement>,
}

impl<'a> ConfigView<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            name: config.name(),
            sections: config.sections().iter().map(SectionView::new).collect(),
        }
    }
}

impl<'a> SectionView<'a> {
    fn new(section: &'a ConfigSection) -> Self {
        Self {
            path: section.path(),
            used: section.is_used(),
            comment: section.comment(),
            entries: section.entries().iter().map(EntryView::new).collect(),
            sections: section.sections().iter().map(SectionView::new).collect(),
        }
    }
}

impl<'a> EntryView<'a> {
    fn new(entry: &'a ConfigEntry) -> Self {
        Self {
            key: entry.key(),
            prefix: entry.prefix(),
            value: entry.serialize_value(&TextLayout::single_line(), 0),
            used: entry.is_used(),
            comment: entry.comment(),
            limitations: entry.limitations(),
            sync: entry.sync(),
            reload: entry.reload(),
        }
    }
}
