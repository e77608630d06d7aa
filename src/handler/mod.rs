//! Loading and saving one config file.
//!
//! A [`ConfigHandler`] ties a [`Config`](crate::tree::Config) to its file,
//! runs loaded listeners after every successful load, and announces itself to
//! a [`ConfigOwner`] that schedules reloads and synchronization.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::ConfigHandler;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::LoadReport;

/// Result of loading a config file.
///
/// A missing file is not an error: the first save creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; malformed lines are listed in the report.
    Loaded(LoadReport),

    /// No file exists yet.
    NotFound,
}

impl LoadOutcome {
    /// Returns `true` if a file was read.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The report of a loaded file.
    #[must_use]
    pub const fn report(&self) -> Option<&LoadReport> {
        match self {
            Self::Loaded(report) => Some(report),
            Self::NotFound => None,
        }
    }
}

/// I/O failures while loading or saving.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The config directory could not be created.
    #[error("Failed to create config directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The config file exists but could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The config file could not be written.
    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// The application side of a config's lifecycle.
///
/// [`ConfigHandler::init`] calls these in order: `on_config_created` (register
/// sections and entries here), then, after the first load and save,
/// `register_config_handler` and `register_sync_handler`.
pub trait ConfigOwner {
    /// The handler was created; populate its config.
    fn on_config_created(&mut self, handler: &mut ConfigHandler);

    /// The file is ready to be watched for reloads.
    fn register_config_handler(&mut self, _handler: &ConfigHandler) {}

    /// The config's synced entries are ready to be synchronized.
    fn register_sync_handler(&mut self, _handler: &ConfigHandler) {}
}
