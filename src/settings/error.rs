//! Error types for settings loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    FileRead {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML settings.
    #[error("Failed to parse TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the settings file (for the init command).
    #[error("Failed to write settings file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Line width of zero.
    #[error("Invalid line width {value}: must be greater than 0")]
    InvalidLineWidth {
        /// The rejected width
        value: usize,
    },

    /// Indent above the limit.
    #[error("Invalid indent {value}: must be at most {max}")]
    InvalidIndent {
        /// The rejected indent
        value: usize,
        /// Largest accepted indent
        max: usize,
    },

    /// Subfolder that would escape the base directory.
    #[error("Invalid subfolder '{value}': {reason}")]
    InvalidSubfolder {
        /// The rejected subfolder
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}
