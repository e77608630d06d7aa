//! Settings for the codec itself.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML settings file parsing ([`SettingsFile`])
//! - Resolved settings ([`CodecSettings`])
//! - Settings file generation ([`write_default_settings`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML settings file**
//! 3. **Built-in defaults**
//!
//! `keep_unused`, `base_dir` and `subfolder` are TOML-only: the CLI works on
//! explicit file paths and never registers entries.

mod cli;
pub mod defaults;
mod error;
mod file;
mod resolved;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod file_tests;
#[cfg(test)]
mod resolved_tests;

pub use cli::{Cli, Command, MultilineArg};
pub use error::SettingsError;
pub use file::{LayoutSection, SettingsFile, StorageSection, default_settings_template};
pub use resolved::{CodecSettings, write_default_settings};
