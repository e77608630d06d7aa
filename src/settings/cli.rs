//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::text::MultilinePolicy;

use super::defaults;

/// structcfg: inspect and normalise typed config files
///
/// Reads `.cfg` files with `[section]` headers and `X:key=value` entries,
/// reports malformed lines, and rewrites files in canonical form.
#[derive(Debug, Parser)]
#[command(name = "structcfg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML settings file
    #[arg(long, short, global = true)]
    pub settings: Option<PathBuf>,

    /// How array and structured values wrap across lines
    #[arg(long, value_enum, global = true)]
    pub multiline: Option<MultilineArg>,

    /// Width budget for wrapped values
    #[arg(long = "line-width", global = true)]
    pub line_width: Option<usize>,

    /// Spaces per nesting level in wrapped values
    #[arg(long, global = true)]
    pub indent: Option<usize>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for structcfg
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report malformed lines; exits with an error if there are any
    Check {
        /// Config file to check
        file: PathBuf,
    },

    /// Rewrite a config file in canonical form
    Fmt {
        /// Config file to format
        file: PathBuf,

        /// Rewrite the file in place instead of printing it
        #[arg(long, short)]
        write: bool,
    },

    /// Print the section tree of a config file as JSON
    Dump {
        /// Config file to dump
        file: PathBuf,
    },

    /// Generate a default settings file
    Init {
        /// Output path for the settings file
        #[arg(long, short, default_value = defaults::SETTINGS_FILE)]
        output: PathBuf,
    },
}

/// Multiline policy argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MultilineArg {
    /// Always write values on a single line
    #[value(name = "disabled")]
    Disabled,
    /// One element per line
    #[value(name = "always")]
    Always,
    /// Wrap only values that do not fit the line width
    #[value(name = "if-too-long")]
    IfTooLong,
}

impl From<MultilineArg> for MultilinePolicy {
    fn from(arg: MultilineArg) -> Self {
        match arg {
            MultilineArg::Disabled => Self::Disabled,
            MultilineArg::Always => Self::AlwaysMultiline,
            MultilineArg::IfTooLong => Self::MultilineIfTooLong,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
