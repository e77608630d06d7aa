//! Exit codes, tracing setup and error hints for the entry point.

use structcfg::settings::SettingsError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad settings or bad config content (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// I/O failure (exit code 2).
    ///
    /// `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints hints for common settings errors.
pub fn print_settings_hint(error: &SettingsError) {
    match error {
        SettingsError::FileRead { .. } => {
            eprintln!("\nRun 'structcfg init' to generate a settings template.");
        }
        SettingsError::TomlParse(_) => {
            eprintln!(
                "\nKnown keys: [layout] multiline, line_width, indent, keep_unused; \
                 [storage] base_dir, subfolder."
            );
        }
        _ => {}
    }
}

/// Maps a command failure to its exit code.
pub fn exit_code_for(error: &RunError) -> std::process::ExitCode {
    if error.is_content_error() {
        exit_code::CONFIG_ERROR
    } else {
        exit_code::runtime_error()
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
