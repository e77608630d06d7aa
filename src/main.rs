//! structcfg: typed config file inspector
//!
//! Entry point for the structcfg command line tool.

use std::process::ExitCode;

use structcfg::settings::{Cli, CodecSettings, Command};

mod app;
mod run;

use app::{exit_code, exit_code_for, print_settings_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand before any settings file is required
    if let Command::Init { output } = &cli.command {
        return finish(run::init(output));
    }

    let settings = match CodecSettings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Settings error: {e}");
            print_settings_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(cli.verbose);
    tracing::info!("{settings}");

    finish(run::execute(&cli.command, &settings))
}

/// Prints a command's output or error and picks the exit code.
fn finish(result: Result<String, run::RunError>) -> ExitCode {
    match result {
        Ok(output) => {
            print!("{output}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}
