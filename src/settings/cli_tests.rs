//! Tests for CLI argument parsing.

use std::path::Path;

use crate::text::MultilinePolicy;

use super::cli::{Cli, Command, MultilineArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_check_command() {
        let cli = Cli::parse_from_iter(["structcfg", "check", "game.cfg"]);

        assert!(matches!(cli.command, Command::Check { ref file } if file == Path::new("game.cfg")));
        assert!(!cli.verbose);
        assert!(cli.settings.is_none());
    }

    #[test]
    fn parse_fmt_with_write() {
        let cli = Cli::parse_from_iter(["structcfg", "fmt", "--write", "game.cfg"]);
        assert!(matches!(cli.command, Command::Fmt { write: true, .. }));

        let cli = Cli::parse_from_iter(["structcfg", "fmt", "game.cfg"]);
        assert!(matches!(cli.command, Command::Fmt { write: false, .. }));
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::parse_from_iter([
            "structcfg",
            "dump",
            "game.cfg",
            "--multiline",
            "always",
            "--line-width",
            "100",
            "--indent",
            "2",
            "--settings",
            "structcfg.toml",
            "-v",
        ]);

        assert_eq!(cli.multiline, Some(MultilineArg::Always));
        assert_eq!(cli.line_width, Some(100));
        assert_eq!(cli.indent, Some(2));
        assert_eq!(cli.settings.as_deref(), Some(Path::new("structcfg.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_all_multiline_modes() {
        for (name, arg) in [
            ("disabled", MultilineArg::Disabled),
            ("always", MultilineArg::Always),
            ("if-too-long", MultilineArg::IfTooLong),
        ] {
            let cli = Cli::parse_from_iter(["structcfg", "check", "a.cfg", "--multiline", name]);
            assert_eq!(cli.multiline, Some(arg));
        }
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(<Cli as clap::Parser>::try_parse_from(["structcfg"]).is_err());
    }
}

mod init {
    use super::*;

    #[test]
    fn init_uses_default_output() {
        let cli = Cli::parse_from_iter(["structcfg", "init"]);

        assert!(cli.is_init());
        assert!(matches!(cli.command, Command::Init { ref output } if output == Path::new("structcfg.toml")));
    }

    #[test]
    fn init_accepts_output_path() {
        let cli = Cli::parse_from_iter(["structcfg", "init", "-o", "custom.toml"]);
        assert!(matches!(cli.command, Command::Init { ref output } if output == Path::new("custom.toml")));
    }
}

#[test]
fn multiline_arg_maps_to_policy() {
    assert_eq!(MultilinePolicy::from(MultilineArg::Disabled), MultilinePolicy::Disabled);
    assert_eq!(MultilinePolicy::from(MultilineArg::Always), MultilinePolicy::AlwaysMultiline);
    assert_eq!(
        MultilinePolicy::from(MultilineArg::IfTooLong),
        MultilinePolicy::MultilineIfTooLong
    );
}
