//! Default values for codec settings.

use crate::text::{MultilinePolicy, TextLayout};

/// Default multiline policy.
pub const MULTILINE: MultilinePolicy = MultilinePolicy::MultilineIfTooLong;

/// Default width budget for wrapped values.
pub const LINE_WIDTH: usize = TextLayout::DEFAULT_LINE_WIDTH;

/// Default spaces per nesting level.
pub const INDENT: usize = TextLayout::DEFAULT_INDENT;

/// Largest accepted indent.
pub const MAX_INDENT: usize = 16;

/// Whether entries no code registered are written back.
pub const KEEP_UNUSED: bool = true;

/// Directory config files live under.
pub const BASE_DIR: &str = ".";

/// Extension of config files.
pub const FILE_EXTENSION: &str = "cfg";

/// Default settings file name for the `init` command.
pub const SETTINGS_FILE: &str = "structcfg.toml";
