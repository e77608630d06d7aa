//! The config file text format.
//!
//! ```text
//! # A user comment
//! [server.limits]
//! # \u{200B}Range: 1 ~ 64
//! I:players=20
//!
//! A:motd=<
//!     Welcome, Have fun
//! >
//! ```
//!
//! - `[a.b]` switches the current section, creating missing ones.
//! - `#` lines are comments for the next section or entry. Lines whose text
//!   starts with U+200B are generated by the writer and ignored on read.
//! - `X:key=value` is an entry with type prefix `X`. A value opening with `<`
//!   continues over the following lines up to the line ending in `>`, or up to
//!   the next line that starts another entry.

mod reader;
mod registry;
mod writer;


pub use reader::{ConfigReader, LoadReport, SkippedLine};
pub use registry::{EntryParser, ParserRegistry};
pub use writer::ConfigWriter;
