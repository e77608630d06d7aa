//! Low-level text handling shared by entries, schemas and the file codec.
//!
//! This module provides:
//! - Escaping of leaf text so that it survives the delimiter grammar ([`escape`], [`unescape`])
//! - A bracket-aware splitter for `,`-separated fragments ([`split_elements`])
//! - The multiline policy and line layout rules ([`MultilinePolicy`], [`TextLayout`])

mod escape;
mod layout;
mod split;


pub use escape::{
    GENERATED_MARKER, SPECIALS, VALUE_SPECIALS, escape, escape_element, ends_with_unescaped,
    unescape,
};
pub use layout::{MultilinePolicy, TextLayout};
pub use split::{SplitError, find_top_level, split_elements, strip_brackets};
