//! structcfg: typed configuration entries
//!
//! A library for declaring typed config entries in a tree of sections,
//! storing them in a human-editable text format with regenerated
//! comments, and describing structured values with compound and list
//! schemas. Entries can also be written to a compact binary buffer for
//! synchronization.

pub mod buffer;
pub mod codec;
pub mod entry;
pub mod handler;
pub mod schema;
pub mod settings;
pub mod text;
pub mod tree;
