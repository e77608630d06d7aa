//! Placeholders for file entries whose real type is not known yet.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::TextLayout;

use super::ValueError;
use super::slot::ValueSlot;

/// Raw prefix and value text of an entry read from a file before any code
/// registered it.
///
/// The text is kept exactly as read (including a `< >` block) and written back
/// unchanged, so a file nobody reads round-trips without loss. Registering the
/// real entry re-parses [`Self::raw`] into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    prefix: char,
    raw: String,
    last: String,
}

impl Unresolved {
    /// Creates a placeholder.
    #[must_use]
    pub fn new(prefix: char, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            prefix,
            last: raw.clone(),
            raw,
        }
    }

    /// Text as it appeared after `=`.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl ValueSlot for Unresolved {
    fn prefix(&self) -> char {
        self.prefix
    }

    fn limitations(&self) -> Vec<String> {
        Vec::new()
    }

    fn serialize_text(&self, _layout: &TextLayout, _used: usize) -> String {
        self.raw.clone()
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        text.clone_into(&mut self.raw);
        Ok(())
    }

    fn accepts_text(&self, _text: &str) -> bool {
        true
    }

    fn is_default(&self) -> bool {
        false
    }

    fn has_changed(&self) -> bool {
        self.raw != self.last
    }

    fn snapshot(&mut self) {
        self.last.clone_from(&self.raw);
    }

    fn reset(&mut self) {}

    fn write(&self, buffer: &mut dyn WriteBuffer) {
        buffer.write_string(&self.raw);
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        self.raw = buffer.read_string()?;
        Ok(())
    }
}
