//! Behaviour shared by every value variant.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::TextLayout;

use super::ValueError;

/// Per-variant operations dispatched by [`super::EntryValue`].
///
/// Each variant owns its default, current and last-synced value, so change
/// tracking and equality stay variant specific (element-wise for arrays).
pub(crate) trait ValueSlot {
    /// Single-character type tag used in the text format.
    fn prefix(&self) -> char;

    /// Checks that the default satisfies the variant's own constraints.
    fn validate_default(&self) -> Result<(), String> {
        Ok(())
    }

    /// Human-readable constraint lines, written as generated comments.
    fn limitations(&self) -> Vec<String>;

    /// Renders the current value as it appears after `=`.
    ///
    /// `used` is the column at which the value starts.
    fn serialize_text(&self, layout: &TextLayout, used: usize) -> String;

    /// Parses `text` and applies it with the variant's `set` rules.
    ///
    /// On error the current value is left untouched.
    fn apply_text(&mut self, text: &str) -> Result<(), ValueError>;

    /// Returns `true` if `text` parses and passes `can_set`.
    fn accepts_text(&self, text: &str) -> bool;

    /// Current value equals the default.
    fn is_default(&self) -> bool;

    /// Current value differs from the last snapshot.
    fn has_changed(&self) -> bool;

    /// Copies the current value into the snapshot.
    fn snapshot(&mut self);

    /// Restores the default.
    fn reset(&mut self);

    /// Writes the current value.
    fn write(&self, buffer: &mut dyn WriteBuffer);

    /// Reads a value written by [`Self::write`] and applies it.
    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError>;
}
