//! Typed configuration entries.
//!
//! A [`ConfigEntry`] pairs a validated key with an [`EntryValue`], the sum type
//! over every supported variant. Each variant tracks its default, current and
//! last-synced value and knows its own text and binary forms; the entry adds
//! comments, suggestions, sync direction and the `used` flag on top.
//!
//! # Example
//!
//! ```
//! use structcfg::entry::{ConfigEntry, IntValue};
//! use structcfg::text::TextLayout;
//!
//! let mut entry = ConfigEntry::new("port", IntValue::new(8080).with_range(1, 65535))?;
//! entry.set_text("70000")?;
//!
//! assert_eq!(entry.as_int().map(IntValue::get), Some(65535));
//! assert_eq!(entry.serialize_value(&TextLayout::default(), 0), "65535");
//! # Ok::<(), structcfg::entry::EntryError>(())
//! ```

mod array;
mod enumeration;
mod error;
mod filter;
mod numeric;
mod parsed;
mod scalar;
mod slot;
mod suggestion;
mod unresolved;

#[cfg(test)]
mod entry_tests;

pub use array::ArrayValue;
pub use enumeration::{ConfigEnum, EnumValue};
pub use error::{EntryError, ValueError};
pub use filter::TextFilter;
pub use numeric::{DoubleValue, IntValue};
pub use parsed::{ParsedArray, ParsedValue, Serializer};
pub use scalar::{BoolValue, StringValue};
pub use suggestion::{Suggestion, SuggestionTag};
pub use unresolved::Unresolved;

pub(crate) use error::validate_key;

use serde::Serialize;

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::{TextLayout, ends_with_unescaped};

use slot::ValueSlot;

/// Direction in which an entry is synchronized, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncKind {
    /// Never synchronized.
    #[default]
    None,
    /// Authoritative on the server, mirrored to clients.
    ServerToClient,
    /// Chosen by the client, reported to the server.
    ClientToServer,
}

/// Advisory restart requirement attached to an entry. Never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadRequirement {
    /// The world must be reloaded for a change to apply.
    World,
    /// The whole game must be restarted for a change to apply.
    Game,
}

/// The value of an entry, one variant per supported type.
#[derive(Debug, Clone)]
pub enum EntryValue {
    /// `I`
    Int(IntValue),
    /// `D`
    Double(DoubleValue),
    /// `B`
    Bool(BoolValue),
    /// `S`
    Str(StringValue),
    /// `A`
    Array(ArrayValue),
    /// `E`
    Enum(EnumValue),
    /// `P`, single custom value
    Parsed(ParsedValue),
    /// `P`, list of custom values
    ParsedArray(ParsedArray),
    /// Read from a file, type not known yet
    Unresolved(Unresolved),
}

impl EntryValue {
    pub(crate) fn slot(&self) -> &dyn ValueSlot {
        match self {
            Self::Int(v) => v,
            Self::Double(v) => v,
            Self::Bool(v) => v,
            Self::Str(v) => v,
            Self::Array(v) => v,
            Self::Enum(v) => v,
            Self::Parsed(v) => v,
            Self::ParsedArray(v) => v,
            Self::Unresolved(v) => v,
        }
    }

    pub(crate) fn slot_mut(&mut self) -> &mut dyn ValueSlot {
        match self {
            Self::Int(v) => v,
            Self::Double(v) => v,
            Self::Bool(v) => v,
            Self::Str(v) => v,
            Self::Array(v) => v,
            Self::Enum(v) => v,
            Self::Parsed(v) => v,
            Self::ParsedArray(v) => v,
            Self::Unresolved(v) => v,
        }
    }

    /// Single-character type tag.
    #[must_use]
    pub fn prefix(&self) -> char {
        self.slot().prefix()
    }

    /// Returns `true` for file placeholders.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

macro_rules! impl_from_value {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for EntryValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_value!(
    Int(IntValue),
    Double(DoubleValue),
    Bool(BoolValue),
    Str(StringValue),
    Array(ArrayValue),
    Enum(EnumValue),
    Parsed(ParsedValue),
    ParsedArray(ParsedArray),
    Unresolved(Unresolved),
);

/// Strips one `< >` block around a value, if present.
fn unwrap_block(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix('<') {
        Some(inner) if ends_with_unescaped(trimmed, '>') && !inner.is_empty() => {
            inner[..inner.len() - 1].trim()
        }
        _ => trimmed,
    }
}

/// A keyed, typed configuration value.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    key: String,
    value: EntryValue,
    comment: Vec<String>,
    used: bool,
    suggestions: Vec<Suggestion>,
    forced: bool,
    sync: SyncKind,
    reload: Option<ReloadRequirement>,
}

macro_rules! typed_access {
    ($($get:ident, $get_mut:ident => $variant:ident($ty:ty);)*) => {
        $(
            #[doc = concat!("The value as [`", stringify!($ty), "`], if it is one.")]
            #[must_use]
            pub const fn $get(&self) -> Option<&$ty> {
                match &self.value {
                    EntryValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            #[doc = concat!("Mutable access to the value as [`", stringify!($ty), "`].")]
            pub const fn $get_mut(&mut self) -> Option<&mut $ty> {
                match &mut self.value {
                    EntryValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        )*
    };
}

impl ConfigEntry {
    /// Creates an entry registered by code (`used` is set).
    ///
    /// Enum entries get one suggestion per constant.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidKey`] for a malformed key and
    /// [`EntryError::InvalidDefault`] if the default breaks the value's own
    /// constraints.
    pub fn new(key: impl Into<String>, value: impl Into<EntryValue>) -> Result<Self, EntryError> {
        let key = key.into();
        validate_key(&key)?;

        let value = value.into();
        value
            .slot()
            .validate_default()
            .map_err(|reason| EntryError::InvalidDefault {
                key: key.clone(),
                reason,
            })?;

        let suggestions = match &value {
            EntryValue::Enum(e) => e.suggestions(),
            _ => Vec::new(),
        };

        Ok(Self {
            key,
            value,
            comment: Vec::new(),
            used: true,
            suggestions,
            forced: false,
            sync: SyncKind::None,
            reload: None,
        })
    }

    /// Creates an entry as read from a file (`used` is clear).
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn loaded(key: impl Into<String>, value: impl Into<EntryValue>) -> Result<Self, EntryError> {
        let mut entry = Self::new(key, value)?;
        entry.used = false;
        Ok(entry)
    }

    /// Replaces the comment; text containing line breaks becomes several lines.
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.set_comment(comment);
        self
    }

    /// Adds a suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidSuggestion`] if its value is not valid
    /// for this entry.
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Result<Self, EntryError> {
        self.add_suggestion(suggestion)?;
        Ok(self)
    }

    /// Restricts text-driven sets to suggested values.
    #[must_use]
    pub const fn force_suggestions(mut self) -> Self {
        self.forced = true;
        self
    }

    /// Sets the sync direction.
    #[must_use]
    pub const fn with_sync(mut self, sync: SyncKind) -> Self {
        self.sync = sync;
        self
    }

    /// Attaches an advisory restart requirement.
    #[must_use]
    pub const fn with_reload(mut self, reload: ReloadRequirement) -> Self {
        self.reload = Some(reload);
        self
    }

    /// Entry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The typed value.
    #[must_use]
    pub const fn value(&self) -> &EntryValue {
        &self.value
    }

    /// Mutable access to the typed value.
    pub const fn value_mut(&mut self) -> &mut EntryValue {
        &mut self.value
    }

    /// Type tag used in the text format.
    #[must_use]
    pub fn prefix(&self) -> char {
        self.value.prefix()
    }

    /// Comment lines.
    #[must_use]
    pub fn comment(&self) -> &[String] {
        &self.comment
    }

    /// Replaces the comment, one line per line of `comment`.
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = if comment.is_empty() {
            Vec::new()
        } else {
            comment.lines().map(str::to_string).collect()
        };
    }

    /// Replaces the comment lines.
    pub fn set_comment_lines(&mut self, lines: &[String]) {
        self.comment = lines
            .iter()
            .flat_map(|line| line.lines().map(str::to_string))
            .collect();
    }

    /// Whether code registered this entry during the current run.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.used
    }

    /// Sets the `used` flag.
    pub const fn set_used(&mut self, used: bool) {
        self.used = used;
    }

    /// Suggestions in insertion order.
    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Returns `true` if only suggested values may be set from text.
    #[must_use]
    pub const fn suggestions_forced(&self) -> bool {
        self.forced
    }

    /// Adds a suggestion after checking its value.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidSuggestion`] if the value does not parse
    /// or is rejected by the value's own checks.
    pub fn add_suggestion(&mut self, suggestion: Suggestion) -> Result<(), EntryError> {
        if !self.value.slot().accepts_text(unwrap_block(&suggestion.value)) {
            return Err(EntryError::InvalidSuggestion {
                key: self.key.clone(),
                name: suggestion.name,
                value: suggestion.value,
            });
        }
        self.suggestions.push(suggestion);
        Ok(())
    }

    /// Sync direction.
    #[must_use]
    pub const fn sync(&self) -> SyncKind {
        self.sync
    }

    /// Restart requirement, if any.
    #[must_use]
    pub const fn reload(&self) -> Option<ReloadRequirement> {
        self.reload
    }

    /// Constraint lines written as generated comments.
    #[must_use]
    pub fn limitations(&self) -> Vec<String> {
        let mut lines = self.value.slot().limitations();
        if self.forced && !matches!(self.value, EntryValue::Enum(_)) && !self.suggestions.is_empty()
        {
            let values: Vec<&str> = self.suggestions.iter().map(|s| s.value.as_str()).collect();
            lines.push(format!("Must be one of: [{}]", values.join(", ")));
        }
        lines
    }

    /// Current value equals the default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.value.slot().is_default()
    }

    /// Used and different from the last snapshot.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.used && self.value.slot().has_changed()
    }

    /// Records the current value as the change-tracking baseline.
    pub fn snapshot(&mut self) {
        self.value.slot_mut().snapshot();
    }

    /// Restores the default value.
    pub fn reset(&mut self) {
        self.value.slot_mut().reset();
    }

    /// Renders the value as it appears after `=`.
    ///
    /// `used` is the column at which the value starts.
    #[must_use]
    pub fn serialize_value(&self, layout: &TextLayout, used: usize) -> String {
        self.value.slot().serialize_text(layout, used)
    }

    /// Returns `true` if [`Self::set_text`] would accept `text`.
    #[must_use]
    pub fn can_set_text(&self, text: &str) -> bool {
        if self.value.is_unresolved() {
            return true;
        }
        let text = unwrap_block(text);
        self.value.slot().accepts_text(text) && (!self.forced || self.is_suggested(text))
    }

    /// Parses `text` (with or without a `< >` block) and applies it.
    ///
    /// Numeric values are clamped into their range. On error the current
    /// value is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Value`] if the text does not parse, is rejected by
    /// a filter, or is not suggested while suggestions are forced.
    pub fn set_text(&mut self, text: &str) -> Result<(), EntryError> {
        if self.value.is_unresolved() {
            return self.apply(text.trim());
        }
        let text = unwrap_block(text);
        if self.forced && !self.is_suggested(text) {
            return Err(EntryError::Value {
                key: self.key.clone(),
                source: ValueError::new(text, "not one of the suggested values"),
            });
        }
        self.apply(text)
    }

    fn apply(&mut self, text: &str) -> Result<(), EntryError> {
        self.value
            .slot_mut()
            .apply_text(text)
            .map_err(|source| EntryError::Value {
                key: self.key.clone(),
                source,
            })
    }

    /// Compares by canonical single-line form so `1.0` matches `1`.
    fn is_suggested(&self, text: &str) -> bool {
        let Some(candidate) = self.normalize(text) else {
            return false;
        };
        self.suggestions
            .iter()
            .any(|s| self.normalize(unwrap_block(&s.value)).as_ref() == Some(&candidate))
    }

    fn normalize(&self, text: &str) -> Option<String> {
        let mut probe = self.value.clone();
        probe.slot_mut().apply_text(text).ok()?;
        Some(probe.slot().serialize_text(&TextLayout::single_line(), 0))
    }

    /// Writes the value for synchronization.
    pub fn write_value(&self, buffer: &mut dyn WriteBuffer) {
        self.value.slot().write(buffer);
    }

    /// Reads a value written by [`Self::write_value`].
    ///
    /// # Errors
    ///
    /// Returns a [`BufferError`] if the buffer is exhausted or malformed.
    pub fn read_value(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        self.value.slot_mut().read(buffer)
    }

    typed_access! {
        as_int, as_int_mut => Int(IntValue);
        as_double, as_double_mut => Double(DoubleValue);
        as_bool, as_bool_mut => Bool(BoolValue);
        as_str, as_str_mut => Str(StringValue);
        as_array, as_array_mut => Array(ArrayValue);
        as_enum, as_enum_mut => Enum(EnumValue);
        as_parsed, as_parsed_mut => Parsed(ParsedValue);
        as_parsed_array, as_parsed_array_mut => ParsedArray(ParsedArray);
        as_unresolved, as_unresolved_mut => Unresolved(Unresolved);
    }
}
