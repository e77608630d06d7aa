//! Boolean and string entries.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::{TextLayout, VALUE_SPECIALS, escape, unescape};

use super::ValueError;
use super::filter::TextFilter;
use super::slot::ValueSlot;

/// Boolean entry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolValue {
    default: bool,
    value: bool,
    last: bool,
}

impl BoolValue {
    /// Creates a boolean value.
    #[must_use]
    pub const fn new(default: bool) -> Self {
        Self {
            default,
            value: default,
            last: default,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> bool {
        self.value
    }

    /// Default value.
    #[must_use]
    pub const fn default_value(&self) -> bool {
        self.default
    }

    /// Sets the value.
    pub const fn set(&mut self, value: bool) {
        self.value = value;
    }

    /// Parses `true`/`false`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] for anything else.
    pub fn parse(text: &str) -> Result<bool, ValueError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ValueError::new(text, "expected 'true' or 'false'"))
        }
    }
}

impl ValueSlot for BoolValue {
    fn prefix(&self) -> char {
        'B'
    }

    fn limitations(&self) -> Vec<String> {
        Vec::new()
    }

    fn serialize_text(&self, _layout: &TextLayout, _used: usize) -> String {
        self.value.to_string()
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.set(Self::parse(text)?);
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    fn is_default(&self) -> bool {
        self.value == self.default
    }

    fn has_changed(&self) -> bool {
        self.value != self.last
    }

    fn snapshot(&mut self) {
        self.last = self.value;
    }

    fn reset(&mut self) {
        self.value = self.default;
    }

    fn write(&self, buffer: &mut dyn WriteBuffer) {
        buffer.write_bool(self.value);
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        self.set(buffer.read_bool()?);
        Ok(())
    }
}

/// String entry value with an optional filter.
#[derive(Debug, Clone)]
pub struct StringValue {
    default: String,
    value: String,
    last: String,
    filter: Option<TextFilter>,
}

impl StringValue {
    /// Creates an unrestricted string value.
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            value: default.clone(),
            last: default.clone(),
            default,
            filter: None,
        }
    }

    /// Restricts accepted values.
    #[must_use]
    pub fn with_filter(mut self, filter: TextFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Default value.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The configured filter, if any.
    #[must_use]
    pub const fn filter(&self) -> Option<&TextFilter> {
        self.filter.as_ref()
    }

    /// Returns `true` if the filter (if any) accepts `value`.
    #[must_use]
    pub fn can_set(&self, value: &str) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.accepts(value))
    }

    /// Sets the value; rejected values leave the current one in place.
    pub fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.can_set(&value) {
            self.value = value;
        }
    }
}

impl ValueSlot for StringValue {
    fn prefix(&self) -> char {
        'S'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self.can_set(&self.default) {
            Ok(())
        } else {
            Err(format!("'{}' is rejected by its filter", self.default))
        }
    }

    fn limitations(&self) -> Vec<String> {
        self.filter.iter().map(TextFilter::describe).collect()
    }

    fn serialize_text(&self, _layout: &TextLayout, _used: usize) -> String {
        escape(&self.value, VALUE_SPECIALS)
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        let value = unescape(text);
        if !self.can_set(&value) {
            return Err(ValueError::new(text, "rejected by filter"));
        }
        self.value = value;
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        self.can_set(&unescape(text))
    }

    fn is_default(&self) -> bool {
        self.value == self.default
    }

    fn has_changed(&self) -> bool {
        self.value != self.last
    }

    fn snapshot(&mut self) {
        self.last.clone_from(&self.value);
    }

    fn reset(&mut self) {
        self.value.clone_from(&self.default);
    }

    fn write(&self, buffer: &mut dyn WriteBuffer) {
        buffer.write_string(&self.value);
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        self.set(buffer.read_string()?);
        Ok(())
    }
}
