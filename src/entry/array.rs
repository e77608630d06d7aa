//! String array entries.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::{SPECIALS, TextLayout, escape_element, split_elements, unescape};

use super::ValueError;
use super::filter::TextFilter;
use super::slot::ValueSlot;

/// Renders escaped elements as a single line or a `< >` block.
///
/// Shared by every array-shaped entry so they all wrap the same way.
pub(crate) fn render_elements(elements: &[String], layout: &TextLayout, used: usize) -> String {
    if layout.should_wrap_unbracketed(elements, used) {
        format!("<\n{}\n>", layout.body(elements, 0))
    } else {
        elements.join(", ")
    }
}

/// Splits an array value into unescaped elements.
pub(crate) fn parse_elements(text: &str) -> Result<Vec<String>, ValueError> {
    split_elements(text)
        .map(|parts| parts.into_iter().map(unescape).collect())
        .map_err(|e| ValueError::new(text, e.to_string()))
}

/// List-of-strings entry value with an optional per-element filter.
#[derive(Debug, Clone)]
pub struct ArrayValue {
    default: Vec<String>,
    value: Vec<String>,
    last: Vec<String>,
    filter: Option<TextFilter>,
}

impl ArrayValue {
    /// Creates an unrestricted array value.
    #[must_use]
    pub fn new<I, S>(default: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default: Vec<String> = default.into_iter().map(Into::into).collect();
        Self {
            value: default.clone(),
            last: default.clone(),
            default,
            filter: None,
        }
    }

    /// Restricts every element.
    #[must_use]
    pub fn with_filter(mut self, filter: TextFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Current elements.
    #[must_use]
    pub fn get(&self) -> &[String] {
        &self.value
    }

    /// Default elements.
    #[must_use]
    pub fn default_value(&self) -> &[String] {
        &self.default
    }

    /// Returns `true` if every element passes the filter (if any).
    #[must_use]
    pub fn can_set(&self, values: &[String]) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|filter| values.iter().all(|value| filter.accepts(value)))
    }

    /// Replaces all elements; rejected arrays leave the current value in place.
    pub fn set(&mut self, values: Vec<String>) {
        if self.can_set(&values) {
            self.value = values;
        }
    }
}

impl ValueSlot for ArrayValue {
    fn prefix(&self) -> char {
        'A'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self.can_set(&self.default) {
            Ok(())
        } else {
            Err("an element is rejected by the filter".to_string())
        }
    }

    fn limitations(&self) -> Vec<String> {
        self.filter
            .iter()
            .map(|filter| format!("Each element: {}", filter.describe()))
            .collect()
    }

    fn serialize_text(&self, layout: &TextLayout, used: usize) -> String {
        let elements: Vec<String> = self
            .value
            .iter()
            .map(|value| escape_element(value, SPECIALS))
            .collect();
        render_elements(&elements, layout, used)
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        let values = parse_elements(text)?;
        if !self.can_set(&values) {
            return Err(ValueError::new(text, "an element is rejected by the filter"));
        }
        self.value = values;
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        parse_elements(text).is_ok_and(|values| self.can_set(&values))
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
        buffer.write_var_int(i32::try_from(self.value.len()).unwrap_or(i32::MAX));
        for value in &self.value {
            buffer.write_string(value);
        }
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        let length = buffer.read_var_int()?;
        let length = usize::try_from(length).map_err(|_| BufferError::NegativeLength(length))?;
        let mut values = Vec::with_capacity(length.min(1024));
        for _ in 0..length {
            values.push(buffer.read_string()?);
        }
        self.set(values);
        Ok(())
    }
}
