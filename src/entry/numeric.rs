//! Integer and floating-point entries with optional ranges.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::TextLayout;

use super::ValueError;
use super::slot::ValueSlot;

/// Renders a range description, omitting open ends.
fn describe_range(min: Option<String>, max: Option<String>) -> Vec<String> {
    match (min, max) {
        (Some(min), Some(max)) => vec![format!("Range: {min} ~ {max}")],
        (Some(min), None) => vec![format!("Range: >= {min}")],
        (None, Some(max)) => vec![format!("Range: <= {max}")],
        (None, None) => Vec::new(),
    }
}

/// Integer entry value.
///
/// Unbounded by default; [`Self::with_range`] narrows it. `set` clamps into the
/// range while `can_set` rejects anything outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntValue {
    default: i64,
    value: i64,
    last: i64,
    min: i64,
    max: i64,
}

impl IntValue {
    /// Creates an unbounded integer value.
    #[must_use]
    pub const fn new(default: i64) -> Self {
        Self {
            default,
            value: default,
            last: default,
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    /// Restricts the value to `min..=max` (bounds are swapped if reversed).
    #[must_use]
    pub const fn with_range(mut self, min: i64, max: i64) -> Self {
        if min <= max {
            self.min = min;
            self.max = max;
        } else {
            self.min = max;
            self.max = min;
        }
        self
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.value
    }

    /// Default value.
    #[must_use]
    pub const fn default_value(&self) -> i64 {
        self.default
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Returns `true` if `value` lies within the range.
    #[must_use]
    pub const fn can_set(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Sets the value, clamping it into the range.
    pub fn set(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Parses an integer from text.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if `text` is not an integer.
    pub fn parse(text: &str) -> Result<i64, ValueError> {
        text.trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ValueError::new(text, e.to_string()))
    }
}

impl ValueSlot for IntValue {
    fn prefix(&self) -> char {
        'I'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self.can_set(self.default) {
            Ok(())
        } else {
            Err(format!(
                "{} is outside {} ~ {}",
                self.default, self.min, self.max
            ))
        }
    }

    fn limitations(&self) -> Vec<String> {
        describe_range(
            (self.min != i64::MIN).then(|| self.min.to_string()),
            (self.max != i64::MAX).then(|| self.max.to_string()),
        )
    }

    fn serialize_text(&self, _layout: &TextLayout, _used: usize) -> String {
        self.value.to_string()
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.set(Self::parse(text)?);
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        Self::parse(text).is_ok_and(|value| self.can_set(value))
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
        buffer.write_long(self.value);
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        self.set(buffer.read_long()?);
        Ok(())
    }
}

/// Floating-point entry value.
///
/// Same range semantics as [`IntValue`]; `NaN` is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleValue {
    default: f64,
    value: f64,
    last: f64,
    min: f64,
    max: f64,
}

impl DoubleValue {
    /// Creates an unbounded value.
    #[must_use]
    pub const fn new(default: f64) -> Self {
        Self {
            default,
            value: default,
            last: default,
            min: f64::MIN,
            max: f64::MAX,
        }
    }

    /// Restricts the value to `min..=max` (bounds are swapped if reversed).
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min.min(max);
        self.max = max.max(min);
        self
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.value
    }

    /// Default value.
    #[must_use]
    pub const fn default_value(&self) -> f64 {
        self.default
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` if `value` is a number within the range.
    #[must_use]
    pub fn can_set(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Sets the value, clamping it into the range. `NaN` is ignored.
    pub fn set(&mut self, value: f64) {
        if !value.is_nan() {
            self.value = value.clamp(self.min, self.max);
        }
    }

    /// Parses a number from text.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if `text` is not a number.
    pub fn parse(text: &str) -> Result<f64, ValueError> {
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| ValueError::new(text, e.to_string()))?;
        if value.is_nan() {
            return Err(ValueError::new(text, "NaN is not a valid value"));
        }
        Ok(value)
    }
}

impl ValueSlot for DoubleValue {
    fn prefix(&self) -> char {
        'D'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self.can_set(self.default) {
            Ok(())
        } else {
            Err(format!(
                "{:?} is outside {:?} ~ {:?}",
                self.default, self.min, self.max
            ))
        }
    }

    fn limitations(&self) -> Vec<String> {
        #[allow(clippy::float_cmp)] // comparing against the exact sentinel bounds
        let (has_min, has_max) = (self.min != f64::MIN, self.max != f64::MAX);
        describe_range(
            has_min.then(|| format!("{:?}", self.min)),
            has_max.then(|| format!("{:?}", self.max)),
        )
    }

    fn serialize_text(&self, _layout: &TextLayout, _used: usize) -> String {
        format!("{:?}", self.value)
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.set(Self::parse(text)?);
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        Self::parse(text).is_ok_and(|value| self.can_set(value))
    }

    #[allow(clippy::float_cmp)]
    fn is_default(&self) -> bool {
        self.value == self.default
    }

    #[allow(clippy::float_cmp)]
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
        buffer.write_double(self.value);
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        self.set(buffer.read_double()?);
        Ok(())
    }
}
