//! Entries whose text and binary forms come from an injected [`Serializer`].
//!
//! The serializer is generic over its value type, while entries must live in a
//! single tree. [`ParsedValue`] and [`ParsedArray`] therefore hold the value as
//! `Box<dyn Any>` and talk to the serializer through an object-safe adapter that
//! downcasts on every call.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::{SPECIALS, TextLayout, escape_element};

use super::ValueError;
use super::array::{parse_elements, render_elements};
use super::slot::ValueSlot;

/// Conversion contract for custom entry types.
pub trait Serializer: Send + Sync + 'static {
    /// The value type handled by this serializer.
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// A representative value, shown in generated comments.
    fn example(&self) -> Self::Value;

    /// Short description of the text format.
    fn format(&self) -> String;

    /// Extra validation beyond successful parsing.
    fn is_valid(&self, _value: &Self::Value) -> bool {
        true
    }

    /// Renders `value` on a single line.
    fn serialize(&self, value: &Self::Value) -> String;

    /// Renders `value` honouring the multiline layout.
    ///
    /// Defaults to [`Self::serialize`]. `used` is the column where the value starts.
    fn serialize_with(&self, value: &Self::Value, _layout: &TextLayout, _used: usize) -> String {
        self.serialize(value)
    }

    /// Parses text produced by [`Self::serialize`] or [`Self::serialize_with`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if `text` is not in the expected format.
    fn deserialize(&self, text: &str) -> Result<Self::Value, ValueError>;

    /// Writes `value` to the sync buffer.
    fn write(&self, value: &Self::Value, buffer: &mut dyn WriteBuffer);

    /// Reads a value written by [`Self::write`].
    ///
    /// # Errors
    ///
    /// Returns a [`BufferError`] if the buffer does not hold a valid value.
    fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<Self::Value, BufferError>;
}

type AnyValue = Box<dyn Any + Send + Sync>;

/// Object-safe view of a [`Serializer`].
trait DynSerializer: Send + Sync {
    fn example(&self) -> AnyValue;
    fn format(&self) -> String;
    fn is_valid(&self, value: &dyn Any) -> bool;
    fn serialize(&self, value: &dyn Any, layout: &TextLayout, used: usize) -> String;
    fn deserialize(&self, text: &str) -> Result<AnyValue, ValueError>;
    fn write(&self, value: &dyn Any, buffer: &mut dyn WriteBuffer);
    fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<AnyValue, BufferError>;
    fn clone_value(&self, value: &dyn Any) -> AnyValue;
    fn equals(&self, left: &dyn Any, right: &dyn Any) -> bool;
    fn debug(&self, value: &dyn Any) -> String;
}

struct Erased<S>(S);

impl<S: Serializer> Erased<S> {
    fn cast(value: &dyn Any) -> Option<&S::Value> {
        value.downcast_ref::<S::Value>()
    }
}

impl<S: Serializer> DynSerializer for Erased<S> {
    fn example(&self) -> AnyValue {
        Box::new(self.0.example())
    }

    fn format(&self) -> String {
        self.0.format()
    }

    fn is_valid(&self, value: &dyn Any) -> bool {
        Self::cast(value).is_some_and(|value| self.0.is_valid(value))
    }

    fn serialize(&self, value: &dyn Any, layout: &TextLayout, used: usize) -> String {
        Self::cast(value).map_or_else(String::new, |value| {
            self.0.serialize_with(value, layout, used)
        })
    }

    fn deserialize(&self, text: &str) -> Result<AnyValue, ValueError> {
        let value = self.0.deserialize(text)?;
        if !self.0.is_valid(&value) {
            return Err(ValueError::new(text, "rejected by the serializer's validity check"));
        }
        Ok(Box::new(value))
    }

    fn write(&self, value: &dyn Any, buffer: &mut dyn WriteBuffer) {
        match Self::cast(value) {
            Some(value) => self.0.write(value, buffer),
            None => self.0.write(&self.0.example(), buffer),
        }
    }

    fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<AnyValue, BufferError> {
        Ok(Box::new(self.0.read(buffer)?))
    }

    fn clone_value(&self, value: &dyn Any) -> AnyValue {
        Self::cast(value).map_or_else(|| self.example(), |value| Box::new(value.clone()))
    }

    fn equals(&self, left: &dyn Any, right: &dyn Any) -> bool {
        matches!((Self::cast(left), Self::cast(right)), (Some(l), Some(r)) if l == r)
    }

    fn debug(&self, value: &dyn Any) -> String {
        Self::cast(value).map_or_else(|| "<mismatched>".to_string(), |v| format!("{v:?}"))
    }
}

/// Generated comment lines shared by both parsed variants.
fn describe(serializer: &dyn DynSerializer) -> Vec<String> {
    let example = serializer.example();
    vec![
        format!("Format: {}", serializer.format()),
        format!(
            "Example: {}",
            serializer.serialize(&*example, &TextLayout::single_line(), 0)
        ),
    ]
}

/// Single custom value.
pub struct ParsedValue {
    serializer: Arc<dyn DynSerializer>,
    default: AnyValue,
    value: AnyValue,
    last: AnyValue,
}

impl ParsedValue {
    /// Creates a value driven by `serializer`.
    ///
    /// The default is checked against [`Serializer::is_valid`] when the
    /// entry is constructed.
    #[must_use]
    pub fn new<S: Serializer>(serializer: S, default: S::Value) -> Self {
        Self {
            serializer: Arc::new(Erased(serializer)),
            value: Box::new(default.clone()),
            last: Box::new(default.clone()),
            default: Box::new(default),
        }
    }

    /// Current value, if it has type `T`.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Default value, if it has type `T`.
    #[must_use]
    pub fn default_value<T: Any>(&self) -> Option<&T> {
        (*self.default).downcast_ref::<T>()
    }

    /// Description of the text format.
    #[must_use]
    pub fn format(&self) -> String {
        self.serializer.format()
    }

    /// Returns `true` if `value` has the serializer's type and passes its check.
    #[must_use]
    pub fn can_set<T: Any>(&self, value: &T) -> bool {
        self.serializer.is_valid(value)
    }

    /// Sets the value; values of another type or failing validation are ignored.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        if self.can_set(&value) {
            self.value = Box::new(value);
        }
    }

    /// Renders the current value on a single line.
    #[must_use]
    pub fn text(&self) -> String {
        self.serializer
            .serialize(&*self.value, &TextLayout::single_line(), 0)
    }
}

impl Clone for ParsedValue {
    fn clone(&self) -> Self {
        Self {
            serializer: Arc::clone(&self.serializer),
            default: self.serializer.clone_value(&*self.default),
            value: self.serializer.clone_value(&*self.value),
            last: self.serializer.clone_value(&*self.last),
        }
    }
}

impl fmt::Debug for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedValue")
            .field("format", &self.serializer.format())
            .field("value", &self.serializer.debug(&*self.value))
            .finish_non_exhaustive()
    }
}

impl ValueSlot for ParsedValue {
    fn prefix(&self) -> char {
        'P'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self.serializer.is_valid(&*self.default) {
            Ok(())
        } else {
            Err("default is rejected by the serializer".to_string())
        }
    }

    fn limitations(&self) -> Vec<String> {
        describe(self.serializer.as_ref())
    }

    fn serialize_text(&self, layout: &TextLayout, used: usize) -> String {
        let text = self.serializer.serialize(&*self.value, layout, used);
        // A leading '<' would be read back as a continuation opener, so such
        // values are bracketed like multiline ones.
        if text.contains('\n') || text.starts_with('<') {
            format!("<{text}>")
        } else {
            text
        }
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.value = self.serializer.deserialize(text)?;
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        self.serializer.deserialize(text).is_ok()
    }

    fn is_default(&self) -> bool {
        self.serializer.equals(&*self.value, &*self.default)
    }

    fn has_changed(&self) -> bool {
        !self.serializer.equals(&*self.value, &*self.last)
    }

    fn snapshot(&mut self) {
        self.last = self.serializer.clone_value(&*self.value);
    }

    fn reset(&mut self) {
        self.value = self.serializer.clone_value(&*self.default);
    }

    fn write(&self, buffer: &mut dyn WriteBuffer) {
        self.serializer.write(&*self.value, buffer);
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        let value = self.serializer.read(buffer)?;
        if self.serializer.is_valid(&*value) {
            self.value = value;
        }
        Ok(())
    }
}

/// List of custom values sharing one serializer.
pub struct ParsedArray {
    serializer: Arc<dyn DynSerializer>,
    default: Vec<AnyValue>,
    value: Vec<AnyValue>,
    last: Vec<AnyValue>,
}

impl ParsedArray {
    /// Creates an array driven by `serializer`.
    #[must_use]
    pub fn new<S: Serializer>(serializer: S, default: Vec<S::Value>) -> Self {
        let boxed = |values: &[S::Value]| -> Vec<AnyValue> {
            values
                .iter()
                .map(|value| Box::new(value.clone()) as AnyValue)
                .collect()
        };
        Self {
            serializer: Arc::new(Erased(serializer)),
            value: boxed(default.as_slice()),
            last: boxed(default.as_slice()),
            default: boxed(default.as_slice()),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns `true` if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Current elements of type `T`; elements of other types are skipped.
    #[must_use]
    pub fn get<T: Any>(&self) -> Vec<&T> {
        self.value
            .iter()
            .filter_map(|value| (**value).downcast_ref::<T>())
            .collect()
    }

    /// Description of the element format.
    #[must_use]
    pub fn format(&self) -> String {
        self.serializer.format()
    }

    /// Returns `true` if every element is acceptable.
    #[must_use]
    pub fn can_set<T: Any>(&self, values: &[T]) -> bool {
        values.iter().all(|value| self.serializer.is_valid(value))
    }

    /// Replaces all elements; rejected arrays are ignored.
    pub fn set<T: Any + Send + Sync>(&mut self, values: Vec<T>) {
        if self.can_set(&values) {
            self.value = values
                .into_iter()
                .map(|value| Box::new(value) as AnyValue)
                .collect();
        }
    }

    fn clone_all(&self, values: &[AnyValue]) -> Vec<AnyValue> {
        values
            .iter()
            .map(|value| self.serializer.clone_value(&**value))
            .collect()
    }

    fn equal_all(&self, left: &[AnyValue], right: &[AnyValue]) -> bool {
        left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .all(|(l, r)| self.serializer.equals(&**l, &**r))
    }

    fn parse_all(&self, text: &str) -> Result<Vec<AnyValue>, ValueError> {
        parse_elements(text)?
            .iter()
            .map(|element| self.serializer.deserialize(element))
            .collect()
    }
}

impl Clone for ParsedArray {
    fn clone(&self) -> Self {
        Self {
            serializer: Arc::clone(&self.serializer),
            default: self.clone_all(&self.default),
            value: self.clone_all(&self.value),
            last: self.clone_all(&self.last),
        }
    }
}

impl fmt::Debug for ParsedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self
            .value
            .iter()
            .map(|value| self.serializer.debug(&**value))
            .collect();
        f.debug_struct("ParsedArray")
            .field("format", &self.serializer.format())
            .field("values", &values)
            .finish_non_exhaustive()
    }
}

impl ValueSlot for ParsedArray {
    fn prefix(&self) -> char {
        'P'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self
            .default
            .iter()
            .all(|value| self.serializer.is_valid(&**value))
        {
            Ok(())
        } else {
            Err("a default element is rejected by the serializer".to_string())
        }
    }

    fn limitations(&self) -> Vec<String> {
        describe(self.serializer.as_ref())
    }

    fn serialize_text(&self, layout: &TextLayout, used: usize) -> String {
        let single = TextLayout::single_line();
        let elements: Vec<String> = self
            .value
            .iter()
            .map(|value| escape_element(&self.serializer.serialize(&**value, &single, 0), SPECIALS))
            .collect();
        render_elements(&elements, layout, used)
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.value = self.parse_all(text)?;
        Ok(())
    }

    fn accepts_text(&self, text: &str) -> bool {
        self.parse_all(text).is_ok()
    }

    fn is_default(&self) -> bool {
        self.equal_all(&self.value, &self.default)
    }

    fn has_changed(&self) -> bool {
        !self.equal_all(&self.value, &self.last)
    }

    fn snapshot(&mut self) {
        self.last = self.clone_all(&self.value);
    }

    fn reset(&mut self) {
        self.value = self.clone_all(&self.default);
    }

    fn write(&self, buffer: &mut dyn WriteBuffer) {
        buffer.write_var_int(i32::try_from(self.value.len()).unwrap_or(i32::MAX));
        for value in &self.value {
            self.serializer.write(&**value, buffer);
        }
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        let length = buffer.read_var_int()?;
        let length = usize::try_from(length).map_err(|_| BufferError::NegativeLength(length))?;
        let mut values = Vec::with_capacity(length.min(1024));
        for _ in 0..length {
            values.push(self.serializer.read(buffer)?);
        }
        if values.iter().all(|value| self.serializer.is_valid(&**value)) {
            self.value = values;
        }
        Ok(())
    }
}
