//! Structured schema engine.
//!
//! A [`DataType`] describes the shape of a nested value once and drives every
//! direction from that single description: text parsing, text serialization
//! (honouring the multiline layout), validation, binary sync and editing
//! suggestions.
//!
//! - [`SimpleData`]: leaves (bool, int, double, text, enum, custom)
//! - [`CompoundData`]: `[name=value, other=value]`, fields in declaration order
//! - [`ListData`]: `[a, b, c]`, one element descriptor, optional [`ListRange`]
//!
//! Descriptors are immutable once built; compound and list descriptors sit
//! behind an [`Arc`] so one schema can back many entries.
//!
//! [`SchemaSerializer`] adapts a descriptor to the entry
//! [`Serializer`](crate::entry::Serializer) contract, which is how structured
//! values end up in `P:` entries.

mod compound;
mod error;
mod list;
mod serializer;
mod simple;
mod suggestion;
mod value;

#[cfg(test)]
mod list_tests;

pub use compound::{CompoundBuilder, CompoundData, CompoundField};
pub use error::SchemaError;
pub use list::{ListBuilder, ListData, ListRange};
pub use serializer::SchemaSerializer;
pub use simple::{CustomData, SimpleData};
pub use suggestion::{SuggestionFilter, SuggestionProvider};
pub use value::{ParsedList, ParsedMap, StructuredValue};

use std::sync::Arc;

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::entry::{ConfigEnum, Suggestion};
use crate::text::TextLayout;

/// Shape of a structured value.
#[derive(Debug, Clone)]
pub enum DataType {
    /// A leaf.
    Simple(SimpleData),
    /// Named fields.
    Compound(Arc<CompoundData>),
    /// Homogeneous elements.
    List(Arc<ListData>),
}

impl DataType {
    /// Boolean leaf.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Simple(SimpleData::Bool)
    }

    /// Integer leaf.
    #[must_use]
    pub const fn int() -> Self {
        Self::Simple(SimpleData::Int)
    }

    /// Floating-point leaf.
    #[must_use]
    pub const fn double() -> Self {
        Self::Simple(SimpleData::Double)
    }

    /// Text leaf.
    #[must_use]
    pub const fn text() -> Self {
        Self::Simple(SimpleData::Text)
    }

    /// Enum leaf over dynamic constant names.
    #[must_use]
    pub fn enumeration<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Simple(SimpleData::Enum(names.into_iter().map(Into::into).collect()))
    }

    /// Enum leaf over the constants of `E`.
    #[must_use]
    pub fn enum_of<E: ConfigEnum>() -> Self {
        Self::enumeration(E::variants().iter().map(|v| v.name()))
    }

    /// Custom leaf.
    #[must_use]
    pub const fn custom(custom: CustomData) -> Self {
        Self::Simple(SimpleData::Custom(custom))
    }

    /// Plain list of `element`.
    #[must_use]
    pub fn list_of(element: impl Into<Self>) -> Self {
        ListData::builder(element).build().into()
    }

    /// Returns `true` for compounds and lists.
    #[must_use]
    pub const fn is_wrapped(&self) -> bool {
        !matches!(self, Self::Simple(_))
    }

    /// Parses text into a value.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, wrapped with the field names
    /// and element positions leading to it.
    pub fn parse(&self, text: &str) -> Result<StructuredValue, SchemaError> {
        match self {
            Self::Simple(simple) => simple.parse(text),
            Self::Compound(compound) => compound.parse(text),
            Self::List(list) => list.parse(text),
        }
    }

    /// Renders a value.
    ///
    /// `level` is the nesting depth used for indentation and `used` the column
    /// at which the value starts.
    #[must_use]
    pub fn serialize(
        &self,
        value: &StructuredValue,
        layout: &TextLayout,
        level: usize,
        used: usize,
    ) -> String {
        match self {
            Self::Simple(simple) => simple.serialize(value),
            Self::Compound(compound) => compound.serialize(value, layout, level, used),
            Self::List(list) => list.serialize(value, layout, level, used),
        }
    }

    /// Checks that `value` has this shape and satisfies ranges and forced
    /// suggestions.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self, value: &StructuredValue) -> Result<(), SchemaError> {
        match self {
            Self::Simple(simple) => simple.validate(value),
            Self::Compound(compound) => compound.validate(value),
            Self::List(list) => list.validate(value),
        }
    }

    /// Short description of the text format.
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            Self::Simple(simple) => simple.format(),
            Self::Compound(compound) => compound.format(),
            Self::List(list) => list.format(),
        }
    }

    /// A representative value.
    #[must_use]
    pub fn example(&self) -> StructuredValue {
        match self {
            Self::Simple(simple) => simple.example(),
            Self::Compound(compound) => compound.example(),
            Self::List(list) => list.example(),
        }
    }

    /// Writes a value field by field and element by element.
    pub fn write(&self, value: &StructuredValue, buffer: &mut dyn WriteBuffer) {
        match self {
            Self::Simple(simple) => simple.write(value, buffer),
            Self::Compound(compound) => compound.write(value, buffer),
            Self::List(list) => list.write(value, buffer),
        }
    }

    /// Reads a value written by [`Self::write`].
    ///
    /// # Errors
    ///
    /// Returns a [`BufferError`] if the buffer is exhausted or malformed.
    pub fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<StructuredValue, BufferError> {
        match self {
            Self::Simple(simple) => simple.read(buffer),
            Self::Compound(compound) => compound.read(buffer),
            Self::List(list) => list.read(buffer),
        }
    }

    /// Suggestions implied by the type itself (enum constants).
    #[must_use]
    pub fn suggestions(&self, filter: SuggestionFilter<'_>) -> Vec<Suggestion> {
        match self {
            Self::Simple(SimpleData::Enum(names)) => {
                SuggestionProvider::Enum(Arc::clone(names)).suggestions(filter)
            }
            _ => Vec::new(),
        }
    }
}

impl From<SimpleData> for DataType {
    fn from(data: SimpleData) -> Self {
        Self::Simple(data)
    }
}

impl From<CompoundData> for DataType {
    fn from(data: CompoundData) -> Self {
        Self::Compound(Arc::new(data))
    }
}

impl From<ListData> for DataType {
    fn from(data: ListData) -> Self {
        Self::List(Arc::new(data))
    }
}

/// Accepts `value` only if some suggestion parses to an equal value.
///
/// Nothing is enforced when the providers yield no suggestions at all.
pub(crate) fn check_suggested(
    data: &DataType,
    providers: &[SuggestionProvider],
    value: &StructuredValue,
) -> Result<(), SchemaError> {
    let suggestions = suggestion::collect_all(providers);
    if suggestions.is_empty()
        || suggestions
            .iter()
            .any(|s| data.parse(&s.value).is_ok_and(|parsed| parsed == *value))
    {
        Ok(())
    } else {
        Err(SchemaError::NotSuggested {
            value: value.to_string(),
        })
    }
}
