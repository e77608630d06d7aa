//! List descriptors: homogeneous sequences of one element descriptor.

use std::sync::Arc;

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::entry::Suggestion;
use crate::text::{TextLayout, split_elements, strip_brackets};

use super::error::SchemaError;
use super::suggestion::{SuggestionFilter, SuggestionProvider};
use super::value::{ParsedList, StructuredValue};
use super::{DataType, check_suggested};

/// Allowed values for the elements of a numeric or enum list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListRange {
    /// Inclusive integer bounds.
    Int {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
    /// Inclusive floating-point bounds.
    Double {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Permitted constant names.
    Enum(Arc<[String]>),
}

impl ListRange {
    /// Returns `true` if `value` lies within the range.
    ///
    /// Values of a kind the range does not describe are outside it.
    #[must_use]
    pub fn contains(&self, value: &StructuredValue) -> bool {
        match self {
            Self::Int { min, max } => value.as_int().is_some_and(|v| (*min..=*max).contains(&v)),
            Self::Double { min, max } => value
                .as_double()
                .is_some_and(|v| (*min..=*max).contains(&v)),
            Self::Enum(names) => value
                .as_text()
                .is_some_and(|v| names.iter().any(|name| name == v)),
        }
    }

    /// Human-readable form used in errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Int { min, max } => format!("{min} ~ {max}"),
            Self::Double { min, max } => format!("{min:?} ~ {max:?}"),
            Self::Enum(names) => format!("[{}]", names.join(", ")),
        }
    }

    fn example(&self) -> StructuredValue {
        match self {
            Self::Int { min, .. } => StructuredValue::Int(*min),
            Self::Double { min, .. } => StructuredValue::Double(*min),
            Self::Enum(names) => StructuredValue::text(names.first().cloned().unwrap_or_default()),
        }
    }
}

/// Builder for [`ListData`].
#[derive(Debug)]
pub struct ListBuilder {
    data: ListData,
}

impl ListBuilder {
    /// Adds a suggestion provider for elements.
    #[must_use]
    pub fn suggest(mut self, provider: SuggestionProvider) -> Self {
        self.data.suggestions.push(provider);
        self
    }

    /// Rejects elements that are not suggested.
    #[must_use]
    pub const fn forced(mut self) -> Self {
        self.data.forced = true;
        self
    }

    /// Restricts element values.
    #[must_use]
    pub fn range(mut self, range: ListRange) -> Self {
        self.data.range = Some(range);
        self
    }

    /// Puts elements on separate lines when the multiline policy allows it.
    #[must_use]
    pub const fn newlined(mut self, newlined: bool) -> Self {
        self.data.newlined = newlined;
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> ListData {
        self.data
    }
}

/// Sequence of elements sharing one descriptor, written as `[a, b, c]`.
#[derive(Debug, Clone)]
pub struct ListData {
    element: DataType,
    suggestions: Vec<SuggestionProvider>,
    forced: bool,
    range: Option<ListRange>,
    newlined: bool,
}

impl ListData {
    /// Starts a builder for lists of `element`.
    #[must_use]
    pub fn builder(element: impl Into<DataType>) -> ListBuilder {
        ListBuilder {
            data: Self {
                element: element.into(),
                suggestions: Vec::new(),
                forced: false,
                range: None,
                newlined: false,
            },
        }
    }

    /// Element descriptor.
    #[must_use]
    pub const fn element(&self) -> &DataType {
        &self.element
    }

    /// Declared element range, if any.
    #[must_use]
    pub const fn range(&self) -> Option<&ListRange> {
        self.range.as_ref()
    }

    /// Whether elements go on separate lines when wrapping is allowed.
    #[must_use]
    pub const fn is_newlined(&self) -> bool {
        self.newlined
    }

    /// Element suggestions narrowed by `filter`.
    #[must_use]
    pub fn suggestions(&self, filter: SuggestionFilter<'_>) -> Vec<Suggestion> {
        let all: Vec<Suggestion> = self
            .suggestions
            .iter()
            .flat_map(|provider| provider.suggestions(filter))
            .collect();
        if all.is_empty() {
            self.element.suggestions(filter)
        } else {
            all
        }
    }

    fn check(&self, index: usize, value: &StructuredValue) -> Result<(), SchemaError> {
        if let Some(range) = &self.range {
            if !range.contains(value) {
                return Err(SchemaError::OutOfRange {
                    index,
                    value: value.to_string(),
                    range: range.describe(),
                });
            }
        }
        if self.forced {
            check_suggested(&self.element, &self.suggestions, value)
                .map_err(|e| e.in_element(index))?;
        }
        Ok(())
    }

    /// Blank text is an empty list, so absent compound fields of list type
    /// parse cleanly.
    pub(crate) fn parse(&self, text: &str) -> Result<StructuredValue, SchemaError> {
        if text.trim().is_empty() {
            return Ok(StructuredValue::List(ParsedList::new()));
        }
        let inner = strip_brackets(text)
            .ok_or_else(|| SchemaError::malformed(text.trim(), "expected [element, ...]"))?;
        let fragments =
            split_elements(inner).map_err(|e| SchemaError::malformed(inner.trim(), e.to_string()))?;

        let mut list = ParsedList::new();
        for (index, fragment) in fragments.into_iter().enumerate() {
            let value = self
                .element
                .parse(fragment)
                .map_err(|e| e.in_element(index))?;
            self.check(index, &value)?;
            list.push(value);
        }
        Ok(StructuredValue::List(list))
    }

    pub(crate) fn serialize(
        &self,
        value: &StructuredValue,
        layout: &TextLayout,
        level: usize,
        used: usize,
    ) -> String {
        let Some(list) = value.as_list() else {
            return "[]".to_string();
        };
        let child_column = layout.indentation(level + 1).len();
        let elements: Vec<String> = list
            .iter()
            .map(|element| self.element.serialize(element, layout, level + 1, child_column))
            .collect();
        layout.bracketed(&elements, self.newlined, level, used)
    }

    pub(crate) fn validate(&self, value: &StructuredValue) -> Result<(), SchemaError> {
        let list = value.as_list().ok_or_else(|| {
            SchemaError::invalid(value.to_string(), format!("expected {}", self.format()))
        })?;
        for (index, element) in list.iter().enumerate() {
            self.element
                .validate(element)
                .map_err(|e| e.in_element(index))?;
            self.check(index, element)?;
        }
        Ok(())
    }

    pub(crate) fn format(&self) -> String {
        format!("[{}, ...]", self.element.format())
    }

    pub(crate) fn example(&self) -> StructuredValue {
        let element = self
            .range
            .as_ref()
            .map_or_else(|| self.element.example(), ListRange::example);
        StructuredValue::List(std::iter::once(element).collect())
    }

    pub(crate) fn write(&self, value: &StructuredValue, buffer: &mut dyn WriteBuffer) {
        let empty = ParsedList::new();
        let list = value.as_list().unwrap_or(&empty);
        buffer.write_var_int(i32::try_from(list.len()).unwrap_or(i32::MAX));
        for element in list {
            self.element.write(element, buffer);
        }
    }

    pub(crate) fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<StructuredValue, BufferError> {
        let length = buffer.read_var_int()?;
        let length = usize::try_from(length).map_err(|_| BufferError::NegativeLength(length))?;
        let mut list = ParsedList::new();
        for _ in 0..length {
            list.push(self.element.read(buffer)?);
        }
        Ok(StructuredValue::List(list))
    }
}
