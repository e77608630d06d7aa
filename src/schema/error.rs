//! Error types for schema building, parsing and validation.

use thiserror::Error;

/// Structural mismatch between text (or a value) and a schema.
///
/// Nested parses stop at the first failure and wrap it in [`Self::Field`] or
/// [`Self::Element`] on the way up, so the message reads as a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The text does not have the expected bracket structure.
    #[error("Malformed value '{text}': {reason}")]
    Malformed {
        /// The offending fragment.
        text: String,
        /// What was expected.
        reason: String,
    },

    /// A compound fragment names a field the schema does not declare.
    #[error("Unknown field '{name}'")]
    UnknownField {
        /// Field name as written.
        name: String,
    },

    /// A field name appears twice, in input or in a builder.
    #[error("Duplicate field '{name}'")]
    DuplicateField {
        /// Field name.
        name: String,
    },

    /// A builder was given a field name that cannot be written back.
    #[error("Invalid field name '{name}': {reason}")]
    InvalidFieldName {
        /// The rejected name.
        name: String,
        /// Which rule it broke.
        reason: &'static str,
    },

    /// A compound was built without fields.
    #[error("Compound declares no fields")]
    NoFields,

    /// Failure inside a compound field.
    #[error("Field '{field}': {source}")]
    Field {
        /// Field name.
        field: String,
        /// Underlying failure.
        #[source]
        source: Box<SchemaError>,
    },

    /// Failure inside a list element.
    #[error("Element {index}: {source}")]
    Element {
        /// Zero-based element position.
        index: usize,
        /// Underlying failure.
        #[source]
        source: Box<SchemaError>,
    },

    /// A list element lies outside the list's declared range.
    #[error("Element {index} ('{value}') is outside {range}")]
    OutOfRange {
        /// Zero-based element position.
        index: usize,
        /// The element as text.
        value: String,
        /// Range description.
        range: String,
    },

    /// Suggestions are forced and the value is not one of them.
    #[error("'{value}' is not one of the suggested values")]
    NotSuggested {
        /// The value as text.
        value: String,
    },

    /// A leaf could not be parsed, or a value has the wrong shape.
    #[error("Invalid value '{value}': {reason}")]
    Invalid {
        /// The value as text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl SchemaError {
    pub(crate) fn invalid(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn in_field(self, field: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_element(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }
}
