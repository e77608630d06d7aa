//! Error types for entry construction and value parsing.

use thiserror::Error;

/// A value string that a variant could not accept.
///
/// Raised by parsing and by filters; the entry's previous value is left
/// untouched whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value '{value}': {reason}")]
pub struct ValueError {
    /// The rejected text.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ValueError {
    /// Creates a value error.
    #[must_use]
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Error type for entry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The key is empty, padded with whitespace, or contains a reserved character.
    #[error("Invalid entry key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// Which rule it broke
        reason: &'static str,
    },

    /// The default value does not satisfy the entry's own constraints.
    #[error("Invalid default for '{key}': {reason}")]
    InvalidDefault {
        /// Entry key
        key: String,
        /// Why the default was rejected
        reason: String,
    },

    /// A suggestion value does not satisfy the entry's validity check.
    #[error("Suggestion '{name}' for '{key}' is not a valid value: '{value}'")]
    InvalidSuggestion {
        /// Entry key
        key: String,
        /// Suggestion display name
        name: String,
        /// Suggestion value
        value: String,
    },

    /// A value string could not be applied to the entry.
    #[error("Failed to apply value to '{key}': {source}")]
    Value {
        /// Entry key
        key: String,
        /// Underlying value error
        #[source]
        source: ValueError,
    },
}

/// Characters that may not appear in a key.
pub(crate) const RESERVED_KEY_CHARS: &[char] = &[':', '='];

/// Validates an entry key.
///
/// # Errors
///
/// Returns [`EntryError::InvalidKey`] for empty keys, keys with leading or
/// trailing whitespace, keys spanning lines, and keys containing `:` or `=`.
pub(crate) fn validate_key(key: &str) -> Result<(), EntryError> {
    let reason = if key.is_empty() {
        Some("key must not be empty")
    } else if key.trim() != key {
        Some("key must not start or end with whitespace")
    } else if key.contains(RESERVED_KEY_CHARS) {
        Some("key must not contain ':' or '='")
    } else if key.contains(['\n', '\r']) {
        Some("key must be a single line")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(EntryError::InvalidKey {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
