//! Suggestions surfaced for editing assistance.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque payload attached to a suggestion by the application.
pub type SuggestionTag = Arc<dyn Any + Send + Sync>;

/// A named candidate value.
///
/// The value is stored in its text form, exactly as it would appear after the
/// `=` of an entry line.
#[derive(Clone)]
pub struct Suggestion {
    /// Display name
    pub name: String,
    /// Candidate value in text form
    pub value: String,
    /// Optional application payload
    pub tag: Option<SuggestionTag>,
}

impl Suggestion {
    /// Creates a suggestion without a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            tag: None,
        }
    }

    /// Creates a suggestion whose display name equals its value.
    #[must_use]
    pub fn value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value)
    }

    /// Attaches an application payload.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Any + Send + Sync) -> Self {
        self.tag = Some(Arc::new(tag));
        self
    }

    /// Returns the payload if it has type `T`.
    #[must_use]
    pub fn tag<T: Any>(&self) -> Option<&T> {
        self.tag.as_deref().and_then(|tag| tag.downcast_ref::<T>())
    }
}

impl fmt::Debug for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suggestion")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("tagged", &self.tag.is_some())
            .finish()
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}
