//! Predicates restricting string values.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Restriction applied to string values and string array elements.
#[derive(Clone)]
pub enum TextFilter {
    /// Accepts text matched by the regex.
    Pattern(Regex),

    /// Accepts text for which `test` returns `true`.
    Predicate {
        /// Shown to users as the limitation text.
        description: String,
        /// The check itself.
        test: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    },
}

impl TextFilter {
    /// Builds a regex filter.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error for invalid patterns.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Builds a predicate filter.
    #[must_use]
    pub fn predicate(
        description: impl Into<String>,
        test: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Predicate {
            description: description.into(),
            test: Arc::new(test),
        }
    }

    /// Returns `true` if `text` passes the filter.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(text),
            Self::Predicate { test, .. } => test(text),
        }
    }

    /// Describes the filter for generated comments.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Pattern(regex) => format!("Must match pattern: {}", regex.as_str()),
            Self::Predicate { description, .. } => description.clone(),
        }
    }
}

impl fmt::Debug for TextFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate { description, .. } => f
                .debug_struct("Predicate")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}
