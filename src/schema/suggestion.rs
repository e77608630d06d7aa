//! Suggestion providers attached to compound fields and list elements.

use std::fmt;
use std::sync::Arc;

use crate::entry::{ConfigEnum, Suggestion};

/// Caller-supplied predicate narrowing suggestions.
pub type SuggestionFilter<'a> = &'a dyn Fn(&Suggestion) -> bool;

type DynamicSource = Arc<dyn for<'a> Fn(SuggestionFilter<'a>) -> Vec<Suggestion> + Send + Sync>;

/// Source of candidate values for one field or element.
#[derive(Clone)]
pub enum SuggestionProvider {
    /// A fixed list.
    Static(Vec<Suggestion>),

    /// One suggestion per constant name.
    Enum(Arc<[String]>),

    /// Computed on demand; the function receives the caller's filter.
    Dynamic(DynamicSource),
}

impl SuggestionProvider {
    /// Fixed suggestions whose display name equals their value.
    #[must_use]
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Static(values.into_iter().map(Suggestion::value).collect())
    }

    /// One suggestion per constant of `E`.
    #[must_use]
    pub fn enumeration<E: ConfigEnum>() -> Self {
        Self::Enum(E::variants().iter().map(|v| v.name().to_string()).collect())
    }

    /// Lazily computed suggestions.
    #[must_use]
    pub fn dynamic<F>(source: F) -> Self
    where
        F: for<'a> Fn(SuggestionFilter<'a>) -> Vec<Suggestion> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(source))
    }

    /// Suggestions accepted by `filter`.
    #[must_use]
    pub fn suggestions(&self, filter: SuggestionFilter<'_>) -> Vec<Suggestion> {
        let all = match self {
            Self::Static(list) => list.clone(),
            Self::Enum(names) => names.iter().map(Suggestion::value).collect(),
            Self::Dynamic(source) => source(filter),
        };
        all.into_iter().filter(|s| filter(s)).collect()
    }
}

impl fmt::Debug for SuggestionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(list) => f.debug_tuple("Static").field(list).finish(),
            Self::Enum(names) => f.debug_tuple("Enum").field(names).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Every suggestion from every provider, unfiltered.
pub(crate) fn collect_all(providers: &[SuggestionProvider]) -> Vec<Suggestion> {
    providers
        .iter()
        .flat_map(|provider| provider.suggestions(&|_| true))
        .collect()
}
