//! Prefix to parser mapping used while reading files.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::entry::{
    ArrayValue, BoolValue, ConfigEntry, DoubleValue, EntryError, EntryValue, IntValue,
    StringValue, Unresolved,
};

/// Builds an entry for a key seen in a file: `(key, raw value text)`.
pub type EntryParser = Arc<dyn Fn(&str, &str) -> Result<ConfigEntry, EntryError> + Send + Sync>;

/// Maps type prefixes to the parsers that create entries for unknown keys.
///
/// [`ParserRegistry::default`] knows every built-in prefix: `I D B S A`
/// produce typed entries, while `E` and `P`, whose real type only code knows,
/// produce [`Unresolved`] placeholders.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<char, EntryParser>,
}

impl ParserRegistry {
    /// Registry without any parser.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Registers `parser` for `prefix`, returning the parser it replaced.
    pub fn register<F>(&mut self, prefix: char, parser: F) -> Option<EntryParser>
    where
        F: Fn(&str, &str) -> Result<ConfigEntry, EntryError> + Send + Sync + 'static,
    {
        self.parsers.insert(prefix, Arc::new(parser))
    }

    /// Registers a parser that stores the raw text as a placeholder.
    pub fn register_placeholder(&mut self, prefix: char) -> Option<EntryParser> {
        self.register(prefix, move |key, raw| {
            ConfigEntry::loaded(key, Unresolved::new(prefix, raw))
        })
    }

    /// Removes the parser for `prefix`.
    pub fn unregister(&mut self, prefix: char) -> Option<EntryParser> {
        self.parsers.remove(&prefix)
    }

    /// Whether a parser is registered for `prefix`.
    #[must_use]
    pub fn contains(&self, prefix: char) -> bool {
        self.parsers.contains_key(&prefix)
    }

    /// Registered prefixes, sorted.
    #[must_use]
    pub fn prefixes(&self) -> Vec<char> {
        let mut prefixes: Vec<char> = self.parsers.keys().copied().collect();
        prefixes.sort_unstable();
        prefixes
    }

    /// Runs the parser for `prefix`, or returns `None` if there is none.
    #[must_use]
    pub fn parse(&self, prefix: char, key: &str, raw: &str) -> Option<Result<ConfigEntry, EntryError>> {
        self.parsers.get(&prefix).map(|parser| parser(key, raw))
    }

    fn register_typed<V, F>(&mut self, prefix: char, make: F)
    where
        V: Into<EntryValue>,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.register(prefix, move |key, raw| {
            let mut entry = ConfigEntry::loaded(key, make())?;
            entry.set_text(raw)?;
            Ok(entry)
        });
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_typed('I', || IntValue::new(0));
        registry.register_typed('D', || DoubleValue::new(0.0));
        registry.register_typed('B', || BoolValue::new(false));
        registry.register_typed('S', || StringValue::new(""));
        registry.register_typed('A', || ArrayValue::new(Vec::<String>::new()));
        registry.register_placeholder('E');
        registry.register_placeholder('P');
        registry
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("prefixes", &self.prefixes())
            .finish()
    }
}
