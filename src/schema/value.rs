//! Runtime representation of parsed structured values.

use std::fmt;

/// A value produced by parsing a schema, or handed to it for serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    /// Boolean leaf.
    Bool(bool),
    /// Integer leaf.
    Int(i64),
    /// Floating-point leaf.
    Double(f64),
    /// Text leaf; also holds enum constant names and custom values.
    Text(String),
    /// Compound fields.
    Map(ParsedMap),
    /// List elements.
    List(ParsedList),
}

impl StructuredValue {
    /// Text leaf from anything string-like.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The integer, if this is an integer leaf.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The number, for integer and floating-point leaves.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean leaf.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The text, if this is a text leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The fields, if this is a compound value.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ParsedMap> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// The elements, if this is a list value.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ParsedList> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Map(_) => "compound",
            Self::List(_) => "list",
        }
    }
}

impl From<bool> for StructuredValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StructuredValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StructuredValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for StructuredValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StructuredValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ParsedMap> for StructuredValue {
    fn from(value: ParsedMap) -> Self {
        Self::Map(value)
    }
}

impl From<ParsedList> for StructuredValue {
    fn from(value: ParsedList) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for StructuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Text(v) => f.write_str(v),
            Self::Map(map) => {
                f.write_str("[")?;
                for (index, (name, value)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("]")
            }
            Self::List(list) => {
                f.write_str("[")?;
                for (index, value) in list.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Named fields in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMap {
    fields: Vec<(String, StructuredValue)>,
}

impl ParsedMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds or replaces a field; replaced fields keep their position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<StructuredValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StructuredValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Field value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StructuredValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the field exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructuredValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Elements in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedList {
    elements: Vec<StructuredValue>,
}

impl ParsedList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Appends an element.
    pub fn push(&mut self, value: impl Into<StructuredValue>) {
        self.elements.push(value.into());
    }

    /// Element by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StructuredValue> {
        self.elements.get(index)
    }

    /// Elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, StructuredValue> {
        self.elements.iter()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<V: Into<StructuredValue>> FromIterator<V> for ParsedList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParsedList {
    type Item = &'a StructuredValue;
    type IntoIter = std::slice::Iter<'a, StructuredValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
