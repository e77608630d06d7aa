//! Enum entries validated against a declared constant set.

use std::sync::Arc;

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::{TextLayout, VALUE_SPECIALS, escape, unescape};

use super::ValueError;
use super::slot::ValueSlot;
use super::suggestion::Suggestion;

/// An enum usable as a configuration value.
///
/// # Example
///
/// ```
/// use structcfg::entry::ConfigEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Mode {
///     Fast,
///     Safe,
/// }
///
/// impl ConfigEnum for Mode {
///     fn variants() -> &'static [Self] {
///         &[Self::Fast, Self::Safe]
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Fast => "FAST",
///             Self::Safe => "SAFE",
///         }
///     }
/// }
///
/// assert_eq!(Mode::Safe.name(), "SAFE");
/// ```
pub trait ConfigEnum: Copy + PartialEq + Send + Sync + 'static {
    /// Every constant, in declaration order.
    fn variants() -> &'static [Self];

    /// Stable name written to the file.
    fn name(self) -> &'static str;

    /// Optional label used for suggestions instead of [`Self::name`].
    fn display_name(self) -> Option<&'static str> {
        None
    }
}

/// Enum entry value.
///
/// Stores constant names rather than a concrete type so entries of different
/// enums live in the same tree; typed access goes through [`Self::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    names: Arc<[String]>,
    labels: Arc<[String]>,
    default: usize,
    value: usize,
    last: usize,
}

impl EnumValue {
    /// Creates a value over the constants of `E`.
    #[must_use]
    pub fn of<E: ConfigEnum>(default: E) -> Self {
        let variants = E::variants();
        let names: Arc<[String]> = variants.iter().map(|v| v.name().to_string()).collect();
        let labels: Arc<[String]> = variants
            .iter()
            .map(|v| v.display_name().unwrap_or_else(|| v.name()).to_string())
            .collect();
        let index = variants.iter().position(|v| *v == default).unwrap_or(0);
        Self::from_parts(names, labels, index)
    }

    /// Creates a value over a dynamic list of names.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if `default` is not one of `names`.
    pub fn from_names<I, S>(names: I, default: &str) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Arc<[String]> = names.into_iter().map(Into::into).collect();
        let index = names
            .iter()
            .position(|name| name == default)
            .ok_or_else(|| ValueError::new(default, "not one of the declared constants"))?;
        Ok(Self::from_parts(Arc::clone(&names), names, index))
    }

    fn from_parts(names: Arc<[String]>, labels: Arc<[String]>, index: usize) -> Self {
        Self {
            names,
            labels,
            default: index,
            value: index,
            last: index,
        }
    }

    /// Replaces suggestion labels using `lookup`; `None` keeps the constant name.
    #[must_use]
    pub fn with_display_names(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.labels = self
            .names
            .iter()
            .map(|name| lookup(name).unwrap_or_else(|| name.clone()))
            .collect();
        self
    }

    /// Declared constant names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name of the current constant.
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.get(self.value).map_or("", String::as_str)
    }

    /// Name of the default constant.
    #[must_use]
    pub fn default_name(&self) -> &str {
        self.names.get(self.default).map_or("", String::as_str)
    }

    /// Current constant as `E`, if `E` declares it.
    #[must_use]
    pub fn get<E: ConfigEnum>(&self) -> Option<E> {
        let name = self.name();
        E::variants().iter().copied().find(|v| v.name() == name)
    }

    /// Sets the constant; names this value does not declare are ignored.
    pub fn set<E: ConfigEnum>(&mut self, value: E) {
        self.set_name(value.name());
    }

    /// Sets the constant by name. Returns `false` if the name is unknown.
    pub fn set_name(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.value = index;
                true
            }
            None => false,
        }
    }

    /// One suggestion per constant, labelled with its display name.
    #[must_use]
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.names
            .iter()
            .zip(self.labels.iter())
            .map(|(name, label)| Suggestion::new(label.clone(), escape(name, VALUE_SPECIALS)))
            .collect()
    }

    /// Exact match first, then a case-insensitive one.
    fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .or_else(|| {
                self.names
                    .iter()
                    .position(|candidate| candidate.eq_ignore_ascii_case(name))
            })
    }
}

impl ValueSlot for EnumValue {
    fn prefix(&self) -> char {
        'E'
    }

    fn validate_default(&self) -> Result<(), String> {
        if self.default < self.names.len() {
            Ok(())
        } else {
            Err("enum declares no constants".to_string())
        }
    }

    fn limitations(&self) -> Vec<String> {
        vec![format!("Must be one of: [{}]", self.names.join(", "))]
    }

    fn serialize_text(&self, _layout: &TextLayout, _used: usize) -> String {
        escape(self.name(), VALUE_SPECIALS)
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ValueError> {
        let name = unescape(text.trim());
        if self.set_name(&name) {
            Ok(())
        } else {
            Err(ValueError::new(
                text,
                format!("expected one of [{}]", self.names.join(", ")),
            ))
        }
    }

    fn accepts_text(&self, text: &str) -> bool {
        self.index_of(&unescape(text.trim())).is_some()
    }

    fn is_default(&self) -> bool {
        self.value == self.default
    }

    fn has_changed(&self) -> bool {
        self.value != self.last
    }

    fn snapshot(&mut self) {
        self.last = self.value;
    }

    fn reset(&mut self) {
        self.value = self.default;
    }

    fn write(&self, buffer: &mut dyn WriteBuffer) {
        buffer.write_enum(self.name());
    }

    fn read(&mut self, buffer: &mut dyn ReadBuffer) -> Result<(), BufferError> {
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        self.value = buffer.read_enum(&names)?;
        Ok(())
    }
}
