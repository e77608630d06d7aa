//! Compound descriptors: ordered, named, heterogeneously typed fields.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::entry::Suggestion;
use crate::text::{SPECIALS, TextLayout, find_top_level, split_elements, strip_brackets};

use super::error::SchemaError;
use super::suggestion::{SuggestionFilter, SuggestionProvider};
use super::value::{ParsedMap, StructuredValue};
use super::{DataType, check_suggested};

/// One named field of a compound.
#[derive(Debug, Clone)]
pub struct CompoundField {
    name: String,
    data: DataType,
    suggestions: Vec<SuggestionProvider>,
    forced: bool,
}

impl CompoundField {
    /// Creates a field without suggestions.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<DataType>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            suggestions: Vec::new(),
            forced: false,
        }
    }

    /// Adds a suggestion provider.
    #[must_use]
    pub fn suggest(mut self, provider: SuggestionProvider) -> Self {
        self.suggestions.push(provider);
        self
    }

    /// Rejects values that are not suggested.
    #[must_use]
    pub const fn forced(mut self) -> Self {
        self.forced = true;
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptor.
    #[must_use]
    pub const fn data(&self) -> &DataType {
        &self.data
    }

    /// Returns `true` if only suggested values are accepted.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.forced
    }

    /// Suggestions from every provider, narrowed by `filter`.
    #[must_use]
    pub fn suggestions(&self, filter: SuggestionFilter<'_>) -> Vec<Suggestion> {
        let mut all: Vec<Suggestion> = self
            .suggestions
            .iter()
            .flat_map(|provider| provider.suggestions(filter))
            .collect();
        if all.is_empty() {
            all = self.data.suggestions(filter);
        }
        all
    }

    fn check(&self, value: &StructuredValue) -> Result<(), SchemaError> {
        if self.forced {
            check_suggested(&self.data, &self.suggestions, value)?;
        }
        Ok(())
    }
}

/// Checks that a field name can be written and read back.
fn validate_name(name: &str) -> Result<(), SchemaError> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.trim() != name {
        Some("must not start or end with whitespace")
    } else if name.contains(SPECIALS) || name.contains(['=', ':', '\\', '\n', '\r']) {
        Some("must not contain '=', ':', ',', brackets, backslashes or line breaks")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(SchemaError::InvalidFieldName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Builder for [`CompoundData`].
#[derive(Debug, Default)]
pub struct CompoundBuilder {
    fields: Vec<CompoundField>,
    newlined: bool,
}

impl CompoundBuilder {
    /// Adds a plain field.
    #[must_use]
    pub fn field(self, name: impl Into<String>, data: impl Into<DataType>) -> Self {
        self.add(CompoundField::new(name, data))
    }

    /// Adds a configured field.
    #[must_use]
    pub fn add(mut self, field: CompoundField) -> Self {
        self.fields.push(field);
        self
    }

    /// Puts each field on its own line when the multiline policy allows it.
    #[must_use]
    pub const fn newlined(mut self, newlined: bool) -> Self {
        self.newlined = newlined;
        self
    }

    /// Validates field names and builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NoFields`], [`SchemaError::InvalidFieldName`] or
    /// [`SchemaError::DuplicateField`].
    pub fn build(self) -> Result<CompoundData, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::NoFields);
        }
        for (index, field) in self.fields.iter().enumerate() {
            validate_name(&field.name)?;
            if self.fields[..index].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(CompoundData {
            fields: self.fields,
            newlined: self.newlined,
        })
    }
}

/// Ordered set of named fields, written as `[name=value, other=value]`.
///
/// # Example
///
/// ```
/// use structcfg::schema::{CompoundData, DataType, StructuredValue};
/// use structcfg::text::TextLayout;
///
/// let point: DataType = CompoundData::builder()
///     .field("x", DataType::int())
///     .field("y", DataType::int())
///     .build()?
///     .into();
///
/// let value = point.parse("[y=2, x=1]")?;
/// assert_eq!(point.serialize(&value, &TextLayout::default(), 0, 0), "[x=1, y=2]");
/// # Ok::<(), structcfg::schema::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompoundData {
    fields: Vec<CompoundField>,
    newlined: bool,
}

impl CompoundData {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> CompoundBuilder {
        CompoundBuilder::default()
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[CompoundField] {
        &self.fields
    }

    /// Field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&CompoundField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Whether fields go on separate lines when wrapping is allowed.
    #[must_use]
    pub const fn is_newlined(&self) -> bool {
        self.newlined
    }

    /// Suggestions for one field; empty for unknown names.
    #[must_use]
    pub fn field_suggestions(&self, name: &str, filter: SuggestionFilter<'_>) -> Vec<Suggestion> {
        self.field(name)
            .map(|field| field.suggestions(filter))
            .unwrap_or_default()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Fragments are matched by `name=`; a fragment without a name takes the
    /// field at its own position. Absent fields parse the empty string.
    pub(crate) fn parse(&self, text: &str) -> Result<StructuredValue, SchemaError> {
        let inner = strip_brackets(text)
            .ok_or_else(|| SchemaError::malformed(text.trim(), "expected [field=value, ...]"))?;
        let fragments =
            split_elements(inner).map_err(|e| SchemaError::malformed(inner.trim(), e.to_string()))?;

        let mut provided: Vec<Option<&str>> = vec![None; self.fields.len()];
        for (position, fragment) in fragments.into_iter().enumerate() {
            let (index, value) = match find_top_level(fragment, '=') {
                Some(eq) => {
                    let name = fragment[..eq].trim();
                    let index = self.index_of(name).ok_or_else(|| SchemaError::UnknownField {
                        name: name.to_string(),
                    })?;
                    (index, fragment[eq + 1..].trim())
                }
                None if position < self.fields.len() => (position, fragment),
                None => {
                    return Err(SchemaError::malformed(
                        fragment,
                        format!("expected at most {} fields", self.fields.len()),
                    ));
                }
            };
            match provided.get_mut(index) {
                Some(Some(_)) => {
                    return Err(SchemaError::DuplicateField {
                        name: self.fields[index].name.clone(),
                    });
                }
                Some(slot) => *slot = Some(value),
                None => {}
            }
        }

        let mut map = ParsedMap::new();
        for (field, text) in self.fields.iter().zip(provided) {
            let value = field
                .data
                .parse(text.unwrap_or(""))
                .and_then(|value| field.check(&value).map(|()| value))
                .map_err(|e| e.in_field(&field.name))?;
            map.insert(field.name.clone(), value);
        }
        Ok(StructuredValue::Map(map))
    }

    pub(crate) fn serialize(
        &self,
        value: &StructuredValue,
        layout: &TextLayout,
        level: usize,
        used: usize,
    ) -> String {
        let Some(map) = value.as_map() else {
            return "[]".to_string();
        };
        let child_column = layout.indentation(level + 1).len();
        let elements: Vec<String> = self
            .fields
            .iter()
            .filter_map(|field| {
                let value = map.get(&field.name)?;
                let label = format!("{}=", field.name);
                let rendered =
                    field
                        .data
                        .serialize(value, layout, level + 1, child_column + label.len());
                Some(label + &rendered)
            })
            .collect();
        layout.bracketed(&elements, self.newlined, level, used)
    }

    pub(crate) fn validate(&self, value: &StructuredValue) -> Result<(), SchemaError> {
        let map = value.as_map().ok_or_else(|| {
            SchemaError::invalid(value.to_string(), format!("expected {}", self.format()))
        })?;
        if let Some((name, _)) = map.iter().find(|(name, _)| self.field(name).is_none()) {
            return Err(SchemaError::UnknownField {
                name: name.to_string(),
            });
        }
        for field in &self.fields {
            let value = map
                .get(&field.name)
                .ok_or_else(|| SchemaError::invalid("", "field is missing").in_field(&field.name))?;
            field
                .data
                .validate(value)
                .and_then(|()| field.check(value))
                .map_err(|e| e.in_field(&field.name))?;
        }
        Ok(())
    }

    pub(crate) fn format(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{}={}", field.name, field.data.format()))
            .collect();
        format!("[{}]", fields.join(", "))
    }

    pub(crate) fn example(&self) -> StructuredValue {
        let mut map = ParsedMap::new();
        for field in &self.fields {
            map.insert(field.name.clone(), field.data.example());
        }
        StructuredValue::Map(map)
    }

    pub(crate) fn write(&self, value: &StructuredValue, buffer: &mut dyn WriteBuffer) {
        for field in &self.fields {
            match value.as_map().and_then(|map| map.get(&field.name)) {
                Some(value) => field.data.write(value, buffer),
                None => field.data.write(&field.data.example(), buffer),
            }
        }
    }

    pub(crate) fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<StructuredValue, BufferError> {
        let mut map = ParsedMap::new();
        for field in &self.fields {
            map.insert(field.name.clone(), field.data.read(buffer)?);
        }
        Ok(StructuredValue::Map(map))
    }
}
