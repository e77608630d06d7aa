//! Adapter from a schema descriptor to the entry serializer contract.

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::entry::{ParsedArray, ParsedValue, Serializer, ValueError};
use crate::text::TextLayout;

use super::DataType;
use super::value::StructuredValue;

/// Serializes [`StructuredValue`]s through a [`DataType`].
///
/// # Example
///
/// ```
/// use structcfg::entry::ConfigEntry;
/// use structcfg::schema::{CompoundData, DataType, ParsedMap, SchemaSerializer};
///
/// let server = CompoundData::builder()
///     .field("host", DataType::text())
///     .field("port", DataType::int())
///     .build()?;
/// let default = ParsedMap::new().with("host", "localhost").with("port", 25565_i64);
///
/// let mut entry = ConfigEntry::new("server", SchemaSerializer::new(server).value(default.into()))?;
/// entry.set_text("[host=example.org, port=1]")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SchemaSerializer {
    data: DataType,
}

impl SchemaSerializer {
    /// Wraps a descriptor.
    #[must_use]
    pub fn new(data: impl Into<DataType>) -> Self {
        Self { data: data.into() }
    }

    /// The wrapped descriptor.
    #[must_use]
    pub const fn data(&self) -> &DataType {
        &self.data
    }

    /// A single-value entry backed by this schema.
    #[must_use]
    pub fn value(self, default: StructuredValue) -> ParsedValue {
        ParsedValue::new(self, default)
    }

    /// A list entry backed by this schema.
    #[must_use]
    pub fn array(self, default: Vec<StructuredValue>) -> ParsedArray {
        ParsedArray::new(self, default)
    }
}

impl Serializer for SchemaSerializer {
    type Value = StructuredValue;

    fn example(&self) -> StructuredValue {
        self.data.example()
    }

    fn format(&self) -> String {
        self.data.format()
    }

    fn is_valid(&self, value: &StructuredValue) -> bool {
        self.data.validate(value).is_ok()
    }

    fn serialize(&self, value: &StructuredValue) -> String {
        self.data.serialize(value, &TextLayout::single_line(), 0, 0)
    }

    fn serialize_with(&self, value: &StructuredValue, layout: &TextLayout, used: usize) -> String {
        self.data.serialize(value, layout, 0, used)
    }

    fn deserialize(&self, text: &str) -> Result<StructuredValue, ValueError> {
        self.data
            .parse(text)
            .map_err(|e| ValueError::new(text.trim(), e.to_string()))
    }

    fn write(&self, value: &StructuredValue, buffer: &mut dyn WriteBuffer) {
        self.data.write(value, buffer);
    }

    fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<StructuredValue, BufferError> {
        self.data.read(buffer)
    }
}
