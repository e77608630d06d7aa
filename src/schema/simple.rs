//! Leaf descriptors.

use std::fmt;
use std::sync::Arc;

use crate::buffer::{BufferError, ReadBuffer, WriteBuffer};
use crate::text::{SPECIALS, escape_element, unescape};

use super::error::SchemaError;
use super::value::StructuredValue;

type ParseFn = Arc<dyn Fn(&str) -> Result<StructuredValue, String> + Send + Sync>;
type SerializeFn = Arc<dyn Fn(&StructuredValue) -> String + Send + Sync>;

/// Leaf with application-defined text conversion.
///
/// The functions see unescaped text; escaping is applied around them.
#[derive(Clone)]
pub struct CustomData {
    format: String,
    example: StructuredValue,
    parse: ParseFn,
    serialize: SerializeFn,
}

impl CustomData {
    /// Creates a custom leaf.
    pub fn new<P, S>(format: impl Into<String>, example: StructuredValue, parse: P, serialize: S) -> Self
    where
        P: Fn(&str) -> Result<StructuredValue, String> + Send + Sync + 'static,
        S: Fn(&StructuredValue) -> String + Send + Sync + 'static,
    {
        Self {
            format: format.into(),
            example,
            parse: Arc::new(parse),
            serialize: Arc::new(serialize),
        }
    }
}

impl fmt::Debug for CustomData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomData")
            .field("format", &self.format)
            .field("example", &self.example)
            .finish_non_exhaustive()
    }
}

/// Descriptor of a single leaf value.
#[derive(Debug, Clone)]
pub enum SimpleData {
    /// `true` / `false`, case-insensitive on read.
    Bool,
    /// 64-bit integer.
    Int,
    /// Finite or infinite double; `NaN` is rejected.
    Double,
    /// Arbitrary escaped text.
    Text,
    /// One of a fixed set of constant names.
    Enum(Arc<[String]>),
    /// Application-defined conversion.
    Custom(CustomData),
}

impl SimpleData {
    pub(crate) fn parse(&self, text: &str) -> Result<StructuredValue, SchemaError> {
        let text = text.trim();
        match self {
            Self::Bool => {
                if text.eq_ignore_ascii_case("true") {
                    Ok(StructuredValue::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(StructuredValue::Bool(false))
                } else {
                    Err(SchemaError::invalid(text, "expected 'true' or 'false'"))
                }
            }
            Self::Int => text
                .parse()
                .map(StructuredValue::Int)
                .map_err(|e: std::num::ParseIntError| SchemaError::invalid(text, e.to_string())),
            Self::Double => match text.parse::<f64>() {
                Ok(value) if value.is_nan() => Err(SchemaError::invalid(text, "NaN is not a number")),
                Ok(value) => Ok(StructuredValue::Double(value)),
                Err(e) => Err(SchemaError::invalid(text, e.to_string())),
            },
            Self::Text => Ok(StructuredValue::Text(unescape(text))),
            Self::Enum(names) => {
                let name = unescape(text);
                names
                    .iter()
                    .find(|candidate| **candidate == name)
                    .or_else(|| names.iter().find(|c| c.eq_ignore_ascii_case(&name)))
                    .map(|found| StructuredValue::Text(found.clone()))
                    .ok_or_else(|| {
                        SchemaError::invalid(text, format!("expected one of [{}]", names.join(", ")))
                    })
            }
            Self::Custom(custom) => {
                (custom.parse)(&unescape(text)).map_err(|reason| SchemaError::invalid(text, reason))
            }
        }
    }

    pub(crate) fn serialize(&self, value: &StructuredValue) -> String {
        let rendered = match self {
            Self::Custom(custom) => (custom.serialize)(value),
            _ => value.to_string(),
        };
        escape_element(&rendered, SPECIALS)
    }

    pub(crate) fn validate(&self, value: &StructuredValue) -> Result<(), SchemaError> {
        let matches = match (self, value) {
            (Self::Bool, StructuredValue::Bool(_))
            | (Self::Int, StructuredValue::Int(_))
            | (Self::Text, StructuredValue::Text(_)) => true,
            (Self::Double, StructuredValue::Double(v)) => !v.is_nan(),
            (Self::Enum(names), StructuredValue::Text(name)) => names.contains(name),
            (Self::Custom(custom), value) => {
                return (custom.parse)(&(custom.serialize)(value))
                    .map(|_| ())
                    .map_err(|reason| SchemaError::invalid(value.to_string(), reason));
            }
            _ => false,
        };
        if matches {
            Ok(())
        } else {
            Err(SchemaError::invalid(
                value.to_string(),
                format!("expected {}", self.format()),
            ))
        }
    }

    pub(crate) fn format(&self) -> String {
        match self {
            Self::Bool => "<bool>".to_string(),
            Self::Int => "<int>".to_string(),
            Self::Double => "<double>".to_string(),
            Self::Text => "<text>".to_string(),
            Self::Enum(names) => format!("<{}>", names.join("|")),
            Self::Custom(custom) => custom.format.clone(),
        }
    }

    pub(crate) fn example(&self) -> StructuredValue {
        match self {
            Self::Bool => StructuredValue::Bool(false),
            Self::Int => StructuredValue::Int(0),
            Self::Double => StructuredValue::Double(0.0),
            Self::Text => StructuredValue::text("text"),
            Self::Enum(names) => StructuredValue::text(names.first().cloned().unwrap_or_default()),
            Self::Custom(custom) => custom.example.clone(),
        }
    }

    pub(crate) fn write(&self, value: &StructuredValue, buffer: &mut dyn WriteBuffer) {
        let fallback;
        let value = if self.validate(value).is_ok() {
            value
        } else {
            fallback = self.example();
            &fallback
        };
        match (self, value) {
            (Self::Bool, StructuredValue::Bool(v)) => buffer.write_bool(*v),
            (Self::Int, StructuredValue::Int(v)) => buffer.write_long(*v),
            (Self::Double, StructuredValue::Double(v)) => buffer.write_double(*v),
            (Self::Enum(_), StructuredValue::Text(v)) => buffer.write_enum(v),
            (Self::Custom(custom), value) => buffer.write_string(&(custom.serialize)(value)),
            (_, value) => buffer.write_string(&value.to_string()),
        }
    }

    pub(crate) fn read(&self, buffer: &mut dyn ReadBuffer) -> Result<StructuredValue, BufferError> {
        Ok(match self {
            Self::Bool => StructuredValue::Bool(buffer.read_bool()?),
            Self::Int => StructuredValue::Int(buffer.read_long()?),
            Self::Double => StructuredValue::Double(buffer.read_double()?),
            Self::Text => StructuredValue::Text(buffer.read_string()?),
            Self::Enum(names) => {
                let borrowed: Vec<&str> = names.iter().map(String::as_str).collect();
                let index = buffer.read_enum(&borrowed)?;
                StructuredValue::Text(names[index].clone())
            }
            Self::Custom(custom) => {
                let text = buffer.read_string()?;
                (custom.parse)(&text).map_err(|reason| BufferError::InvalidValue { reason })?
            }
        })
    }
}
