//! Binary read/write buffer contract used by the sync path.
//!
//! Entries never talk to a socket; an external sync layer hands them a
//! [`WriteBuffer`] or [`ReadBuffer`] and ships the bytes. [`PacketBuffer`] is the
//! in-memory implementation backed by [`bytes::BytesMut`].
//!
//! Both traits are object safe so entry types can take `&mut dyn WriteBuffer`.

mod packet;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use packet::PacketBuffer;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while reading from a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Not enough bytes left for the requested read.
    #[error("Buffer underflow: needed {needed} byte(s), {remaining} remaining")]
    Underflow {
        /// Bytes required by the read.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A var-int used more than five bytes.
    #[error("Var-int is too long")]
    VarIntTooLong,

    /// A length prefix was negative.
    #[error("Negative length prefix: {0}")]
    NegativeLength(i32),

    /// String bytes were not valid UTF-8.
    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A `char` was not a valid Unicode scalar value.
    #[error("Invalid char code point: {0:#x}")]
    InvalidChar(u32),

    /// An enum name did not match any known constant.
    #[error("Unknown enum constant '{name}'")]
    UnknownVariant {
        /// The name that was read.
        name: String,
    },

    /// Well-formed bytes decoded to a value the reader rejects.
    #[error("Invalid value in buffer: {reason}")]
    InvalidValue {
        /// Why the value was rejected.
        reason: String,
    },
}

/// Ordered primitive writes.
pub trait WriteBuffer {
    /// Writes a boolean as one byte.
    fn write_bool(&mut self, value: bool);

    /// Writes a single byte.
    fn write_byte(&mut self, value: u8);

    /// Writes a big-endian 16-bit integer.
    fn write_short(&mut self, value: i16);

    /// Writes the low 24 bits of `value`, big-endian.
    fn write_medium(&mut self, value: i32);

    /// Writes a big-endian 32-bit integer.
    fn write_int(&mut self, value: i32);

    /// Writes a variable-length integer (7 bits per byte, at most 5 bytes).
    fn write_var_int(&mut self, value: i32);

    /// Writes a big-endian 32-bit float.
    fn write_float(&mut self, value: f32);

    /// Writes a big-endian 64-bit float.
    fn write_double(&mut self, value: f64);

    /// Writes a big-endian 64-bit integer.
    fn write_long(&mut self, value: i64);

    /// Writes a Unicode scalar value.
    fn write_char(&mut self, value: char);

    /// Writes a var-int length followed by raw bytes.
    fn write_bytes(&mut self, value: &[u8]);

    /// Writes a var-int length followed by UTF-8 bytes.
    fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Writes an enum constant by name.
    fn write_enum(&mut self, name: &str) {
        self.write_string(name);
    }

    /// Writes a UUID as two big-endian longs.
    fn write_uuid(&mut self, value: Uuid) {
        let (most, least) = value.as_u64_pair();
        self.write_long(i64::from_be_bytes(most.to_be_bytes()));
        self.write_long(i64::from_be_bytes(least.to_be_bytes()));
    }
}

/// Ordered primitive reads, mirroring [`WriteBuffer`].
pub trait ReadBuffer {
    /// Reads a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if the buffer is exhausted.
    fn read_bool(&mut self) -> Result<bool, BufferError>;

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if the buffer is exhausted.
    fn read_byte(&mut self) -> Result<u8, BufferError>;

    /// Reads a big-endian 16-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 2 bytes remain.
    fn read_short(&mut self) -> Result<i16, BufferError>;

    /// Reads a sign-extended 24-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 3 bytes remain.
    fn read_medium(&mut self) -> Result<i32, BufferError>;

    /// Reads a big-endian 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 4 bytes remain.
    fn read_int(&mut self) -> Result<i32, BufferError>;

    /// Reads a variable-length integer.
    ///
    /// # Errors
    ///
    /// Returns an error on underflow or if the encoding exceeds 5 bytes.
    fn read_var_int(&mut self) -> Result<i32, BufferError>;

    /// Reads a big-endian 32-bit float.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 4 bytes remain.
    fn read_float(&mut self) -> Result<f32, BufferError>;

    /// Reads a big-endian 64-bit float.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 8 bytes remain.
    fn read_double(&mut self) -> Result<f64, BufferError>;

    /// Reads a big-endian 64-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 8 bytes remain.
    fn read_long(&mut self) -> Result<i64, BufferError>;

    /// Reads a Unicode scalar value.
    ///
    /// # Errors
    ///
    /// Returns an error on underflow or an invalid code point.
    fn read_char(&mut self) -> Result<char, BufferError>;

    /// Reads a length-prefixed byte string.
    ///
    /// # Errors
    ///
    /// Returns an error on underflow or a negative length.
    fn read_bytes(&mut self) -> Result<Vec<u8>, BufferError>;

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error on underflow or invalid UTF-8.
    fn read_string(&mut self) -> Result<String, BufferError> {
        Ok(String::from_utf8(self.read_bytes()?)?)
    }

    /// Reads an enum constant by name and returns its index in `names`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::UnknownVariant`] if the name is not in `names`.
    fn read_enum(&mut self, names: &[&str]) -> Result<usize, BufferError> {
        let name = self.read_string()?;
        names
            .iter()
            .position(|candidate| *candidate == name)
            .ok_or(BufferError::UnknownVariant { name })
    }

    /// Reads a UUID written by [`WriteBuffer::write_uuid`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than 16 bytes remain.
    fn read_uuid(&mut self) -> Result<Uuid, BufferError> {
        let most = u64::from_be_bytes(self.read_long()?.to_be_bytes());
        let least = u64::from_be_bytes(self.read_long()?.to_be_bytes());
        Ok(Uuid::from_u64_pair(most, least))
    }
}
