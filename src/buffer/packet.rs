//! In-memory buffer implementation.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{BufferError, ReadBuffer, WriteBuffer};

/// Maximum encoded size of a 32-bit var-int.
const VAR_INT_MAX_BYTES: usize = 5;

/// Growable byte buffer implementing both buffer traits.
///
/// Writes append at the end, reads consume from the front, so a buffer filled
/// by one side can be handed to the other unchanged.
///
/// # Example
///
/// ```
/// use structcfg::buffer::{PacketBuffer, ReadBuffer, WriteBuffer};
///
/// let mut buffer = PacketBuffer::new();
/// buffer.write_var_int(300);
/// buffer.write_string("hello");
///
/// assert_eq!(buffer.read_var_int().unwrap(), 300);
/// assert_eq!(buffer.read_string().unwrap(), "hello");
/// assert!(buffer.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketBuffer {
    inner: BytesMut,
}

impl PacketBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already received bytes for reading.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            inner: BytesMut::from(bytes),
        }
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if nothing is left to read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Freezes the unread bytes into an immutable handle.
    #[must_use]
    pub fn freeze(self) -> Bytes {
        self.inner.freeze()
    }

    fn ensure(&self, needed: usize) -> Result<(), BufferError> {
        let remaining = self.inner.remaining();
        if remaining < needed {
            return Err(BufferError::Underflow { needed, remaining });
        }
        Ok(())
    }
}

impl WriteBuffer for PacketBuffer {
    fn write_bool(&mut self, value: bool) {
        self.inner.put_u8(u8::from(value));
    }

    fn write_byte(&mut self, value: u8) {
        self.inner.put_u8(value);
    }

    fn write_short(&mut self, value: i16) {
        self.inner.put_i16(value);
    }

    fn write_medium(&mut self, value: i32) {
        let bytes = value.to_be_bytes();
        self.inner.put_slice(&bytes[1..]);
    }

    fn write_int(&mut self, value: i32) {
        self.inner.put_i32(value);
    }

    fn write_var_int(&mut self, value: i32) {
        let mut remaining = u32::from_be_bytes(value.to_be_bytes());
        loop {
            let low = (remaining & 0x7F) as u8;
            remaining >>= 7;
            if remaining == 0 {
                self.inner.put_u8(low);
                return;
            }
            self.inner.put_u8(low | 0x80);
        }
    }

    fn write_float(&mut self, value: f32) {
        self.inner.put_f32(value);
    }

    fn write_double(&mut self, value: f64) {
        self.inner.put_f64(value);
    }

    fn write_long(&mut self, value: i64) {
        self.inner.put_i64(value);
    }

    fn write_char(&mut self, value: char) {
        self.inner.put_u32(u32::from(value));
    }

    fn write_bytes(&mut self, value: &[u8]) {
        // The var-int prefix caps payloads at i32::MAX bytes.
        let length = value.len().min(i32::MAX as usize);
        self.write_var_int(i32::try_from(length).unwrap_or(i32::MAX));
        self.inner.put_slice(&value[..length]);
    }
}

impl ReadBuffer for PacketBuffer {
    fn read_bool(&mut self) -> Result<bool, BufferError> {
        Ok(self.read_byte()? != 0)
    }

    fn read_byte(&mut self) -> Result<u8, BufferError> {
        self.ensure(1)?;
        Ok(self.inner.get_u8())
    }

    fn read_short(&mut self) -> Result<i16, BufferError> {
        self.ensure(2)?;
        Ok(self.inner.get_i16())
    }

    fn read_medium(&mut self) -> Result<i32, BufferError> {
        self.ensure(3)?;
        let mut bytes = [0u8; 4];
        self.inner.copy_to_slice(&mut bytes[1..]);
        // Shift up then back down to sign-extend the 24-bit value.
        Ok(i32::from_be_bytes(bytes) << 8 >> 8)
    }

    fn read_int(&mut self) -> Result<i32, BufferError> {
        self.ensure(4)?;
        Ok(self.inner.get_i32())
    }

    fn read_var_int(&mut self) -> Result<i32, BufferError> {
        let mut result = 0u32;
        for index in 0..VAR_INT_MAX_BYTES {
            let byte = self.read_byte()?;
            result |= u32::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(i32::from_be_bytes(result.to_be_bytes()));
            }
        }
        Err(BufferError::VarIntTooLong)
    }

    fn read_float(&mut self) -> Result<f32, BufferError> {
        self.ensure(4)?;
        Ok(self.inner.get_f32())
    }

    fn read_double(&mut self) -> Result<f64, BufferError> {
        self.ensure(8)?;
        Ok(self.inner.get_f64())
    }

    fn read_long(&mut self) -> Result<i64, BufferError> {
        self.ensure(8)?;
        Ok(self.inner.get_i64())
    }

    fn read_char(&mut self) -> Result<char, BufferError> {
        self.ensure(4)?;
        let code = self.inner.get_u32();
        char::from_u32(code).ok_or(BufferError::InvalidChar(code))
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, BufferError> {
        let length = self.read_var_int()?;
        let length = usize::try_from(length).map_err(|_| BufferError::NegativeLength(length))?;
        self.ensure(length)?;
        Ok(self.inner.split_to(length).to_vec())
    }
}
