use crate::midi::error::{MidiError, MidiResult};

/// A forward-only reader over an in-memory byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, offset: 0 }
    }

    /// Return the next `n` bytes and advance past them.
    pub fn read(&mut self, n: usize) -> MidiResult<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(MidiError::Eof {
                position: self.offset,
                requested: n,
                available,
            });
        }
        let bytes = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> MidiResult<u8> {
        Ok(self.read(1)?[0])
    }

    pub fn read_u16_be(&mut self) -> MidiResult<u16> {
        let bytes = self.read(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_be(&mut self) -> MidiResult<u32> {
        let bytes = self.read(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_array<const N: usize>(&mut self) -> MidiResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Decode a variable-length quantity.
    ///
    /// Returns the value and the number of bytes it occupied. At most four
    /// bytes are read; a continuation bit on the fourth byte is ignored.
    pub fn read_var_len(&mut self) -> MidiResult<(u32, usize)> {
        let mut byte = self.read_u8()?;
        let mut count = 1;
        let mut value = 0u32;
        while byte & 0x80 != 0 && count < 4 {
            value = (value << 7) | u32::from(byte & 0x7F);
            byte = self.read_u8()?;
            count += 1;
        }
        value = (value << 7) | u32::from(byte & 0x7F);
        Ok((value, count))
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }
}
