use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{VoxError, VoxResult};

/// Sequential little-endian reader over a borrowed byte slice.
///
/// Every successful read advances the offset by exactly the number of bytes
/// consumed. A read that does not fit fails with
/// [`VoxError::UnexpectedEndOfData`] and leaves the offset unchanged.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Absolute offset of the next byte to be read.
    #[must_use]
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.inner.position() as usize
    }

    /// Length of the whole source slice, consumed bytes included.
    #[must_use]
    #[inline(always)]
    pub fn source_len(&self) -> usize {
        self.inner.get_ref().len()
    }

    #[must_use]
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.source_len().saturating_sub(self.offset())
    }

    /// `true` once every byte has been consumed.
    #[must_use]
    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    #[inline(always)]
    fn ensure(&self, needed: usize) -> VoxResult<()> {
        let available = self.remaining();
        if needed > available {
            return Err(VoxError::UnexpectedEndOfData {
                offset: self.offset(),
                needed,
                available,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> VoxResult<u8> {
        self.ensure(1)?;
        Ok(self.inner.read_u8()?)
    }

    pub fn read_u32(&mut self) -> VoxResult<u32> {
        self.ensure(4)?;
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    pub fn read_i32(&mut self) -> VoxResult<i32> {
        self.ensure(4)?;
        Ok(self.inner.read_i32::<LittleEndian>()?)
    }

    /// Reads a `u32` length field as `usize`.
    pub fn read_len(&mut self) -> VoxResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Borrows the next `len` bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> VoxResult<&'a [u8]> {
        self.ensure(len)?;
        let start = self.offset();
        let data: &'a [u8] = *self.inner.get_ref();
        self.inner.set_position((start + len) as u64);
        Ok(&data[start..start + len])
    }

    /// Reads a fixed four-byte span, as used by magic values and chunk tags.
    pub fn read_tag(&mut self) -> VoxResult<[u8; 4]> {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(self.read_bytes(4)?);
        Ok(tag)
    }

    /// Reads `len` bytes as text. Invalid UTF-8 is replaced, not rejected.
    pub fn read_string(&mut self, len: usize) -> VoxResult<String> {
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn skip(&mut self, len: usize) -> VoxResult<()> {
        self.read_bytes(len).map(|_| ())
    }
}
