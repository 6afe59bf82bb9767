use crate::error::Result;
use byteorder::{ByteOrder, LittleEndian};

//===========================================================================//

/// Bounds-checked little-endian reads at arbitrary offsets of an ICO buffer.
/// Out-of-range reads are reported as malformed image data, tagged with the
/// display name of the file.
#[derive(Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    name: &'a str,
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(name: &'a str, data: &'a [u8]) -> ByteReader<'a> {
        ByteReader { name, data }
    }

    /// Returns the display name used in error messages.
    pub(crate) fn name(&self) -> &'a str {
        self.name
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the `len` bytes starting at `offset`.
    pub(crate) fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(&self.data[offset..end]),
            _ => malformed!(
                self.name,
                "Read of {} bytes at offset {} is out of bounds \
                 (buffer is {} bytes)",
                len,
                offset,
                self.data.len()
            ),
        }
    }

    pub(crate) fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub(crate) fn read_u16(&self, offset: usize) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.slice(offset, 2)?))
    }

    pub(crate) fn read_u32(&self, offset: usize) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.slice(offset, 4)?))
    }

    pub(crate) fn read_i32(&self, offset: usize) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.slice(offset, 4)?))
    }
}

//===========================================================================//


//===========================================================================//
