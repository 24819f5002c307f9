//! Length-prefixed byte segments.
//!
//! A segment is `[length: u32 big-endian][raw bytes]`. Every variable-length
//! field the serialisers and row keys write is framed this way.

use crate::error::SerialisationError;

/// Size of the length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Append `bytes` to `buf` as one segment.
///
/// # Errors
///
/// Returns [`SerialisationError::Encoding`] if `bytes` is longer than `u32::MAX`.
pub fn write_segment(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), SerialisationError> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| SerialisationError::Encoding("segment too long".to_owned()))?;
    buf.reserve(LENGTH_PREFIX_LEN + bytes.len());
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// A cursor over segment-framed input. Reads borrow from the input.
#[derive(Debug, Clone)]
pub struct SegmentReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> SegmentReader<'a> {
    /// Start reading at the beginning of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Read one segment. `reading` names the field for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if the prefix or body is truncated.
    pub fn read_segment(&mut self, reading: &str) -> Result<&'a [u8], SerialisationError> {
        let rest = self.remaining();
        if rest.len() < LENGTH_PREFIX_LEN {
            return Err(SerialisationError::truncated(reading));
        }
        let len_bytes: [u8; LENGTH_PREFIX_LEN] = rest[..LENGTH_PREFIX_LEN]
            .try_into()
            .map_err(|_| SerialisationError::truncated(reading))?;
        let len = usize::try_from(u32::from_be_bytes(len_bytes)).map_err(|_| {
            SerialisationError::Decode("segment length exceeds platform capacity".to_owned())
        })?;
        let end = LENGTH_PREFIX_LEN
            .checked_add(len)
            .filter(|end| *end <= rest.len())
            .ok_or_else(|| SerialisationError::truncated(reading))?;
        self.offset += end;
        Ok(&rest[LENGTH_PREFIX_LEN..end])
    }

    /// Read one byte.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] at end of input.
    pub fn read_u8(&mut self, reading: &str) -> Result<u8, SerialisationError> {
        let b = *self.remaining().first().ok_or_else(|| SerialisationError::truncated(reading))?;
        self.offset += 1;
        Ok(b)
    }

    /// The unread bytes.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }

    /// Returns `true` when every byte has been read.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Fails if unread bytes remain after `reading`.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] naming the number of trailing bytes.
    pub fn finish(&self, reading: &str) -> Result<(), SerialisationError> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(SerialisationError::decode_with_bytes(
                format!("{} trailing bytes after {reading}", self.remaining().len()),
                self.remaining(),
            ))
        }
    }
}
