use std::collections::HashMap;

use crate::error::BytesError;

/// Size of an ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Default number of times a single position may be read.
pub const DEFAULT_READ_LIMIT: usize = 8_192;

/// A read cursor over a byte slice with bounds checking.
///
/// Besides bounds, the cursor counts how often each position is read. A
/// decoder that follows offsets can be pointed back at the same bytes over
/// and over by crafted input; the read limit turns that into an error
/// instead of unbounded work.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
    read_limit: usize,
    read_counts: HashMap<usize, usize>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at position 0 with [`DEFAULT_READ_LIMIT`].
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_read_limit(bytes, DEFAULT_READ_LIMIT)
    }

    /// Creates a cursor with a custom per-position read limit.
    pub fn with_read_limit(bytes: &'a [u8], read_limit: usize) -> Self {
        Self {
            bytes,
            position: 0,
            read_limit,
            read_counts: HashMap::new(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the current position and the end.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Moves the cursor. Positioning exactly at the end is allowed.
    pub fn set_position(&mut self, position: usize) -> Result<(), BytesError> {
        if position > self.bytes.len() {
            return Err(self.out_of_bounds(position));
        }
        self.position = position;
        Ok(())
    }

    /// Returns the next byte without advancing.
    pub fn peek_u8(&self) -> Result<u8, BytesError> {
        self.bytes
            .get(self.position)
            .copied()
            .ok_or_else(|| self.out_of_bounds(self.position))
    }

    pub fn read_u8(&mut self) -> Result<u8, BytesError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Reads `len` bytes and advances past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], BytesError> {
        self.read_bytes_padded(len, len)
    }

    /// Reads `len` bytes but advances by `advance` bytes.
    ///
    /// Used for padded payloads, where `len` bytes of content occupy a
    /// larger word-aligned slot.
    pub fn read_bytes_padded(&mut self, len: usize, advance: usize) -> Result<&'a [u8], BytesError> {
        self.check_read_limit()?;

        let end = self
            .position
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| self.out_of_bounds(self.position.saturating_add(len)))?;
        let data = &self.bytes[self.position..end];

        self.position = self
            .position
            .checked_add(advance.max(len))
            .map(|p| p.min(self.bytes.len()))
            .unwrap_or(self.bytes.len());
        Ok(data)
    }

    /// Reads one 32-byte word.
    pub fn read_word(&mut self) -> Result<[u8; WORD_SIZE], BytesError> {
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(self.read_bytes(WORD_SIZE)?);
        Ok(word)
    }

    fn check_read_limit(&mut self) -> Result<(), BytesError> {
        let count = self.read_counts.entry(self.position).or_insert(0);
        *count += 1;
        if *count > self.read_limit {
            return Err(BytesError::RecursiveReadLimitExceeded {
                limit: self.read_limit,
                position: self.position,
            });
        }
        Ok(())
    }

    fn out_of_bounds(&self, position: usize) -> BytesError {
        BytesError::PositionOutOfBounds {
            position,
            length: self.bytes.len(),
        }
    }
}

/// A write cursor over a pre-sized mutable buffer.
///
/// Writers size the buffer up front and may jump back to fill slots they
/// reserved earlier.
#[derive(Debug)]
pub struct CursorMut<'a> {
    bytes: &'a mut [u8],
    position: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), BytesError> {
        if position > self.bytes.len() {
            return Err(BytesError::PositionOutOfBounds {
                position,
                length: self.bytes.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), BytesError> {
        self.write_bytes(&[value])
    }

    /// Writes `data` at the current position and advances past it.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), BytesError> {
        let end = self.position + data.len();
        if end > self.bytes.len() {
            return Err(BytesError::PositionOutOfBounds {
                position: end,
                length: self.bytes.len(),
            });
        }
        self.bytes[self.position..end].copy_from_slice(data);
        self.position = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let data = [1u8, 2, 3, 4];
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_eq!(cursor.read_bytes(2).unwrap(), &[2, 3]);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [7u8];
        let cursor = Cursor::new(&data);
        assert_eq!(cursor.peek_u8().unwrap(), 7);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_past_end_fails() {
        let data = [1u8, 2];
        let mut cursor = Cursor::new(&data);
        let err = cursor.read_bytes(3).unwrap_err();
        assert_eq!(
            err,
            BytesError::PositionOutOfBounds {
                position: 3,
                length: 2
            }
        );
        // A failed read leaves the cursor where it was.
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn set_position_to_end_is_allowed() {
        let data = [0u8; 4];
        let mut cursor = Cursor::new(&data);
        cursor.set_position(4).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.set_position(5).is_err());
        assert!(cursor.peek_u8().is_err());
    }

    #[test]
    fn padded_read_skips_padding() {
        let data = [0xaau8, 0xbb, 0, 0, 0xcc];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_bytes_padded(2, 4).unwrap(), &[0xaa, 0xbb]);
        assert_eq!(cursor.read_u8().unwrap(), 0xcc);
    }

    #[test]
    fn read_word() {
        let mut data = [0u8; 40];
        data[31] = 9;
        let mut cursor = Cursor::new(&data);
        let word = cursor.read_word().unwrap();
        assert_eq!(word[31], 9);
        assert_eq!(cursor.position(), 32);
        assert!(cursor.read_word().is_err());
    }

    #[test]
    fn read_limit_is_enforced_per_position() {
        let data = [0u8; 2];
        let mut cursor = Cursor::with_read_limit(&data, 2);

        for _ in 0..2 {
            cursor.set_position(0).unwrap();
            cursor.read_u8().unwrap();
        }
        cursor.set_position(0).unwrap();
        assert_eq!(
            cursor.read_u8().unwrap_err(),
            BytesError::RecursiveReadLimitExceeded {
                limit: 2,
                position: 0
            }
        );

        // Other positions keep their own budget.
        cursor.set_position(1).unwrap();
        assert!(cursor.read_u8().is_ok());
    }

    #[test]
    fn write_cursor_backfills_reserved_slot() {
        let mut buf = [0u8; 4];
        let mut cursor = CursorMut::new(&mut buf);

        cursor.set_position(2).unwrap();
        cursor.write_bytes(&[3, 4]).unwrap();
        cursor.set_position(0).unwrap();
        cursor.write_u8(1).unwrap();
        cursor.write_u8(2).unwrap();

        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn write_past_end_fails() {
        let mut buf = [0u8; 2];
        let mut cursor = CursorMut::new(&mut buf);
        assert!(cursor.write_bytes(&[1, 2, 3]).is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.remaining(), 2);
    }
}
