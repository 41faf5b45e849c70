use crate::error::{RecordError, Result};

/// Bounds-checked reader over a record body.
pub(crate) struct BodyCursor<'a> {
    body: &'a [u8],
    pos: usize,
}

impl<'a> BodyCursor<'a> {
    pub(crate) fn new(body: &'a [u8]) -> Self {
        Self { body, pos: 0 }
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.body.len() - self.pos;
        if len > available {
            return Err(RecordError::Truncated {
                wanted: len,
                available,
            });
        }
        let slice = &self.body[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn take_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// A declared element or byte count; rejects negative values.
    pub(crate) fn take_len(&mut self, field: &'static str) -> Result<usize> {
        let value = self.take_i32()?;
        if value < 0 {
            return Err(RecordError::NegativeLength { field, value });
        }
        Ok(value as usize)
    }

    /// Fail unless the whole body was consumed.
    pub(crate) fn finish(self) -> Result<()> {
        let left = self.body.len() - self.pos;
        if left != 0 {
            return Err(RecordError::TrailingBytes(left));
        }
        Ok(())
    }
}
