use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{encode_frame, fragment_count, Frame, MAX_BODY_SIZE};
use crate::error::{FrameError, Result};
use crate::tag::ActionTag;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Largest record body the fragment-count field can describe.
const MAX_RECORD_SIZE: usize = MAX_BODY_SIZE * u32::MAX as usize;

/// Writes records to any `Write` stream, fragmenting as needed.
///
/// A record body is split into `ceil(len / MAX_BODY_SIZE)` fragments sharing
/// one correlation id, written strictly in index order. A zero-length body
/// still produces exactly one empty-body frame — the "no data" sentinel.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Fragment and send one record. Returns the number of frames written.
    pub fn send_record(&mut self, tag: ActionTag, correlation: i64, body: &[u8]) -> Result<u32> {
        if body.len() > MAX_RECORD_SIZE {
            return Err(FrameError::RecordTooLarge {
                size: body.len(),
                max: MAX_RECORD_SIZE,
            });
        }

        let count = fragment_count(body.len()) as u32;

        self.buf.clear();
        if body.is_empty() {
            encode_frame(tag, correlation, 0, 1, b"", &mut self.buf)?;
        } else {
            for (index, chunk) in body.chunks(MAX_BODY_SIZE).enumerate() {
                encode_frame(tag, correlation, index as u32, count, chunk, &mut self.buf)?;
            }
        }

        self.write_buffered()?;
        self.flush()?;
        Ok(count)
    }

    /// Write one already-built frame.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let tag = frame.action().ok_or(FrameError::UnknownTag(frame.tag))?;
        self.buf.clear();
        encode_frame(
            tag,
            frame.correlation,
            frame.index,
            frame.count,
            frame.body.as_ref(),
            &mut self.buf,
        )?;
        self.write_buffered()?;
        self.flush()
    }

    fn write_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
