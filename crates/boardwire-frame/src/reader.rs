use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{decode_frame, Frame};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Push-based frame extraction for event-driven transports.
///
/// Holds a persistent cursor into the not-yet-consumed bytes, so a short
/// read never loses data: push whatever arrived with [`extend`](Self::extend)
/// and drain complete frames with [`next_frame`](Self::next_frame). A single
/// "data arrived" notification may yield many frames, or none.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buf: BytesMut,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Append bytes received from the transport.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Take the next complete frame, or `Ok(None)` to wait for more data.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        decode_frame(&mut self.buf)
    }

    /// Bytes buffered but not yet consumed as frames.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Drop all buffered bytes. Used on connection teardown.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

/// Reads complete frames from any `Read` stream, blocking.
///
/// The server-side counterpart of [`StreamDecoder`]: partial reads are
/// handled internally, callers always get complete frames.
pub struct FrameReader<T> {
    inner: T,
    decoder: StreamDecoder,
}

impl<T: Read> FrameReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            decoder: StreamDecoder::new(),
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = self.decoder.next_frame()? {
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.decoder.extend(&chunk[..read]);
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

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::codec::{encode_frame, HEADER_SIZE, MAX_BODY_SIZE};
    use crate::tag::ActionTag;

    fn wire_with(records: &[(ActionTag, i64, &[u8])]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        for (tag, correlation, body) in records {
            encode_frame(*tag, *correlation, 0, 1, body, &mut wire).unwrap();
        }
        wire.to_vec()
    }

    #[test]
    fn decoder_yields_nothing_until_complete() {
        let wire = wire_with(&[(ActionTag::Line, 9, b"body")]);
        let mut decoder = StreamDecoder::new();

        decoder.extend(&wire[..HEADER_SIZE - 1]);
        assert!(decoder.next_frame().unwrap().is_none());

        decoder.extend(&wire[HEADER_SIZE - 1..HEADER_SIZE + 2]);
        assert!(decoder.next_frame().unwrap().is_none());

        decoder.extend(&wire[HEADER_SIZE + 2..]);
        let frame = decoder.next_frame().unwrap().unwrap();
        assert_eq!(frame.action(), Some(ActionTag::Line));
        assert_eq!(frame.body.as_ref(), b"body");
    }

    #[test]
    fn byte_at_a_time_equals_all_at_once() {
        let wire = wire_with(&[
            (ActionTag::PointsSet, 1, &[0xAA; MAX_BODY_SIZE]),
            (ActionTag::Undo, 2, b""),
            (ActionTag::Text, 3, b"hi"),
        ]);

        let mut all_at_once = StreamDecoder::new();
        all_at_once.extend(&wire);
        let mut expected = Vec::new();
        while let Some(frame) = all_at_once.next_frame().unwrap() {
            expected.push((frame.tag, frame.correlation, frame.body));
        }

        let mut trickled = StreamDecoder::new();
        let mut got = Vec::new();
        for byte in &wire {
            trickled.extend(std::slice::from_ref(byte));
            while let Some(frame) = trickled.next_frame().unwrap() {
                got.push((frame.tag, frame.correlation, frame.body));
            }
        }

        assert_eq!(expected.len(), 3);
        assert_eq!(got, expected);
    }

    #[test]
    fn one_notification_many_frames() {
        let wire = wire_with(&[
            (ActionTag::Undo, 1, b""),
            (ActionTag::Clear, 2, b""),
            (ActionTag::Line, 3, b"abc"),
        ]);

        let mut decoder = StreamDecoder::new();
        decoder.extend(&wire);

        let mut count = 0;
        while decoder.next_frame().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn reset_discards_partial_state() {
        let wire = wire_with(&[(ActionTag::Image, 4, b"pixels")]);
        let mut decoder = StreamDecoder::new();
        decoder.extend(&wire[..10]);

        decoder.reset();
        assert_eq!(decoder.buffered(), 0);
        assert!(decoder.next_frame().unwrap().is_none());
    }

    #[test]
    fn decoder_surfaces_malformed_framing() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(ActionTag::Line.raw());
        wire.put_u32_le(0);
        wire.put_u32_le(1);
        wire.put_i64_le(0);
        wire.put_i32_le(-5);

        let mut decoder = StreamDecoder::new();
        decoder.extend(&wire);
        assert!(matches!(
            decoder.next_frame().unwrap_err(),
            FrameError::BodyOutOfRange { size: -5 }
        ));
    }

    #[test]
    fn reader_single_frame() {
        let wire = wire_with(&[(ActionTag::Text, 5, b"hello")]);
        let mut reader = FrameReader::new(Cursor::new(wire));

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.action(), Some(ActionTag::Text));
        assert_eq!(frame.body.as_ref(), b"hello");
    }

    #[test]
    fn reader_partial_reads() {
        let wire = wire_with(&[(ActionTag::Line, 6, b"slow")]);
        let mut reader = FrameReader::new(ByteByByteReader { bytes: wire, pos: 0 });

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.body.as_ref(), b"slow");
    }

    #[test]
    fn reader_eof_is_connection_closed() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            reader.read_frame().unwrap_err(),
            FrameError::ConnectionClosed
        ));
    }

    #[test]
    fn reader_eof_mid_frame() {
        let mut wire = wire_with(&[(ActionTag::Image, 7, b"truncated")]);
        wire.truncate(HEADER_SIZE + 3);

        let mut reader = FrameReader::new(Cursor::new(wire));
        assert!(matches!(
            reader.read_frame().unwrap_err(),
            FrameError::ConnectionClosed
        ));
    }

    #[test]
    fn reader_retries_interrupted() {
        let wire = wire_with(&[(ActionTag::Undo, 8, b"")]);
        let mut reader = FrameReader::new(InterruptedThenData {
            interrupted: false,
            bytes: wire,
            pos: 0,
        });

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.action(), Some(ActionTag::Undo));
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
