use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::tag::ActionTag;

/// Frame header: tag (4) + index (4) + count (4) + correlation (8) + body size (4).
pub const HEADER_SIZE: usize = 24;

/// Hard cap on one wire frame, header included.
pub const MAX_FRAME_SIZE: usize = 128;

/// Largest body one frame can carry.
pub const MAX_BODY_SIZE: usize = MAX_FRAME_SIZE - HEADER_SIZE;

/// One wire-transmitted unit: header plus a body slice.
///
/// `tag` stays raw so dispatch can decide what to do with values outside the
/// known set. `index`/`count` locate this fragment within its record (or,
/// for batch-style responses, within the batch).
#[derive(Debug, Clone)]
pub struct Frame {
    pub tag: u32,
    pub index: u32,
    pub count: u32,
    pub correlation: i64,
    pub body: Bytes,
}

impl Frame {
    /// The tag as a known action, if it is one.
    pub fn action(&self) -> Option<ActionTag> {
        ActionTag::from_raw(self.tag)
    }

    /// True when this frame completes its record.
    pub fn is_terminal(&self) -> bool {
        self.index + 1 == self.count
    }

    /// The total wire size of this frame (header + body).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.body.len()
    }
}

/// Number of fragments a record body of `len` bytes occupies on the wire.
///
/// An empty record still takes one frame; that empty-body frame doubles as
/// the "no data" sentinel for batch actions.
pub fn fragment_count(len: usize) -> usize {
    len.div_ceil(MAX_BODY_SIZE).max(1)
}

/// Encode one fragment into the wire format.
///
/// Wire format (all fields little-endian):
/// ```text
/// ┌─────────┬─────────┬─────────┬──────────────┬───────────┬────────────────┐
/// │ Tag     │ Index   │ Count   │ Correlation  │ Body size │ Body           │
/// │ (4B)    │ (4B)    │ (4B)    │ (8B)         │ (4B)      │ (≤104 bytes)   │
/// └─────────┴─────────┴─────────┴──────────────┴───────────┴────────────────┘
/// ```
pub fn encode_frame(
    tag: ActionTag,
    correlation: i64,
    index: u32,
    count: u32,
    body: &[u8],
    dst: &mut BytesMut,
) -> Result<()> {
    if body.len() > MAX_BODY_SIZE {
        return Err(FrameError::BodyOutOfRange {
            size: body.len() as i32,
        });
    }
    if count == 0 || index >= count {
        return Err(FrameError::BadFragment { index, count });
    }
    dst.reserve(HEADER_SIZE + body.len());
    dst.put_u32_le(tag.raw());
    dst.put_u32_le(index);
    dst.put_u32_le(count);
    dst.put_i64_le(correlation);
    dst.put_i32_le(body.len() as i32);
    dst.put_slice(body);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes exactly header + body from the buffer. A declared
/// body size outside `0..=MAX_BODY_SIZE` or an impossible fragment position
/// is unrecoverable: the stream has lost framing.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let mut header = &src[..HEADER_SIZE];
    let tag = header.get_u32_le();
    let index = header.get_u32_le();
    let count = header.get_u32_le();
    let correlation = header.get_i64_le();
    let body_size = header.get_i32_le();

    if body_size < 0 || body_size as usize > MAX_BODY_SIZE {
        return Err(FrameError::BodyOutOfRange { size: body_size });
    }
    if count == 0 || index >= count {
        return Err(FrameError::BadFragment { index, count });
    }

    let total = HEADER_SIZE + body_size as usize;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let body = src.split_to(body_size as usize).freeze();

    Ok(Some(Frame {
        tag,
        index,
        count,
        correlation,
        body,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let mut buf = BytesMut::new();
        let body = b"line record body";

        encode_frame(ActionTag::Line, 77, 0, 1, body, &mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE + body.len());

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(frame.action(), Some(ActionTag::Line));
        assert_eq!(frame.index, 0);
        assert_eq!(frame.count, 1);
        assert_eq!(frame.correlation, 77);
        assert_eq!(frame.body.as_ref(), body);
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_incomplete_header() {
        let mut buf = BytesMut::from(&[0u8; HEADER_SIZE - 1][..]);
        assert!(decode_frame(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), HEADER_SIZE - 1);
    }

    #[test]
    fn decode_incomplete_body() {
        let mut buf = BytesMut::new();
        encode_frame(ActionTag::Text, 1, 0, 1, b"hello", &mut buf).unwrap();
        buf.truncate(HEADER_SIZE + 2);

        assert!(decode_frame(&mut buf).unwrap().is_none());
    }

    #[test]
    fn decode_negative_body_size() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(ActionTag::Line.raw());
        buf.put_u32_le(0);
        buf.put_u32_le(1);
        buf.put_i64_le(0);
        buf.put_i32_le(-1);

        let err = decode_frame(&mut buf).unwrap_err();
        assert!(matches!(err, FrameError::BodyOutOfRange { size: -1 }));
        assert!(err.is_fatal_framing());
    }

    #[test]
    fn decode_oversized_body() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(ActionTag::Image.raw());
        buf.put_u32_le(0);
        buf.put_u32_le(1);
        buf.put_i64_le(0);
        buf.put_i32_le(MAX_BODY_SIZE as i32 + 1);

        let err = decode_frame(&mut buf).unwrap_err();
        assert!(matches!(err, FrameError::BodyOutOfRange { .. }));
    }

    #[test]
    fn decode_index_not_below_count() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(ActionTag::Image.raw());
        buf.put_u32_le(2);
        buf.put_u32_le(2);
        buf.put_i64_le(0);
        buf.put_i32_le(0);

        let err = decode_frame(&mut buf).unwrap_err();
        assert!(matches!(err, FrameError::BadFragment { index: 2, count: 2 }));
    }

    #[test]
    fn decode_zero_count() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(ActionTag::Undo.raw());
        buf.put_u32_le(0);
        buf.put_u32_le(0);
        buf.put_i64_le(0);
        buf.put_i32_le(0);

        assert!(matches!(
            decode_frame(&mut buf).unwrap_err(),
            FrameError::BadFragment { count: 0, .. }
        ));
    }

    #[test]
    fn encode_rejects_oversized_body() {
        let mut buf = BytesMut::new();
        let body = vec![0u8; MAX_BODY_SIZE + 1];
        let err = encode_frame(ActionTag::Image, 0, 0, 1, &body, &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::BodyOutOfRange { .. }));
    }

    #[test]
    fn multiple_frames_decode_in_order() {
        let mut buf = BytesMut::new();
        encode_frame(ActionTag::Undo, 1, 0, 1, b"", &mut buf).unwrap();
        encode_frame(ActionTag::Clear, 2, 0, 1, b"", &mut buf).unwrap();

        let f1 = decode_frame(&mut buf).unwrap().unwrap();
        let f2 = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(f1.action(), Some(ActionTag::Undo));
        assert_eq!(f2.action(), Some(ActionTag::Clear));
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_body_frame() {
        let mut buf = BytesMut::new();
        encode_frame(ActionTag::GetBoards, 5, 0, 1, b"", &mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert!(frame.body.is_empty());
        assert!(frame.is_terminal());
    }

    #[test]
    fn unknown_tag_decodes_without_error() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(999);
        buf.put_u32_le(0);
        buf.put_u32_le(1);
        buf.put_i64_le(42);
        buf.put_i32_le(0);

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(frame.tag, 999);
        assert!(frame.action().is_none());
    }

    #[test]
    fn fragment_count_law() {
        assert_eq!(fragment_count(0), 1);
        assert_eq!(fragment_count(1), 1);
        assert_eq!(fragment_count(MAX_BODY_SIZE), 1);
        assert_eq!(fragment_count(MAX_BODY_SIZE + 1), 2);
        assert_eq!(fragment_count(MAX_BODY_SIZE * 3), 3);
        assert_eq!(fragment_count(320), 4);
    }

    #[test]
    fn header_layout_is_24_bytes() {
        assert_eq!(HEADER_SIZE, 4 + 4 + 4 + 8 + 4);
        assert_eq!(MAX_BODY_SIZE, 104);
    }
}
