//! Flat binary encodings for the structured records a drawing-board client
//! and server exchange: credentials, board descriptors, freehand point sets,
//! lines, text, images.
//!
//! Records are independent of framing: a record body may span several wire
//! frames, but encode/decode here always see the complete flat byte
//! sequence. All integers are little-endian i32 slots, matching the peer.

pub mod auth;
pub mod board;
pub mod color;
pub mod draw;
pub mod error;

mod cursor;

use bytes::{Bytes, BytesMut};

pub use auth::{Credentials, MAX_CREDENTIAL_LEN};
pub use board::{BoardDescriptor, BoardId, MAX_TITLE_LEN};
pub use color::Color;
pub use draw::{Image, Line, Point, PointsSet, Text};
pub use error::{RecordError, Result};

/// A record that can be flattened to a body and rebuilt from one.
pub trait Record: Sized {
    /// Append the flat encoding of `self` to `dst`.
    fn encode(&self, dst: &mut BytesMut) -> Result<()>;

    /// Rebuild a record from a complete body. The body must be consumed
    /// exactly; trailing bytes are a decode failure.
    fn decode(body: &[u8]) -> Result<Self>;

    /// Convenience: encode into a fresh buffer.
    fn to_body(&self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }
}
