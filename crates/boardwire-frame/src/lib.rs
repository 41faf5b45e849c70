//! Fixed-capacity wire framing for the boardwire protocol.
//!
//! Every frame is a 24-byte little-endian header followed by a body of at
//! most [`MAX_BODY_SIZE`] bytes:
//! - action tag (4 bytes)
//! - fragment index (4 bytes)
//! - fragment count (4 bytes)
//! - correlation id (8 bytes)
//! - body size (4 bytes)
//!
//! Records larger than one body are split across fragments sharing a
//! correlation id; reassembly lives one layer up in `boardwire-session`.
//! No partial reads, no buffer management in user code.

pub mod codec;
pub mod error;
pub mod reader;
pub mod tag;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, fragment_count, Frame, HEADER_SIZE, MAX_BODY_SIZE, MAX_FRAME_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::{FrameReader, StreamDecoder};
pub use tag::ActionTag;
pub use writer::FrameWriter;
