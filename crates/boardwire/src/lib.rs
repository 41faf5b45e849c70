//! Chunked messaging protocol for collaborative drawing boards.
//!
//! boardwire splits arbitrarily large structured records (credentials,
//! board descriptors, freehand strokes, lines, text, images, control
//! actions) into fixed-capacity 128-byte wire frames over one ordered TCP
//! stream, reassembles them on the far side, and dispatches completed
//! records to application callbacks by action tag.
//!
//! # Crate Structure
//!
//! - [`frame`] — Fixed-capacity frame codec, incremental stream reader,
//!   fragmenting writer
//! - [`record`] — Flat binary codecs for the drawing-board record types
//! - [`session`] — Reassembly, dispatch, client and server connection
//!   management

/// Re-export frame types.
pub mod frame {
    pub use boardwire_frame::*;
}

/// Re-export record types.
pub mod record {
    pub use boardwire_record::*;
}

/// Re-export session types.
pub mod session {
    pub use boardwire_session::*;
}
