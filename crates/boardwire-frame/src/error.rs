use crate::codec::MAX_BODY_SIZE;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The header declares a body size that is negative or over the cap.
    ///
    /// Framing cannot be resynchronized once this happens; callers are
    /// expected to drop the connection.
    #[error("malformed frame: declared body size {size} (max {MAX_BODY_SIZE})")]
    BodyOutOfRange { size: i32 },

    /// The header declares an impossible fragment position.
    #[error("malformed frame: fragment {index} of {count}")]
    BadFragment { index: u32, count: u32 },

    /// A record body handed to the writer exceeds what its fragment count
    /// can carry.
    #[error("record too large ({size} bytes, max {max})")]
    RecordTooLarge { size: usize, max: usize },

    /// A frame handed to the writer carries a tag outside the closed set.
    #[error("unknown action tag {0}")]
    UnknownTag(u32),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was transferred.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True when the stream is beyond recovery and must be torn down.
    pub fn is_fatal_framing(&self) -> bool {
        matches!(
            self,
            FrameError::BodyOutOfRange { .. } | FrameError::BadFragment { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
