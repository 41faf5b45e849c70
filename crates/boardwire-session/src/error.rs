/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Frame-level error. Malformed framing is fatal for the connection.
    #[error("frame error: {0}")]
    Frame(#[from] boardwire_frame::FrameError),

    /// A completed record body failed to decode.
    #[error("record error: {0}")]
    Record(#[from] boardwire_record::RecordError),

    /// An I/O error on the underlying stream.
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation requires a live connection.
    #[error("not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, SessionError>;
