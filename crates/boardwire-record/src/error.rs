/// Errors that can occur while encoding or decoding record bodies.
///
/// Distinct from framing errors: a malformed record body does not mean the
/// byte stream lost synchronization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    /// The body ended before the record did.
    #[error("record body truncated (wanted {wanted} bytes, {available} available)")]
    Truncated { wanted: usize, available: usize },

    /// A declared length field is negative.
    #[error("negative {field} length: {value}")]
    NegativeLength { field: &'static str, value: i32 },

    /// A variable field exceeds its fixed slot or cap.
    #[error("{field} too long ({len} bytes, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A text field is not valid UTF-8.
    #[error("invalid utf-8 in {field}")]
    Utf8 { field: &'static str },

    /// Bytes left over after the record was fully decoded.
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

pub type Result<T> = std::result::Result<T, RecordError>;
