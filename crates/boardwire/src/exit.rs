use std::fmt;
use std::io;

use boardwire_frame::FrameError;
use boardwire_session::SessionError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        FrameError::RecordTooLarge { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::Frame(err) => frame_error(context, err),
        SessionError::Record(err) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        SessionError::Io(source) => io_error(context, source),
        SessionError::NotConnected => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_connection_maps_to_failure() {
        let err = io_error(
            "connect failed",
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("connect failed"));
    }

    #[test]
    fn malformed_frame_maps_to_data_invalid() {
        let err = frame_error("receive failed", FrameError::BodyOutOfRange { size: -1 });
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn oversized_record_maps_to_usage() {
        let err = frame_error(
            "send failed",
            FrameError::RecordTooLarge { size: 10, max: 5 },
        );
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn not_connected_maps_to_failure() {
        let err = session_error("send failed", SessionError::NotConnected);
        assert_eq!(err.code, FAILURE);
    }
}
