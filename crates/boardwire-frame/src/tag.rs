//! Action tags.
//!
//! The closed set of operations both peers understand. Tags travel as a raw
//! `u32` in the frame header; [`Frame`](crate::Frame) keeps the raw value so
//! an unknown tag can be logged and dropped at dispatch instead of killing
//! the stream.

/// Operation carried by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ActionTag {
    /// Server-side failure notification.
    Error = 0,
    LogIn = 1,
    Register = 2,
    Shutdown = 3,
    CreateBoard = 4,
    GetBoard = 5,
    GetBoards = 6,
    DeleteBoard = 7,
    PointsSet = 8,
    Line = 9,
    Text = 10,
    Image = 11,
    Undo = 12,
    SelectBoard = 13,
    GetBoardElements = 14,
    Clear = 15,
}

impl ActionTag {
    /// Map a raw header value back to a tag, `None` for values outside the
    /// closed set.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Error,
            1 => Self::LogIn,
            2 => Self::Register,
            3 => Self::Shutdown,
            4 => Self::CreateBoard,
            5 => Self::GetBoard,
            6 => Self::GetBoards,
            7 => Self::DeleteBoard,
            8 => Self::PointsSet,
            9 => Self::Line,
            10 => Self::Text,
            11 => Self::Image,
            12 => Self::Undo,
            13 => Self::SelectBoard,
            14 => Self::GetBoardElements,
            15 => Self::Clear,
            _ => return None,
        })
    }

    /// Wire value of this tag.
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// True for actions whose responses arrive as a batch of independent
    /// records rather than fragments of one record.
    pub fn is_batch(self) -> bool {
        matches!(self, Self::GetBoards)
    }
}

impl std::fmt::Display for ActionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::LogIn => "log-in",
            Self::Register => "register",
            Self::Shutdown => "shutdown",
            Self::CreateBoard => "create-board",
            Self::GetBoard => "get-board",
            Self::GetBoards => "get-boards",
            Self::DeleteBoard => "delete-board",
            Self::PointsSet => "points-set",
            Self::Line => "line",
            Self::Text => "text",
            Self::Image => "image",
            Self::Undo => "undo",
            Self::SelectBoard => "select-board",
            Self::GetBoardElements => "get-board-elements",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}
