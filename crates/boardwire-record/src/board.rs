use bytes::{BufMut, BytesMut};

use crate::color::Color;
use crate::cursor::BodyCursor;
use crate::error::{RecordError, Result};
use crate::Record;

/// Longest board title the wire accepts.
pub const MAX_TITLE_LEN: usize = 16;

/// One board as listed by the server: id, color, utf-8 title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDescriptor {
    pub id: i32,
    pub color: Color,
    pub title: String,
}

impl BoardDescriptor {
    pub fn new(id: i32, color: Color, title: impl Into<String>) -> Self {
        Self {
            id,
            color,
            title: title.into(),
        }
    }
}

impl Record for BoardDescriptor {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let title = self.title.as_bytes();
        if title.len() > MAX_TITLE_LEN {
            return Err(RecordError::TooLong {
                field: "title",
                len: title.len(),
                max: MAX_TITLE_LEN,
            });
        }
        dst.put_i32_le(self.id);
        dst.put_i32_le(self.color.packed());
        dst.put_i32_le(title.len() as i32);
        dst.put_slice(title);
        Ok(())
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let id = cursor.take_i32()?;
        let color = Color::from_packed(cursor.take_i32()?);
        let title_len = cursor.take_len("title")?;
        if title_len > MAX_TITLE_LEN {
            return Err(RecordError::TooLong {
                field: "title",
                len: title_len,
                max: MAX_TITLE_LEN,
            });
        }
        let title = std::str::from_utf8(cursor.take(title_len)?)
            .map_err(|_| RecordError::Utf8 { field: "title" })?
            .to_owned();
        cursor.finish()?;
        Ok(Self { id, color, title })
    }
}

/// Body of the control records that carry a single board id
/// (select, delete, fetch-one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardId(pub i32);

impl Record for BoardId {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        dst.put_i32_le(self.0);
        Ok(())
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let id = cursor.take_i32()?;
        cursor.finish()?;
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_roundtrip() {
        let board = BoardDescriptor::new(7, Color::new(10, 20, 30, 255), "retro");
        let body = board.to_body().unwrap();
        assert_eq!(body.len(), 4 + 4 + 4 + 5);
        assert_eq!(BoardDescriptor::decode(&body).unwrap(), board);
    }

    #[test]
    fn max_len_title_roundtrip() {
        let board = BoardDescriptor::new(1, Color::new(0, 0, 0, 255), "t".repeat(MAX_TITLE_LEN));
        let body = board.to_body().unwrap();
        assert_eq!(BoardDescriptor::decode(&body).unwrap(), board);
    }

    #[test]
    fn overlong_title_rejected_both_ways() {
        let board = BoardDescriptor::new(1, Color::new(0, 0, 0, 255), "t".repeat(17));
        assert!(board.to_body().is_err());

        let mut forged = BytesMut::new();
        forged.put_i32_le(1);
        forged.put_i32_le(0);
        forged.put_i32_le(17);
        forged.put_bytes(b't', 17);
        assert!(matches!(
            BoardDescriptor::decode(&forged).unwrap_err(),
            RecordError::TooLong { field: "title", .. }
        ));
    }

    #[test]
    fn title_len_beyond_body_rejected() {
        let mut forged = BytesMut::new();
        forged.put_i32_le(1);
        forged.put_i32_le(0);
        forged.put_i32_le(10);
        forged.put_slice(b"abc");
        assert!(matches!(
            BoardDescriptor::decode(&forged).unwrap_err(),
            RecordError::Truncated { .. }
        ));
    }

    #[test]
    fn board_id_roundtrip() {
        let body = BoardId(-4).to_body().unwrap();
        assert_eq!(body.len(), 4);
        assert_eq!(BoardId::decode(&body).unwrap(), BoardId(-4));
    }
}
