//! Drawn-element records: point sets, lines, text, images.

use bytes::{BufMut, Bytes, BytesMut};

use crate::color::Color;
use crate::cursor::BodyCursor;
use crate::error::{RecordError, Result};
use crate::Record;

/// One canvas coordinate pair, 8 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn put(self, dst: &mut BytesMut) {
        dst.put_i32_le(self.x);
        dst.put_i32_le(self.y);
    }

    fn take(cursor: &mut BodyCursor<'_>) -> Result<Self> {
        let x = cursor.take_i32()?;
        let y = cursor.take_i32()?;
        Ok(Self { x, y })
    }
}

/// A freehand stroke: ordered points plus pen settings. `erase` marks the
/// stroke as an eraser pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsSet {
    pub erase: bool,
    pub width: i32,
    pub color: Color,
    pub points: Vec<Point>,
}

impl Record for PointsSet {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        dst.put_u8(self.erase as u8);
        dst.put_i32_le(self.width);
        dst.put_i32_le(self.color.packed());
        dst.put_i32_le(self.points.len() as i32);
        for point in &self.points {
            point.put(dst);
        }
        Ok(())
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let erase = cursor.take_u8()? != 0;
        let width = cursor.take_i32()?;
        let color = Color::from_packed(cursor.take_i32()?);
        let count = cursor.take_len("points")?;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(Point::take(&mut cursor)?);
        }
        cursor.finish()?;
        Ok(Self {
            erase,
            width,
            color,
            points,
        })
    }
}

/// A straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub width: i32,
    pub color: Color,
}

impl Record for Line {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.start.put(dst);
        self.end.put(dst);
        dst.put_i32_le(self.width);
        dst.put_i32_le(self.color.packed());
        Ok(())
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let start = Point::take(&mut cursor)?;
        let end = Point::take(&mut cursor)?;
        let width = cursor.take_i32()?;
        let color = Color::from_packed(cursor.take_i32()?);
        cursor.finish()?;
        Ok(Self {
            start,
            end,
            width,
            color,
        })
    }
}

/// A text label anchored at `pos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub pos: Point,
    pub font_size: i32,
    pub color: Color,
    pub text: String,
}

impl Record for Text {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.pos.put(dst);
        dst.put_i32_le(self.font_size);
        dst.put_i32_le(self.color.packed());
        dst.put_i32_le(self.text.len() as i32);
        dst.put_slice(self.text.as_bytes());
        Ok(())
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let pos = Point::take(&mut cursor)?;
        let font_size = cursor.take_i32()?;
        let color = Color::from_packed(cursor.take_i32()?);
        let len = cursor.take_len("text")?;
        let text = std::str::from_utf8(cursor.take(len)?)
            .map_err(|_| RecordError::Utf8 { field: "text" })?
            .to_owned();
        cursor.finish()?;
        Ok(Self {
            pos,
            font_size,
            color,
            text,
        })
    }
}

/// A pasted image: position, dimensions, raw pixel bytes.
///
/// Pixel data is opaque to the protocol; interpretation (format, stride)
/// belongs to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub pos: Point,
    pub width: i32,
    pub height: i32,
    pub pixels: Bytes,
}

impl Record for Image {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.pos.put(dst);
        dst.put_i32_le(self.width);
        dst.put_i32_le(self.height);
        dst.put_i32_le(self.pixels.len() as i32);
        dst.put_slice(&self.pixels);
        Ok(())
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let pos = Point::take(&mut cursor)?;
        let width = cursor.take_i32()?;
        let height = cursor.take_i32()?;
        let len = cursor.take_len("pixels")?;
        let pixels = Bytes::copy_from_slice(cursor.take(len)?);
        cursor.finish()?;
        Ok(Self {
            pos,
            width,
            height,
            pixels,
        })
    }
}
