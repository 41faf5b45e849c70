/// RGBA color packed into one i32 wire slot as `R | G<<8 | B<<16 | A<<24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed wire representation.
    pub fn packed(self) -> i32 {
        (self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16 | (self.a as u32) << 24)
            as i32
    }

    /// Rebuild from the packed wire representation.
    pub fn from_packed(packed: i32) -> Self {
        let bits = packed as u32;
        Self {
            r: bits as u8,
            g: (bits >> 8) as u8,
            b: (bits >> 16) as u8,
            a: (bits >> 24) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrip() {
        let color = Color::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(Color::from_packed(color.packed()), color);
    }

    #[test]
    fn channel_order() {
        let color = Color::new(0xFF, 0, 0, 0);
        assert_eq!(color.packed(), 0xFF);

        let opaque_white = Color::new(0xFF, 0xFF, 0xFF, 0xFF);
        assert_eq!(opaque_white.packed() as u32, 0xFFFF_FFFF);
    }

    #[test]
    fn alpha_survives_sign_bit() {
        let color = Color::new(0, 0, 0, 0x80);
        let packed = color.packed();
        assert!(packed < 0);
        assert_eq!(Color::from_packed(packed), color);
    }
}
