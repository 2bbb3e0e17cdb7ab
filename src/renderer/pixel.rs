//! Color and packed pixel types

use bytemuck::{Pod, Zeroable};

/// 8-bit straight-alpha RGBA, laid out the way `ImageData` expects
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey
    pub const fn grey(v: u8) -> Self {
        Self::rgba8(v, v, v, 255)
    }

    /// CSS color string for canvas fill and stroke styles
    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.4})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// View packed pixels as raw bytes (RGBA order)
pub fn as_bytes(pixels: &[Color]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_layout() {
        assert_eq!(std::mem::size_of::<Color>(), 4);
        let px = [Color::rgba8(1, 2, 3, 4), Color::grey(9)];
        assert_eq!(as_bytes(&px), &[1, 2, 3, 4, 9, 9, 9, 255]);
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(Color::grey(180).css(), "rgb(180, 180, 180)");
        assert_eq!(Color::rgba8(0, 0, 0, 0).css(), "rgba(0, 0, 0, 0.0000)");
        assert_eq!(Color::rgba8(245, 240, 235, 15).css(), "rgba(245, 240, 235, 0.0588)");
    }
}
