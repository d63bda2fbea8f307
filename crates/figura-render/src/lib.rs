//! figura Render - Raster Backend
//!
//! The narrow graphics boundary the shape core draws through.
//!
//! This crate provides:
//! - `RasterBackend`, the surface/color/primitive/output interface
//! - `ColorHandle`, an opaque resolved color
//! - `ScratchSurface`, a surface released on drop
//! - `SkiaBackend`, a CPU implementation backed by tiny-skia
//! - JPEG/PNG output through the `image` crate

mod backend;
mod surface;
mod skia;
pub mod encode;

pub use backend::{ColorHandle, RasterBackend, RasterError, ScratchSurface};
pub use surface::Surface;
pub use skia::SkiaBackend;
pub use encode::OutputFormat;

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    /// Light gray canvas background
    pub const BACKGROUND: Color = Color { r: 230, g: 230, b: 230, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::WHITE.r, 255);
        assert_eq!(Color::BLACK.r, 0);
        assert_eq!(Color::BACKGROUND, Color::rgb(230, 230, 230));
    }

    #[test]
    fn test_color_from_triplet() {
        assert_eq!(Color::from([0, 255, 0]), Color::GREEN);
        assert_eq!(Color::from([255, 20, 20]).a, 255);
    }
}
