//! Backend boundary
//!
//! Everything the shape core needs from a rasterizer: surface lifetime,
//! color resolution, two primitives and image output.

use std::io::Write;
use std::mem::ManuallyDrop;

use crate::{Color, OutputFormat};

/// Opaque resolved color
///
/// Truecolor: the handle packs the color itself, so a handle resolved on one
/// surface stays valid on any other surface of the same backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorHandle(u32);

impl ColorHandle {
    /// Pack a color into a handle
    pub const fn from_color(color: Color) -> Self {
        Self(
            (color.a as u32) << 24
                | (color.r as u32) << 16
                | (color.g as u32) << 8
                | color.b as u32,
        )
    }

    /// The color this handle was resolved from
    pub const fn color(self) -> Color {
        Color {
            a: (self.0 >> 24) as u8,
            r: (self.0 >> 16) as u8,
            g: (self.0 >> 8) as u8,
            b: self.0 as u8,
        }
    }

    /// Raw packed ARGB value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Raster backend error
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Graphics backend used by the shape core
///
/// Primitives report success as `bool`; only surface allocation, color
/// allocation and output can fail with an error.
pub trait RasterBackend {
    /// Raster buffer owned by whoever created it
    type Surface;

    /// Allocate a `width` x `height` surface
    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface, RasterError>;

    /// Resolve a color for use on `surface`
    fn allocate_color(
        &mut self,
        surface: &mut Self::Surface,
        color: Color,
    ) -> Result<ColorHandle, RasterError>;

    /// Fill the rectangle spanned by two opposite corners, both inclusive
    fn fill_rectangle(
        &mut self,
        surface: &mut Self::Surface,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: ColorHandle,
    ) -> bool;

    /// Outline the ellipse of full axes `width` x `height` centred at `(cx, cy)`
    fn draw_ellipse(
        &mut self,
        surface: &mut Self::Surface,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        color: ColorHandle,
    ) -> bool;

    /// Encode `surface` and write it to `out`
    fn encode_and_emit(
        &mut self,
        surface: &Self::Surface,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<(), RasterError>;

    /// Release a surface
    fn destroy_surface(&mut self, surface: Self::Surface);
}

/// Surface that is destroyed when the guard goes out of scope
pub struct ScratchSurface<'a, B: RasterBackend> {
    backend: &'a mut B,
    surface: ManuallyDrop<B::Surface>,
}

impl<'a, B: RasterBackend> ScratchSurface<'a, B> {
    /// Acquire a scratch surface from `backend`
    pub fn acquire(backend: &'a mut B, width: u32, height: u32) -> Result<Self, RasterError> {
        let surface = backend.create_surface(width, height)?;
        Ok(Self { backend, surface: ManuallyDrop::new(surface) })
    }

    /// Resolve a color against the scratch surface
    pub fn allocate_color(&mut self, color: Color) -> Result<ColorHandle, RasterError> {
        self.backend.allocate_color(&mut self.surface, color)
    }
}

impl<B: RasterBackend> Drop for ScratchSurface<'_, B> {
    fn drop(&mut self) {
        // SAFETY: `drop` runs once and the surface is not touched afterwards
        let surface = unsafe { ManuallyDrop::take(&mut self.surface) };
        self.backend.destroy_surface(surface);
    }
}
