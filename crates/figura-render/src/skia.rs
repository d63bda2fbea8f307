//! CPU backend on top of tiny-skia

use std::io::Write;

use crate::backend::{ColorHandle, RasterBackend, RasterError};
use crate::{encode, Color, OutputFormat, Surface};

/// tiny-skia raster backend
#[derive(Debug, Default)]
pub struct SkiaBackend {
    live: usize,
}

impl SkiaBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces created and not yet destroyed
    pub fn live_surfaces(&self) -> usize {
        self.live
    }
}

impl RasterBackend for SkiaBackend {
    type Surface = Surface;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Surface, RasterError> {
        let surface = Surface::new(width, height)
            .ok_or(RasterError::SurfaceAllocation { width, height })?;
        self.live += 1;
        tracing::debug!("Created {}x{} surface", width, height);
        Ok(surface)
    }

    fn allocate_color(&mut self, _surface: &mut Surface, color: Color) -> Result<ColorHandle, RasterError> {
        Ok(ColorHandle::from_color(color))
    }

    fn fill_rectangle(
        &mut self,
        surface: &mut Surface,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: ColorHandle,
    ) -> bool {
        surface.fill_rect(x1, y1, x2, y2, color.color())
    }

    fn draw_ellipse(
        &mut self,
        surface: &mut Surface,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        color: ColorHandle,
    ) -> bool {
        surface.stroke_ellipse(cx, cy, width, height, color.color())
    }

    fn encode_and_emit(
        &mut self,
        surface: &Surface,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<(), RasterError> {
        encode::write_surface(surface, format, out)
    }

    fn destroy_surface(&mut self, surface: Surface) {
        self.live = self.live.saturating_sub(1);
        tracing::debug!("Destroyed {}x{} surface", surface.width(), surface.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_bookkeeping() {
        let mut backend = SkiaBackend::new();
        let a = backend.create_surface(8, 8).unwrap();
        let b = backend.create_surface(1, 1).unwrap();
        assert_eq!(backend.live_surfaces(), 2);

        backend.destroy_surface(a);
        backend.destroy_surface(b);
        assert_eq!(backend.live_surfaces(), 0);
    }

    #[test]
    fn test_handle_from_scratch_surface_draws_elsewhere() {
        let mut backend = SkiaBackend::new();
        let mut scratch = backend.create_surface(1, 1).unwrap();
        let green = backend.allocate_color(&mut scratch, Color::GREEN).unwrap();
        backend.destroy_surface(scratch);

        let mut surface = backend.create_surface(30, 30).unwrap();
        assert!(backend.fill_rectangle(&mut surface, 5, 5, 10, 10, green));
        assert_eq!(surface.pixel(7, 7), Some(Color::GREEN));
    }

    #[test]
    fn test_draw_ellipse_reports_failure() {
        let mut backend = SkiaBackend::new();
        let mut surface = backend.create_surface(30, 30).unwrap();
        let red = ColorHandle::from_color(Color::RED);
        assert!(!backend.draw_ellipse(&mut surface, 15, 15, 0, 0, red));
        assert!(backend.draw_ellipse(&mut surface, 15, 15, 10, 10, red));
    }
}
