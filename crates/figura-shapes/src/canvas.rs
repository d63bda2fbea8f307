//! Canvas - drawing context
//!
//! Owns the raster buffer and the registry of drawn shapes. The buffer goes
//! through `Uninitialized -> Initialized -> Finalized` exactly once: it is
//! created on first use, painted with the background, and destroyed by
//! [`Canvas::out`]. A finalized canvas refuses further work.

use std::collections::HashMap;
use std::io::Write;

use figura_render::{Color, ColorHandle, RasterBackend, RasterError};

use crate::{CanvasConfig, Shape, ShapeError, Uid};

/// Canvas error
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("Canvas already finalized, its buffer has been released")]
    Finalized,

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Buffer lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasStatus {
    Uninitialized,
    Initialized,
    Finalized,
}

enum Buffer<S> {
    Uninitialized,
    Initialized(S),
    Finalized,
}

/// Drawing canvas over a raster backend
pub struct Canvas<B: RasterBackend> {
    backend: B,
    config: CanvasConfig,
    buffer: Buffer<B::Surface>,
    registry: HashMap<Uid, Shape>,
}

impl<B: RasterBackend> Canvas<B> {
    /// Create a canvas; the buffer is allocated on first use
    pub fn new(backend: B, config: CanvasConfig) -> Self {
        Self {
            backend,
            config,
            buffer: Buffer::Uninitialized,
            registry: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Backend access, e.g. for resolving colors in [`Shape::set_color`]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn status(&self) -> CanvasStatus {
        match self.buffer {
            Buffer::Uninitialized => CanvasStatus::Uninitialized,
            Buffer::Initialized(_) => CanvasStatus::Initialized,
            Buffer::Finalized => CanvasStatus::Finalized,
        }
    }

    /// The live buffer, created with its background on first call
    pub fn surface(&mut self) -> Result<&B::Surface, CanvasError> {
        let (_, surface) = self.parts()?;
        Ok(surface)
    }

    /// Resolve an RGB triplet against the buffer
    ///
    /// Handles for equal triplets are not guaranteed to compare equal.
    pub fn color(&mut self, r: u8, g: u8, b: u8) -> Result<ColorHandle, CanvasError> {
        let (backend, surface) = self.parts()?;
        Ok(backend.allocate_color(surface, Color::rgb(r, g, b))?)
    }

    /// Register `shape` under its uid and rasterize it immediately
    ///
    /// Later changes to `shape` are not re-rendered. Returns the backend's
    /// success flag; a failed primitive still leaves the shape registered.
    pub fn draw(&mut self, shape: &Shape) -> Result<bool, CanvasError> {
        self.ensure_initialized()?;
        shape.check_drawable()?;

        self.registry.insert(shape.uid(), shape.clone());

        let (backend, surface) = self.parts()?;
        let drawn = shape.draw(backend, surface)?;
        if drawn {
            tracing::debug!("Drew {} {}", shape.kind(), shape.uid());
        } else {
            tracing::warn!("Backend failed to draw {} {}", shape.kind(), shape.uid());
        }
        Ok(drawn)
    }

    /// Encode the buffer to `out` and release it
    ///
    /// The buffer is released even when encoding fails. Any later use of the
    /// canvas returns [`CanvasError::Finalized`].
    pub fn out(&mut self, out: &mut dyn Write) -> Result<&mut Self, CanvasError> {
        self.ensure_initialized()?;

        let Buffer::Initialized(surface) = std::mem::replace(&mut self.buffer, Buffer::Finalized)
        else {
            return Err(CanvasError::Finalized);
        };

        let emitted = self.backend.encode_and_emit(&surface, self.config.format, out);
        self.backend.destroy_surface(surface);
        emitted?;

        tracing::info!(
            "Canvas emitted as {} with {} shapes, buffer released",
            self.config.format.mime_type(),
            self.registry.len()
        );
        Ok(self)
    }

    /// A registered shape, as it was when drawn
    pub fn registered(&self, uid: &Uid) -> Option<&Shape> {
        self.registry.get(uid)
    }

    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    /// All registered shapes, in no particular order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.registry.values()
    }

    fn ensure_initialized(&mut self) -> Result<(), CanvasError> {
        match self.buffer {
            Buffer::Initialized(_) => Ok(()),
            Buffer::Finalized => Err(CanvasError::Finalized),
            Buffer::Uninitialized => {
                let surface = self.create_buffer()?;
                self.buffer = Buffer::Initialized(surface);
                tracing::info!("Canvas initialized: {}x{}", self.config.width, self.config.height);
                Ok(())
            }
        }
    }

    fn create_buffer(&mut self) -> Result<B::Surface, CanvasError> {
        let (width, height) = (self.config.width, self.config.height);
        let mut surface = self.backend.create_surface(width, height)?;

        let background = match self.backend.allocate_color(&mut surface, self.config.background) {
            Ok(handle) => handle,
            Err(err) => {
                self.backend.destroy_surface(surface);
                return Err(err.into());
            }
        };

        let right = i32::try_from(width).unwrap_or(i32::MAX) - 1;
        let bottom = i32::try_from(height).unwrap_or(i32::MAX) - 1;
        if !self.backend.fill_rectangle(&mut surface, 0, 0, right, bottom, background) {
            tracing::warn!("Backend failed to paint the canvas background");
        }
        Ok(surface)
    }

    fn parts(&mut self) -> Result<(&mut B, &mut B::Surface), CanvasError> {
        self.ensure_initialized()?;
        match &mut self.buffer {
            Buffer::Initialized(surface) => Ok((&mut self.backend, surface)),
            _ => Err(CanvasError::Finalized),
        }
    }
}

impl<B: RasterBackend> Drop for Canvas<B> {
    fn drop(&mut self) {
        if let Buffer::Initialized(surface) = std::mem::replace(&mut self.buffer, Buffer::Finalized) {
            tracing::debug!("Canvas dropped before output, releasing buffer");
            self.backend.destroy_surface(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShapeFactory, ShapeKind};
    use figura_render::{OutputFormat, SkiaBackend};

    fn small_canvas() -> Canvas<SkiaBackend> {
        let config = CanvasConfig::default().with_size(64, 48).with_format(OutputFormat::Png);
        Canvas::new(SkiaBackend::new(), config)
    }

    #[test]
    fn test_dimensions_follow_config() {
        let mut canvas = small_canvas();
        assert_eq!((canvas.width(), canvas.height()), (64, 48));
        assert_eq!(canvas.config().format, OutputFormat::Png);
        assert_eq!(canvas.config().background, Color::BACKGROUND);

        let surface = canvas.surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (64, 48));
    }

    #[test]
    fn test_buffer_is_lazy() {
        let mut canvas = small_canvas();
        assert_eq!(canvas.status(), CanvasStatus::Uninitialized);
        assert_eq!(canvas.backend().live_surfaces(), 0);

        canvas.surface().unwrap();
        canvas.surface().unwrap();
        assert_eq!(canvas.status(), CanvasStatus::Initialized);
        assert_eq!(canvas.backend().live_surfaces(), 1);
    }

    #[test]
    fn test_background_applied() {
        let mut canvas = small_canvas();
        let surface = canvas.surface().unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::BACKGROUND));
        assert_eq!(surface.pixel(63, 47), Some(Color::BACKGROUND));
    }

    #[test]
    fn test_color_initializes_buffer() {
        let mut canvas = small_canvas();
        let handle = canvas.color(255, 20, 20).unwrap();
        assert_eq!(handle.color(), Color::rgb(255, 20, 20));
        assert_eq!(canvas.status(), CanvasStatus::Initialized);
    }

    #[test]
    fn test_draw_registers_and_rasterizes() {
        let mut canvas = small_canvas();
        let mut rect = ShapeFactory::new().create("Rectangle");
        let green = canvas.color(0, 255, 0).unwrap();
        rect.set_position(&[10, 10, 20, 20])
            .unwrap()
            .set_color(green, canvas.backend_mut())
            .unwrap();

        assert!(canvas.draw(&rect).unwrap());
        assert_eq!(canvas.registry_len(), 1);
        assert_eq!(canvas.registered(&rect.uid()), Some(&rect));
        assert_eq!(canvas.surface().unwrap().pixel(15, 15), Some(Color::GREEN));
    }

    #[test]
    fn test_draw_is_eager() {
        let mut canvas = small_canvas();
        let mut rect = Shape::new(ShapeKind::Rectangle);
        rect.set_position(&[0, 0, 4, 4])
            .unwrap()
            .set_color([0u8, 0, 255], canvas.backend_mut())
            .unwrap();
        canvas.draw(&rect).unwrap();

        rect.scale(2);
        let surface = canvas.surface().unwrap();
        assert_eq!(surface.pixel(2, 2), Some(Color::BLUE));
        assert_eq!(surface.pixel(10, 10), Some(Color::BACKGROUND));
        assert_ne!(canvas.registered(&rect.uid()), Some(&rect));
    }

    #[test]
    fn test_failed_primitive_stays_registered() {
        let mut canvas = small_canvas();
        let mut circle = Shape::new(ShapeKind::Circle);
        circle
            .set_position(&[10, 10, 0])
            .unwrap()
            .set_color([255u8, 0, 0], canvas.backend_mut())
            .unwrap();

        assert!(!canvas.draw(&circle).unwrap());
        assert!(canvas.registered(&circle.uid()).is_some());
    }

    #[test]
    fn test_undrawable_shape_is_rejected() {
        let mut canvas = small_canvas();
        let mut rect = Shape::new(ShapeKind::Rectangle);
        rect.set_position(&[1, 2, 3, 4]).unwrap();

        let err = canvas.draw(&rect).unwrap_err();
        assert!(matches!(err, CanvasError::Shape(ShapeError::ColorNotSet { .. })));
        assert_eq!(canvas.registry_len(), 0);
    }

    #[test]
    fn test_out_releases_buffer_once() {
        let mut canvas = small_canvas();
        canvas.color(1, 2, 3).unwrap();

        let mut bytes = Vec::new();
        canvas.out(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
        assert_eq!(canvas.status(), CanvasStatus::Finalized);
        assert_eq!(canvas.backend().live_surfaces(), 0);
    }

    #[test]
    fn test_finalized_canvas_refuses_work() {
        let mut canvas = small_canvas();
        canvas.out(&mut std::io::sink()).unwrap();

        assert!(matches!(canvas.color(0, 0, 0), Err(CanvasError::Finalized)));
        assert!(matches!(canvas.surface(), Err(CanvasError::Finalized)));
        assert!(matches!(canvas.out(&mut std::io::sink()), Err(CanvasError::Finalized)));

        let mut triangle = Shape::new(ShapeKind::Triangle);
        triangle.rotate(10);
        assert!(matches!(canvas.draw(&triangle), Err(CanvasError::Finalized)));
        assert_eq!(canvas.backend().live_surfaces(), 0);
    }
}
