//! figura Shapes
//!
//! Geometric shapes rasterized onto a fixed-size canvas.
//!
//! This crate provides:
//! - `Shape`, a closed sum type over circle, rectangle and triangle
//! - `ShapeFactory`, which builds shapes by variant name
//! - `Canvas`, an explicit drawing context owning the raster buffer
//!
//! # Example
//! ```rust,ignore
//! use figura_shapes::{Canvas, CanvasConfig, ShapeFactory};
//! use figura_render::SkiaBackend;
//!
//! let mut canvas = Canvas::new(SkiaBackend::new(), CanvasConfig::default());
//! let mut rect = ShapeFactory::new().create("Rectangle");
//! let green = canvas.color(0, 255, 0)?;
//! rect.set_position(&[350, 150, 600, 400])?
//!     .set_color(green, canvas.backend_mut())?
//!     .scale(2);
//! canvas.draw(&rect)?;
//! canvas.out(&mut std::io::stdout().lock())?;
//! ```

mod uid;
mod shape;
mod factory;
mod config;
mod canvas;

pub use uid::Uid;
pub use shape::{
    Shape, ShapeKind, ShapeError, Geometry, ColorSpec,
    RectangleGeometry, CircleGeometry, TriangleGeometry, SCALE_STEP,
};
pub use factory::ShapeFactory;
pub use config::CanvasConfig;
pub use canvas::{Canvas, CanvasError, CanvasStatus};

// Re-export the backend crate for callers that only depend on this one
pub use figura_render as render;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
