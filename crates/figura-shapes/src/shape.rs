//! Shapes
//!
//! A closed set of variants sharing one operation contract. Every shape
//! carries a process-unique [`Uid`] and an optional resolved color; the
//! geometry stays unset until `set_position` succeeds.

use std::fmt;

use figura_render::{Color, ColorHandle, RasterBackend, RasterError, ScratchSurface};

use crate::Uid;

/// Pixels each edge moves per unit of scale factor
pub const SCALE_STEP: i32 = 10;

/// Shape variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

impl ShapeKind {
    /// Parse a variant name, exact match only
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Circle" => Some(ShapeKind::Circle),
            "Rectangle" => Some(ShapeKind::Rectangle),
            "Triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two opposite corners, stored as given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangleGeometry {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Center and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleGeometry {
    pub cx: i32,
    pub cy: i32,
    pub radius: i32,
}

/// Three vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleGeometry {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub x3: i32,
    pub y3: i32,
}

/// Variant geometry, `None` until positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Circle(Option<CircleGeometry>),
    Rectangle(Option<RectangleGeometry>),
    // Triangle positioning is not implemented; this is never filled in.
    Triangle(Option<TriangleGeometry>),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Triangle(_) => ShapeKind::Triangle,
        }
    }
}

/// Color argument for [`Shape::set_color`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec {
    /// Already resolved, stored verbatim
    Handle(ColorHandle),
    /// Raw triplet, resolved through a scratch surface
    Rgb([u8; 3]),
}

impl From<ColorHandle> for ColorSpec {
    fn from(handle: ColorHandle) -> Self {
        ColorSpec::Handle(handle)
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from(rgb: [u8; 3]) -> Self {
        ColorSpec::Rgb(rgb)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Rgb([color.r, color.g, color.b])
    }
}

/// Shape error
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("Not enough parameters for {kind}: expected {expected}, got {got}. Use: {usage}")]
    InsufficientCoordinates {
        kind: ShapeKind,
        expected: usize,
        got: usize,
        usage: &'static str,
    },

    #[error("{kind} {uid} has no color set")]
    ColorNotSet { kind: ShapeKind, uid: Uid },

    #[error("{kind} {uid} has no position set")]
    PositionNotSet { kind: ShapeKind, uid: Uid },

    #[error("Color resolution failed: {0}")]
    Raster(#[from] RasterError),
}

/// A drawable shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    uid: Uid,
    color: Option<ColorHandle>,
    geometry: Geometry,
}

impl Shape {
    /// Create an unpositioned, uncolored shape with a fresh uid
    pub fn new(kind: ShapeKind) -> Self {
        let geometry = match kind {
            ShapeKind::Circle => Geometry::Circle(None),
            ShapeKind::Rectangle => Geometry::Rectangle(None),
            ShapeKind::Triangle => Geometry::Triangle(None),
        };
        Self { uid: Uid::next(), color: None, geometry }
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Resolved color, if any
    pub fn color(&self) -> Option<ColorHandle> {
        self.color
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn as_rectangle(&self) -> Option<&RectangleGeometry> {
        match &self.geometry {
            Geometry::Rectangle(rect) => rect.as_ref(),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&CircleGeometry> {
        match &self.geometry {
            Geometry::Circle(circle) => circle.as_ref(),
            _ => None,
        }
    }

    pub fn as_triangle(&self) -> Option<&TriangleGeometry> {
        match &self.geometry {
            Geometry::Triangle(triangle) => triangle.as_ref(),
            _ => None,
        }
    }

    /// Check that `draw` would have everything it needs
    pub fn check_drawable(&self) -> Result<(), ShapeError> {
        let kind = self.kind();
        let uid = self.uid;
        let positioned = match self.geometry {
            Geometry::Triangle(_) => return Ok(()),
            Geometry::Rectangle(rect) => rect.is_some(),
            Geometry::Circle(circle) => circle.is_some(),
        };
        if !positioned {
            return Err(ShapeError::PositionNotSet { kind, uid });
        }
        if self.color.is_none() {
            return Err(ShapeError::ColorNotSet { kind, uid });
        }
        Ok(())
    }

    /// Set coordinates from a flat list
    ///
    /// Rectangle takes `[x1, y1, x2, y2]`, Circle takes `[cx, cy, radius]`;
    /// extra values are ignored. Triangle accepts anything and keeps its
    /// geometry unset.
    pub fn set_position(&mut self, coords: &[i32]) -> Result<&mut Self, ShapeError> {
        match &mut self.geometry {
            Geometry::Rectangle(rect) => {
                let [x1, y1, x2, y2] = take::<4>(ShapeKind::Rectangle, coords, "[x1,y1,x2,y2]")?;
                *rect = Some(RectangleGeometry { x1, y1, x2, y2 });
            }
            Geometry::Circle(circle) => {
                let [cx, cy, radius] = take::<3>(ShapeKind::Circle, coords, "[cx,cy,radius]")?;
                *circle = Some(CircleGeometry { cx, cy, radius });
            }
            Geometry::Triangle(_) => {}
        }
        tracing::debug!("{} {} positioned: {:?}", self.kind(), self.uid, self.geometry);
        Ok(self)
    }

    /// Grow by `SCALE_STEP * factor` per edge (rectangle) or on the radius (circle)
    ///
    /// No-op for triangles and for shapes without a position.
    pub fn scale(&mut self, factor: i32) -> &mut Self {
        let step = factor.saturating_mul(SCALE_STEP);
        let scaled = match &mut self.geometry {
            Geometry::Rectangle(Some(rect)) => {
                rect.x1 = rect.x1.saturating_sub(step);
                rect.y1 = rect.y1.saturating_sub(step);
                rect.x2 = rect.x2.saturating_add(step);
                rect.y2 = rect.y2.saturating_add(step);
                true
            }
            Geometry::Circle(Some(circle)) => {
                circle.radius = circle.radius.saturating_add(step);
                true
            }
            _ => false,
        };
        if scaled {
            tracing::debug!("{} {} scaled by {}", self.kind(), self.uid, factor);
        }
        self
    }

    /// Rotation is not implemented for any variant
    pub fn rotate(&mut self, _angle: i32) -> &mut Self {
        self
    }

    /// Set the color from a handle or an RGB triplet
    ///
    /// A triplet is resolved on a 1x1 scratch surface that is released
    /// before returning, whether resolution succeeded or not.
    pub fn set_color<B: RasterBackend>(
        &mut self,
        color: impl Into<ColorSpec>,
        backend: &mut B,
    ) -> Result<&mut Self, ShapeError> {
        let handle = match color.into() {
            ColorSpec::Handle(handle) => handle,
            ColorSpec::Rgb(rgb) => {
                let mut scratch = ScratchSurface::acquire(backend, 1, 1)?;
                scratch.allocate_color(Color::from(rgb))?
            }
        };
        self.color = Some(handle);
        tracing::debug!("{} {} color {:#010x}", self.kind(), self.uid, handle.raw());
        Ok(self)
    }

    /// Rasterize into `surface`, returning whether the primitive succeeded
    pub fn draw<B: RasterBackend>(
        &self,
        backend: &mut B,
        surface: &mut B::Surface,
    ) -> Result<bool, ShapeError> {
        let kind = self.kind();
        let uid = self.uid;

        match self.geometry {
            Geometry::Triangle(_) => Ok(true),
            Geometry::Rectangle(rect) => {
                let rect = rect.ok_or(ShapeError::PositionNotSet { kind, uid })?;
                let color = self.color.ok_or(ShapeError::ColorNotSet { kind, uid })?;
                Ok(backend.fill_rectangle(surface, rect.x1, rect.y1, rect.x2, rect.y2, color))
            }
            Geometry::Circle(circle) => {
                let circle = circle.ok_or(ShapeError::PositionNotSet { kind, uid })?;
                let color = self.color.ok_or(ShapeError::ColorNotSet { kind, uid })?;
                Ok(backend.draw_ellipse(
                    surface,
                    circle.cx,
                    circle.cy,
                    circle.radius,
                    circle.radius,
                    color,
                ))
            }
        }
    }
}

fn take<const N: usize>(
    kind: ShapeKind,
    coords: &[i32],
    usage: &'static str,
) -> Result<[i32; N], ShapeError> {
    coords
        .get(..N)
        .and_then(|head| <[i32; N]>::try_from(head).ok())
        .ok_or(ShapeError::InsufficientCoordinates {
            kind,
            expected: N,
            got: coords.len(),
            usage,
        })
}
