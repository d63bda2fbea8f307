//! Shape factory

use crate::{Shape, ShapeKind};

/// Builds default shapes by variant name
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeFactory;

impl ShapeFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a shape from its variant name
    ///
    /// Unknown names fall back to a circle rather than failing.
    pub fn create(&self, name: &str) -> Shape {
        let kind = ShapeKind::from_name(name).unwrap_or_else(|| {
            tracing::debug!("Unknown shape type {:?}, using Circle", name);
            ShapeKind::Circle
        });
        Shape::new(kind)
    }
}
