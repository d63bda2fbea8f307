//! Surface - pixel buffer

use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::Color;

/// Pixel surface backed by a tiny-skia pixmap
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Create a new surface, `None` for empty or oversized dimensions
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole surface
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// Get a pixel color, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Fill a rectangle given by two inclusive corners, in any order
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> bool {
        let left = x1.min(x2) as f32;
        let top = y1.min(y2) as f32;
        let right = x1.max(x2) as f32 + 1.0;
        let bottom = y1.max(y2) as f32 + 1.0;

        let Some(rect) = Rect::from_ltrb(left, top, right, bottom) else {
            return false;
        };
        self.pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
        true
    }

    /// Stroke a 1px ellipse outline inside a `width` x `height` box centred on a pixel
    pub fn stroke_ellipse(&mut self, cx: i32, cy: i32, width: i32, height: i32, color: Color) -> bool {
        if width <= 0 || height <= 0 {
            return false;
        }

        let (w, h) = (width as f32, height as f32);
        let x = cx as f32 + 0.5 - w / 2.0;
        let y = cy as f32 + 0.5 - h / 2.0;
        let Some(path) = Rect::from_xywh(x, y, w, h).and_then(PathBuilder::from_oval) else {
            return false;
        };

        let stroke = Stroke { width: 1.0, ..Stroke::default() };
        self.pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
        true
    }

    /// Get pixel data as raw bytes (RGB)
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect()
    }

    /// Get pixel data as raw bytes (RGBA)
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}

// Aliased paint: hard pixel edges, no blending at shape borders
fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = false;
    paint
}
