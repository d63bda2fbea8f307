//! Canvas Configuration

use figura_render::{Color, OutputFormat};

/// Canvas configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Buffer width in pixels
    pub width: u32,

    /// Buffer height in pixels
    pub height: u32,

    /// Painted once when the buffer is created
    pub background: Color,

    /// Encoding used by `Canvas::out`
    pub format: OutputFormat,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::BACKGROUND,
            format: OutputFormat::default(),
        }
    }
}

impl CanvasConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
