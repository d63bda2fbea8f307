//! Image output

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::{RasterError, Surface};

/// Default JPEG quality
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encoded image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy JPEG, quality 1-100
    Jpeg { quality: u8 },
    /// Lossless PNG
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg { quality: DEFAULT_JPEG_QUALITY }
    }
}

impl OutputFormat {
    /// MIME type of the encoded stream
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Encode a surface and write it to `out`
pub fn write_surface(
    surface: &Surface,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), RasterError> {
    let (width, height) = (surface.width(), surface.height());

    match format {
        OutputFormat::Jpeg { quality } => {
            let quality = quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut *out, quality).write_image(
                &surface.to_rgb(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut *out).write_image(
                &surface.to_rgba(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
    }

    out.flush()?;
    tracing::debug!("Encoded {}x{} {}", width, height, format.mime_type());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn filled(width: u32, height: u32, color: Color) -> Surface {
        let mut surface = Surface::new(width, height).unwrap();
        surface.clear(color);
        surface
    }

    #[test]
    fn test_default_is_jpeg() {
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg { quality: 75 });
        assert_eq!(OutputFormat::default().mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_jpeg_stream_markers() {
        let surface = filled(16, 8, Color::BACKGROUND);
        let mut out = Vec::new();
        write_surface(&surface, OutputFormat::default(), &mut out).unwrap();

        assert_eq!(&out[..2], &[0xFF, 0xD8]);
        assert_eq!(&out[out.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_png_decodes_back() {
        let surface = filled(3, 2, Color::rgb(12, 34, 56));
        let mut out = Vec::new();
        write_surface(&surface, OutputFormat::Png, &mut out).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(out));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(&buf[..4], &[12, 34, 56, 255]);
    }
}
