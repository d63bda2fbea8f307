//! figura Demo - Main Entry Point
//!
//! Draws a green rectangle and a red circle outline on the default canvas
//! and writes the encoded image to stdout. Logs go to stderr.

use std::io::Write;

use anyhow::Context;
use figura_render::SkiaBackend;
use figura_shapes::{Canvas, CanvasConfig, ShapeFactory};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout carries the image
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("figura {} starting", figura_shapes::VERSION);

    let mut canvas = Canvas::new(SkiaBackend::new(), CanvasConfig::default());
    tracing::info!(
        "Drawing on a {}x{} canvas, output {}",
        canvas.width(),
        canvas.height(),
        canvas.config().format.mime_type()
    );
    draw_scene(&mut canvas)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    canvas.out(&mut out).context("writing canvas to stdout")?;
    out.flush().context("flushing stdout")?;

    Ok(())
}

fn draw_scene(canvas: &mut Canvas<SkiaBackend>) -> anyhow::Result<()> {
    let factory = ShapeFactory::new();

    let mut rectangle = factory.create("Rectangle");
    rectangle.set_position(&[350, 150, 600, 400])?;
    let green = canvas.color(0, 255, 0)?;
    rectangle.set_color(green, canvas.backend_mut())?;
    rectangle.scale(2);
    canvas.draw(&rectangle).context("drawing rectangle")?;

    let mut circle = factory.create("Circle");
    let red = canvas.color(255, 20, 20)?;
    circle
        .set_position(&[200, 200, 100])?
        .set_color(red, canvas.backend_mut())?
        .scale(3);
    canvas.draw(&circle).context("drawing circle")?;

    Ok(())
}
