//! PNG snapshots of both charts.
//!
//! Feature-gated behind `png` (default on) so SVG-only consumers do not pull
//! in the `image` crate. Charts are rasterized by the plotters bitmap backend
//! into an RGB buffer, which `image` then encodes. The bitmap backend cannot
//! rasterize glyphs here, so snapshots are drawn with [`Labels::Hidden`].

use gauss_shell_core::error::ShellError;
use gauss_shell_core::shell::ShellField;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::field_map::draw_field_map;
use crate::surface::draw_potential_surface;
use crate::theme::Labels;
use crate::{render_err, ChartOptions};

/// Rasterizes whatever `draw` puts on a `width x height` canvas.
pub fn rasterize<F>(width: u32, height: u32, draw: F) -> Result<image::RgbImage, ShellError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), ShellError>,
{
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(ShellError::InvalidDimensions)?;
    let mut buf = vec![0u8; len];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present().map_err(render_err)?;
    }
    image::RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| ShellError::Render("RGB buffer size mismatch".into()))
}

fn save(img: &image::RgbImage, path: &Path) -> Result<(), ShellError> {
    img.save(path).map_err(|e| ShellError::Io(e.to_string()))?;
    info!(path = %path.display(), "wrote PNG snapshot");
    Ok(())
}

/// Writes the field map as a PNG.
pub fn write_field_png(
    field: &ShellField,
    opts: &ChartOptions,
    show_vectors: bool,
    path: &Path,
) -> Result<(), ShellError> {
    opts.validate()?;
    let (palette, _) = opts.palettes()?;
    let img = rasterize(opts.width, opts.height, |root| {
        draw_field_map(root, field, &palette, show_vectors, Labels::Hidden)
    })?;
    save(&img, path)
}

/// Writes the potential surface as a PNG.
pub fn write_potential_png(
    field: &ShellField,
    opts: &ChartOptions,
    path: &Path,
) -> Result<(), ShellError> {
    opts.validate()?;
    let (_, palette) = opts.palettes()?;
    let img = rasterize(opts.width, opts.height, |root| {
        draw_potential_surface(root, field, &palette, Labels::Hidden)
    })?;
    save(&img, path)
}
