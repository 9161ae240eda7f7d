//! Heatmap of the display-clipped field magnitude with the shell outline,
//! the optional vector overlay and a color bar.

use gauss_shell_core::error::ShellError;
use gauss_shell_core::metrics::format_sci;
use gauss_shell_core::palette::Palette;
use gauss_shell_core::shell::ShellField;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::quiver::arrows;
use crate::theme::{self, Labels, ACCENT, BACKGROUND, GRID, TEXT};
use crate::{render_err, ChartOptions};

pub const TITLE: &str = "Electric field magnitude";
/// Stroke width of the shell outline in pixels.
pub const OUTLINE_WIDTH: u32 = 4;
const OUTLINE_SEGMENTS: usize = 180;
const COLORBAR_WIDTH: u32 = 110;
const COLORBAR_STEPS: usize = 64;
const COLORBAR_TITLE: &str = "|E| (N/C)";

/// Draws the field map onto `root`.
///
/// Cells take their color from `palette` scaled to `[0, clip_limit]`; the
/// physical magnitudes are never consulted. Arrows are drawn only when
/// `show_vectors` is set and the field is non-zero. With [`Labels::Hidden`]
/// no text reaches the backend.
pub fn draw_field_map<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    field: &ShellField,
    palette: &Palette,
    show_vectors: bool,
    labels: Labels,
) -> Result<(), ShellError> {
    root.fill(&BACKGROUND).map_err(render_err)?;

    let (w, h) = root.dim_in_pixel();
    let main_w = w.saturating_sub(COLORBAR_WIDTH).min(h + 60).max(1);
    let (main, bar) = root.split_horizontally(main_w);

    let grid = field.grid();
    let edges = grid.cell_edges();
    let (lo, hi) = (edges[0], edges[edges.len() - 1]);
    let clip = field.clip_limit();

    let mut builder = ChartBuilder::on(&main);
    builder.margin(12).x_label_area_size(40).y_label_area_size(50);
    if labels.shown() {
        builder.caption(TITLE, theme::title_style());
    }
    let mut chart = builder
        .build_cartesian_2d(lo..hi, lo..hi)
        .map_err(render_err)?;

    if labels.shown() {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("x (m)")
            .y_desc("y (m)")
            .axis_style(GRID)
            .label_style(theme::label_style())
            .axis_desc_style(theme::label_style())
            .draw()
            .map_err(render_err)?;
    }

    chart
        .draw_series(field.e_display().iter().map(|(col, row, v)| {
            let color = theme::rgb(palette.sample_range(v, 0.0, clip));
            Rectangle::new(
                [(edges[col], edges[row]), (edges[col + 1], edges[row + 1])],
                color.filled(),
            )
        }))
        .map_err(render_err)?;

    let radius = field.shell().radius();
    let outline: Vec<(f64, f64)> = (0..=OUTLINE_SEGMENTS)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / OUTLINE_SEGMENTS as f64;
            (radius * t.cos(), radius * t.sin())
        })
        .collect();
    chart
        .draw_series(std::iter::once(PathElement::new(
            outline,
            ACCENT.stroke_width(OUTLINE_WIDTH),
        )))
        .map_err(render_err)?;

    if show_vectors {
        let arrows = arrows(field);
        let style = WHITE.mix(0.4).stroke_width(1);
        debug!(count = arrows.len(), "drawing field arrows");
        chart
            .draw_series(arrows.iter().flat_map(|a| {
                [
                    PathElement::new(vec![a.tail, a.tip], style),
                    PathElement::new(vec![a.barbs[0], a.tip, a.barbs[1]], style),
                ]
            }))
            .map_err(render_err)?;
    }

    if !labels.shown() {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(lo, lo), (hi, hi)],
                GRID.stroke_width(1),
            )))
            .map_err(render_err)?;
    }

    draw_colorbar(&bar, palette, clip, labels)?;
    root.present().map_err(render_err)
}

/// Vertical color bar for `[0, clip]`. A zero clip (no field) still shows
/// a unit scale so the axis is drawable.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    palette: &Palette,
    clip: f64,
    labels: Labels,
) -> Result<(), ShellError> {
    let top = if clip > 0.0 { clip } else { 1.0 };
    let mut builder = ChartBuilder::on(area);
    builder
        .margin_top(24)
        .margin_bottom(52)
        .margin_right(50)
        .y_label_area_size(0)
        .right_y_label_area_size(50);
    if labels.shown() {
        builder.caption(COLORBAR_TITLE, ("sans-serif", 12.0).into_font().color(&TEXT));
    }
    let mut chart = builder
        .build_cartesian_2d(0.0..1.0, 0.0..top)
        .map_err(render_err)?;

    if labels.shown() {
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(5)
            .y_label_formatter(&|v: &f64| format_sci(*v))
            .axis_style(GRID)
            .label_style(("sans-serif", 11.0).into_font().color(&TEXT))
            .draw()
            .map_err(render_err)?;
    }

    let step = top / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            let y0 = i as f64 * step;
            let color = theme::rgb(palette.sample_range(y0 + step / 2.0, 0.0, top));
            Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Renders the field map to an SVG document.
pub fn field_map_svg(
    field: &ShellField,
    opts: &ChartOptions,
    show_vectors: bool,
) -> Result<String, ShellError> {
    opts.validate()?;
    let (palette, _) = opts.palettes()?;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (opts.width, opts.height)).into_drawing_area();
        draw_field_map(&root, field, &palette, show_vectors, Labels::Shown)?;
    }
    Ok(buf)
}
