//! 3D surface of the electric potential over the domain grid.
//!
//! The chart's vertical axis carries `V`; grid x runs along the chart's x
//! axis and grid y along its depth axis.

use gauss_shell_core::error::ShellError;
use gauss_shell_core::metrics::format_sci;
use gauss_shell_core::palette::Palette;
use gauss_shell_core::shell::ShellField;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::theme::{self, Labels, BACKGROUND, GRID};
use crate::{render_err, ChartOptions};

pub const TITLE: &str = "Electric potential";
/// Surface opacity.
pub const SURFACE_ALPHA: f64 = 0.9;

/// Vertical range of the surface. A flat potential (e.g. `Q = 0`) is
/// widened by one unit on either side.
pub fn potential_range(field: &ShellField) -> (f64, f64) {
    match field.v_pot().min_max() {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((v, _)) => (v - 1.0, v + 1.0),
        None => (-1.0, 1.0),
    }
}

/// Draws the potential surface onto `root`, colored by `palette` over the
/// potential range. With [`Labels::Hidden`] the axes and their labels are
/// left out.
pub fn draw_potential_surface<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    field: &ShellField,
    palette: &Palette,
    labels: Labels,
) -> Result<(), ShellError> {
    root.fill(&BACKGROUND).map_err(render_err)?;

    let grid = field.grid();
    let l = grid.half_width();
    let (v_lo, v_hi) = potential_range(field);
    let v_pot = field.v_pot();

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if labels.shown() {
        builder.caption(TITLE, theme::title_style());
    }
    let mut chart = builder
        .build_cartesian_3d(-l..l, v_lo..v_hi, -l..l)
        .map_err(render_err)?;

    chart.with_projection(|mut pb| {
        pb.pitch = 0.45;
        pb.yaw = 0.6;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    if labels.shown() {
        chart
            .configure_axes()
            .label_style(theme::label_style())
            .axis_panel_style(BACKGROUND.mix(0.6))
            .bold_grid_style(GRID)
            .light_grid_style(GRID.mix(0.3))
            .max_light_lines(2)
            .y_formatter(&|v: &f64| format_sci(*v))
            .draw()
            .map_err(render_err)?;
    }

    let height_at = |x: f64, y: f64| {
        v_pot
            .get(grid.nearest_index(x), grid.nearest_index(y))
            .unwrap_or(v_lo)
    };
    let style = |v: &f64| {
        theme::rgb(palette.sample_range(*v, v_lo, v_hi))
            .mix(SURFACE_ALPHA)
            .filled()
    };
    chart
        .draw_series(
            SurfaceSeries::xoz(grid.x().iter().copied(), grid.y().iter().copied(), height_at)
                .style_func(&style),
        )
        .map_err(render_err)?;

    if labels.shown() {
        let axis_label = theme::label_style();
        let names = [
            ("X", (l * 1.15, v_lo, -l)),
            ("Y", (-l, v_lo, l * 1.15)),
            ("V", (-l, v_hi, -l)),
        ];
        chart
            .draw_series(
                names
                    .into_iter()
                    .map(|(text, pos)| Text::new(text, pos, axis_label.clone())),
            )
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)
}

/// Renders the potential surface to an SVG document.
pub fn potential_svg(field: &ShellField, opts: &ChartOptions) -> Result<String, ShellError> {
    opts.validate()?;
    let (_, palette) = opts.palettes()?;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (opts.width, opts.height)).into_drawing_area();
        draw_potential_surface(&root, field, &palette, Labels::Shown)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauss_shell_core::shell::{evaluate, ShellParams, COULOMB_K};

    #[test]
    fn range_spans_interior_potential_to_corner() {
        let field = evaluate(&ShellParams::new(1.5, 5.0, 30)).unwrap();
        let (lo, hi) = potential_range(&field);
        assert_eq!(hi, COULOMB_K * 5.0 / 1.5);
        assert!(lo > 0.0 && lo < hi);
    }

    #[test]
    fn range_for_negative_charge_is_ordered() {
        let field = evaluate(&ShellParams::new(1.5, -5.0, 30)).unwrap();
        let (lo, hi) = potential_range(&field);
        assert_eq!(lo, COULOMB_K * -5.0 / 1.5);
        assert!(lo < hi && hi < 0.0);
    }

    #[test]
    fn flat_potential_gets_unit_padding() {
        let field = evaluate(&ShellParams::new(1.0, 0.0, 30)).unwrap();
        assert_eq!(potential_range(&field), (-1.0, 1.0));
    }

    #[test]
    fn svg_contains_title_and_surface() {
        let field = evaluate(&ShellParams::new(1.5, 5.0, 30)).unwrap();
        let doc = potential_svg(&field, &ChartOptions::default()).unwrap();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(TITLE));
        assert!(doc.matches("<polygon").count() >= 29 * 29);
    }

    #[test]
    fn hidden_labels_leave_only_the_surface() {
        let field = evaluate(&ShellParams::new(2.0, -4.0, 30)).unwrap();
        let palette = Palette::viridis();
        let mut doc = String::new();
        {
            let root = SVGBackend::with_string(&mut doc, (400, 320)).into_drawing_area();
            draw_potential_surface(&root, &field, &palette, Labels::Hidden).unwrap();
        }
        assert!(!doc.contains("<text"), "{doc}");
        assert!(doc.matches("<polygon").count() >= 29 * 29);
    }

    #[test]
    fn zero_charge_surface_renders() {
        let field = evaluate(&ShellParams::new(2.0, 0.0, 30)).unwrap();
        assert!(potential_svg(&field, &ChartOptions::default()).is_ok());
    }

    #[test]
    fn unknown_surface_palette_is_rejected() {
        let field = evaluate(&ShellParams::default()).unwrap();
        let opts = ChartOptions {
            surface_palette: "nope".into(),
            ..ChartOptions::default()
        };
        assert!(potential_svg(&field, &opts).is_err());
    }
}
