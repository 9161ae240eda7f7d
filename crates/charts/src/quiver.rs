//! Arrow geometry for the vector overlay on the field map.
//!
//! Arrows are computed in data coordinates so the same list serves every
//! backend. Every second sample along each axis carries an arrow; samples with
//! a zero vector (inside the shell, or `Q = 0`) carry none.

use gauss_shell_core::shell::ShellField;

/// Take every `QUIVER_STRIDE`-th sample in both axes.
pub const QUIVER_STRIDE: usize = 2;
/// Data length of an arrow whose magnitude equals the mean display magnitude.
pub const ARROW_SPAN: f64 = 0.25;
/// Barb length relative to the arrow length.
pub const HEAD_RATIO: f64 = 0.3;
/// Barb angle off the shaft, in degrees.
pub const HEAD_ANGLE_DEG: f64 = 20.0;

/// One arrow: shaft from `tail` to `tip`, two barbs ending at `tip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub tail: (f64, f64),
    pub tip: (f64, f64),
    pub barbs: [(f64, f64); 2],
}

impl Arrow {
    /// Builds an arrow at `(x, y)` for vector `(dx, dy)` already in data units.
    ///
    /// Returns `None` for a zero-length or non-finite vector.
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Option<Self> {
        let len = dx.hypot(dy);
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        let tip = (x + dx, y + dy);
        let back = (-dx / len, -dy / len);
        let head = HEAD_RATIO * len;
        let angle = HEAD_ANGLE_DEG.to_radians();
        let barb = |theta: f64| {
            let (s, c) = theta.sin_cos();
            (
                tip.0 + head * (back.0 * c - back.1 * s),
                tip.1 + head * (back.0 * s + back.1 * c),
            )
        };
        Some(Self {
            tail: (x, y),
            tip,
            barbs: [barb(angle), barb(-angle)],
        })
    }

    pub fn length(&self) -> f64 {
        (self.tip.0 - self.tail.0).hypot(self.tip.1 - self.tail.1)
    }
}

/// Scale from field units to data units: `ARROW_SPAN / mean(display |E|)`
/// over the outside samples, or `None` when that mean is missing or zero.
pub fn arrow_scale(field: &ShellField) -> Option<f64> {
    field
        .mean_outside_display()
        .filter(|&mean| mean > 0.0 && mean.is_finite())
        .map(|mean| ARROW_SPAN / mean)
}

/// Arrows for the subsampled grid, row-major. Empty when there is no field.
pub fn arrows(field: &ShellField) -> Vec<Arrow> {
    let Some(scale) = arrow_scale(field) else {
        return Vec::new();
    };
    let grid = field.grid();
    let n = grid.len();
    let (ex, ey) = (field.ex(), field.ey());
    let mut out = Vec::new();
    for row in (0..n).step_by(QUIVER_STRIDE) {
        for col in (0..n).step_by(QUIVER_STRIDE) {
            let (Some(u), Some(v)) = (ex.get(col, row), ey.get(col, row)) else {
                continue;
            };
            if u == 0.0 && v == 0.0 {
                continue;
            }
            let (x, y) = grid.point(col, row);
            out.extend(Arrow::new(x, y, u * scale, v * scale));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauss_shell_core::shell::{evaluate, ShellParams};

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-12 && (a.1 - b.1).abs() < 1e-12
    }

    #[test]
    fn arrow_along_x_has_symmetric_barbs() {
        let arrow = Arrow::new(1.0, 2.0, 0.5, 0.0).unwrap();
        assert_eq!(arrow.tail, (1.0, 2.0));
        assert_eq!(arrow.tip, (1.5, 2.0));
        let head = 0.3 * 0.5;
        let a = 20_f64.to_radians();
        let upper = (1.5 - head * a.cos(), 2.0 - head * a.sin());
        let lower = (1.5 - head * a.cos(), 2.0 + head * a.sin());
        assert!(close(arrow.barbs[0], upper) || close(arrow.barbs[0], lower));
        assert!(close(arrow.barbs[1], upper) || close(arrow.barbs[1], lower));
        assert!(!close(arrow.barbs[0], arrow.barbs[1]));
    }

    #[test]
    fn barbs_are_head_ratio_of_length() {
        let arrow = Arrow::new(0.0, 0.0, -0.3, 0.4).unwrap();
        assert!((arrow.length() - 0.5).abs() < 1e-12);
        for barb in arrow.barbs {
            let d = (barb.0 - arrow.tip.0).hypot(barb.1 - arrow.tip.1);
            assert!((d - 0.15).abs() < 1e-12, "barb length {d}");
        }
    }

    #[test]
    fn zero_vector_has_no_arrow() {
        assert!(Arrow::new(1.0, 1.0, 0.0, 0.0).is_none());
        assert!(Arrow::new(1.0, 1.0, f64::NAN, 0.0).is_none());
    }

    #[test]
    fn arrows_skip_inside_samples_and_use_stride() {
        let field = evaluate(&ShellParams::new(1.5, 5.0, 30)).unwrap();
        let arrows = arrows(&field);
        assert!(!arrows.is_empty());
        // at most one arrow per 2x2 block
        assert!(arrows.len() <= 15 * 15);
        let spacing = field.grid().spacing();
        let first_x = field.grid().x()[0];
        for a in &arrows {
            assert!(a.tail.0.hypot(a.tail.1) >= 1.5, "arrow inside shell at {:?}", a.tail);
            let steps = ((a.tail.0 - first_x) / spacing).round() as usize;
            assert_eq!(steps % QUIVER_STRIDE, 0);
        }
    }

    #[test]
    fn arrows_point_outward_for_positive_charge() {
        let field = evaluate(&ShellParams::new(1.0, 3.0, 30)).unwrap();
        for a in arrows(&field) {
            let radial = a.tail.0 * (a.tip.0 - a.tail.0) + a.tail.1 * (a.tip.1 - a.tail.1);
            assert!(radial > 0.0);
        }
    }

    #[test]
    fn arrows_point_inward_for_negative_charge() {
        let field = evaluate(&ShellParams::new(1.0, -3.0, 30)).unwrap();
        for a in arrows(&field) {
            let radial = a.tail.0 * (a.tip.0 - a.tail.0) + a.tail.1 * (a.tip.1 - a.tail.1);
            assert!(radial < 0.0);
        }
    }

    #[test]
    fn zero_charge_has_no_arrows() {
        let field = evaluate(&ShellParams::new(1.0, 0.0, 30)).unwrap();
        assert_eq!(arrow_scale(&field), None);
        assert!(arrows(&field).is_empty());
    }

    #[test]
    fn scale_uses_mean_display_magnitude() {
        let field = evaluate(&ShellParams::new(1.5, 5.0, 50)).unwrap();
        let mean = field.mean_outside_display().unwrap();
        assert!((arrow_scale(&field).unwrap() - ARROW_SPAN / mean).abs() < 1e-24);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arrows_start_on_grid_points_outside_the_shell(
                radius in 0.5_f64..=3.0,
                charge in prop_oneof![-10.0_f64..-0.5, 0.5_f64..10.0],
            ) {
                let field = evaluate(&ShellParams::new(radius, charge, 30)).unwrap();
                for a in arrows(&field) {
                    prop_assert!(a.tail.0.hypot(a.tail.1) >= radius);
                    prop_assert!(a.length() > 0.0);
                }
            }
        }
    }
}
