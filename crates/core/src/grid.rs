//! Square sampling grid over the physical domain `[-L, L] x [-L, L]`.
//!
//! The same axis is used for x and y. Mesh point `(col, row)` sits at
//! `(axis[col], axis[row])`, matching the row-major layout of [`Field`](crate::Field).

use crate::error::ShellError;

/// `n` evenly spaced samples over `[start, end]`, inclusive of both ends.
///
/// The last sample is exactly `end`. `n == 1` yields `[start]`; `n == 0` is empty.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + span * i as f64 / last })
                .collect()
        }
    }
}

/// An `n x n` square mesh over `[-half_width, half_width]` on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    half_width: f64,
    axis: Vec<f64>,
}

impl Grid {
    /// Builds the grid. Requires `n >= 2` and a finite, positive half-width.
    pub fn new(n: usize, half_width: f64) -> Result<Self, ShellError> {
        if n < 2 {
            return Err(ShellError::invalid(
                "resolution",
                format!("at least 2 samples per axis are required, got {n}"),
            ));
        }
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(ShellError::invalid(
                "half_width",
                format!("must be finite and positive, got {half_width}"),
            ));
        }
        Ok(Self {
            half_width,
            axis: linspace(-half_width, half_width, n),
        })
    }

    /// Samples per axis.
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    /// Always false: a grid has at least two samples per axis.
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Domain half-width `L`.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Coordinates along x.
    pub fn x(&self) -> &[f64] {
        &self.axis
    }

    /// Coordinates along y.
    pub fn y(&self) -> &[f64] {
        &self.axis
    }

    /// Distance between neighbouring samples.
    pub fn spacing(&self) -> f64 {
        2.0 * self.half_width / (self.axis.len() - 1) as f64
    }

    /// Physical coordinates of mesh point `(col, row)`.
    ///
    /// Panics if either index is out of range.
    pub fn point(&self, col: usize, row: usize) -> (f64, f64) {
        (self.axis[col], self.axis[row])
    }

    /// Iterates `(col, row, x, y)` over the mesh in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (usize, usize, f64, f64)> + '_ {
        let n = self.axis.len();
        (0..n * n).map(move |i| {
            let (col, row) = (i % n, i / n);
            (col, row, self.axis[col], self.axis[row])
        })
    }

    /// Cell boundaries for drawing one cell per sample: midpoints between
    /// samples, extended by half a spacing at both ends. Length `n + 1`.
    pub fn cell_edges(&self) -> Vec<f64> {
        let half = self.spacing() / 2.0;
        let mut edges = Vec::with_capacity(self.axis.len() + 1);
        edges.push(self.axis[0] - half);
        edges.extend(self.axis.windows(2).map(|w| (w[0] + w[1]) / 2.0));
        edges.push(self.axis[self.axis.len() - 1] + half);
        edges
    }

    /// Index of the axis sample closest to `v` (clamped to the axis).
    pub fn nearest_index(&self, v: f64) -> usize {
        let last = self.axis.len() - 1;
        let pos = (v + self.half_width) / self.spacing();
        if pos.is_nan() {
            return 0;
        }
        (pos.round().max(0.0) as usize).min(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(-4.0, 4.0, 5);
        assert_eq!(xs, vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
    }

    #[test]
    fn linspace_last_sample_is_exact() {
        let xs = linspace(-4.0, 4.0, 30);
        assert_eq!(xs.len(), 30);
        assert_eq!(xs[0], -4.0);
        assert_eq!(xs[29], 4.0);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.5, 1.0, 1), vec![0.5]);
    }

    #[test]
    fn new_rejects_fewer_than_two_samples() {
        assert!(matches!(
            Grid::new(1, 4.0),
            Err(ShellError::InvalidParameter { name, .. }) if name == "resolution"
        ));
    }

    #[test]
    fn new_rejects_bad_half_width() {
        for l in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Grid::new(10, l).is_err(), "accepted half_width {l}");
        }
    }

    #[test]
    fn odd_resolution_places_a_sample_at_origin() {
        let grid = Grid::new(5, 4.0).unwrap();
        assert_eq!(grid.point(2, 2), (0.0, 0.0));
    }

    #[test]
    fn even_resolution_avoids_origin() {
        let grid = Grid::new(50, 4.0).unwrap();
        assert!(grid.x().iter().all(|&x| x != 0.0));
    }

    #[test]
    fn points_are_row_major_with_y_along_rows() {
        let grid = Grid::new(3, 1.0).unwrap();
        let pts: Vec<_> = grid.points().collect();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], (0, 0, -1.0, -1.0));
        assert_eq!(pts[1], (1, 0, 0.0, -1.0));
        assert_eq!(pts[3], (0, 1, -1.0, 0.0));
        assert_eq!(pts[8], (2, 2, 1.0, 1.0));
    }

    #[test]
    fn spacing_matches_axis() {
        let grid = Grid::new(9, 4.0).unwrap();
        assert!((grid.spacing() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cell_edges_bracket_every_sample() {
        let grid = Grid::new(5, 4.0).unwrap();
        let edges = grid.cell_edges();
        assert_eq!(edges, vec![-5.0, -3.0, -1.0, 1.0, 3.0, 5.0]);
        for (i, &x) in grid.x().iter().enumerate() {
            assert!(edges[i] < x && x < edges[i + 1]);
        }
    }

    #[test]
    fn nearest_index_rounds_and_clamps() {
        let grid = Grid::new(9, 4.0).unwrap();
        assert_eq!(grid.nearest_index(-4.0), 0);
        assert_eq!(grid.nearest_index(0.4), 4);
        assert_eq!(grid.nearest_index(0.6), 5);
        assert_eq!(grid.nearest_index(100.0), 8);
        assert_eq!(grid.nearest_index(-100.0), 0);
        assert_eq!(grid.nearest_index(f64::NAN), 0);
    }
}
