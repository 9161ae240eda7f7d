//! Two-dimensional scalar field of physical values.
//!
//! A `Field` stores `width * height` f64 values in row-major layout: index
//! `row * width + col`, where `row` follows the y axis of the domain grid and
//! `col` the x axis. Values are not clamped; field magnitudes and potentials
//! routinely span many orders of magnitude.

use crate::error::ShellError;

/// A 2D row-major scalar field with bounds-checked access.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a field from a row-major data vector, validating its length.
    ///
    /// Returns `ShellError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, ShellError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ShellError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Field width in cells (samples along x).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells (samples along y).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(col, row)`, or `None` outside the field.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        (col < self.width && row < self.height).then(|| self.data[row * self.width + col])
    }

    /// Applies `f` to every value, producing a new field of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Field {
        Field {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Returns a copy with every value clamped to `[lo, hi]`.
    pub fn clipped(&self, lo: f64, hi: f64) -> Field {
        self.map(|v| v.max(lo).min(hi))
    }

    /// Smallest and largest non-NaN values, or `None` if there are none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Arithmetic mean of the cells where `mask` is true.
    ///
    /// Returns `None` if no cell is selected or the mask has the wrong length.
    pub fn mean_where(&self, mask: &[bool]) -> Option<f64> {
        if mask.len() != self.data.len() {
            return None;
        }
        let (sum, count) = self
            .data
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .fold((0.0, 0usize), |(s, n), (&v, _)| (s + v, n + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Iterates over all cells yielding `(col, row, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % self.width, i / self.width, v))
    }
}

/// `q`-th percentile (0..=100) of `values` using linear interpolation between
/// order statistics, the same rule as numpy's default.
///
/// NaN values are ignored. Returns `None` when nothing remains.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let rank = q.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

fn checked_len(width: usize, height: usize) -> Result<usize, ShellError> {
    if width == 0 || height == 0 {
        return Err(ShellError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(ShellError::InvalidDimensions)
}
