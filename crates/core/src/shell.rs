//! Electric field and potential of a uniformly charged spherical shell.
//!
//! By Gauss's law the enclosed charge is zero for `r < R`, so the field
//! vanishes there and the potential is the constant `kQ/R`. For `r >= R` the
//! shell acts as a point charge at the origin: `|E| = k|Q|/r^2`, `V = kQ/r`,
//! with `E` pointing radially outward for positive `Q` and inward for
//! negative `Q`.
//!
//! [`evaluate`] samples the whole domain grid in one pass. The result keeps
//! the physical magnitude and a separately clipped copy whose only consumer
//! is the heatmap color scale.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ShellError;
use crate::field::{percentile, Field};
use crate::grid::Grid;
use crate::metrics::ShellMetrics;

/// Coulomb's constant in the units used throughout (N m^2 / C^2).
pub const COULOMB_K: f64 = 9.0e9;
/// Default half-width `L` of the square domain `[-L, L]^2`.
pub const DOMAIN_HALF_WIDTH: f64 = 4.0;
/// Distance substituted for `r == 0` before dividing by `r`.
pub const ORIGIN_EPSILON: f64 = 1e-9;
/// Percentile of outside-shell magnitudes used as the heatmap upper bound.
pub const DISPLAY_PERCENTILE: f64 = 98.0;
/// Heatmap upper bound when no sample lies outside the shell.
pub const FALLBACK_CLIP_LIMIT: f64 = 1.0;

/// Which side of the shell a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// `distance < R`: zero field, constant potential.
    Inside,
    /// `distance >= R`: point-charge field and potential.
    Outside,
}

impl Region {
    /// Classifies a point at `distance` from the origin. The shell surface
    /// itself counts as outside.
    pub fn classify(distance: f64, radius: f64) -> Self {
        if distance < radius {
            Region::Inside
        } else {
            Region::Outside
        }
    }
}

/// A validated shell: radius `R > 0` and finite total charge `Q`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    radius: f64,
    charge: f64,
}

impl Shell {
    /// Returns `ShellError::InvalidParameter` for a non-positive or
    /// non-finite radius, or a non-finite charge. `Q = 0` is valid.
    pub fn new(radius: f64, charge: f64) -> Result<Self, ShellError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShellError::invalid(
                "radius",
                format!("must be finite and positive, got {radius}"),
            ));
        }
        if !charge.is_finite() {
            return Err(ShellError::invalid(
                "charge",
                format!("must be finite, got {charge}"),
            ));
        }
        Ok(Self { radius, charge })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// `k|Q|/R^2`, the field magnitude just outside the surface.
    pub fn surface_field(&self) -> f64 {
        COULOMB_K * self.charge.abs() / (self.radius * self.radius)
    }

    /// `kQ/R`, the potential everywhere inside (and on) the shell.
    pub fn interior_potential(&self) -> f64 {
        COULOMB_K * self.charge / self.radius
    }

    /// Evaluates field and potential at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> FieldSample {
        let distance = x.hypot(y);
        let region = Region::classify(distance, self.radius);
        let (e_mag, v_pot, ex, ey) = match region {
            Region::Inside => (0.0, self.interior_potential(), 0.0, 0.0),
            Region::Outside => {
                let r = if distance == 0.0 {
                    ORIGIN_EPSILON
                } else {
                    distance
                };
                let e_mag = COULOMB_K * self.charge.abs() / (r * r);
                let sign = charge_sign(self.charge);
                (
                    e_mag,
                    COULOMB_K * self.charge / r,
                    e_mag * (x / r) * sign,
                    e_mag * (y / r) * sign,
                )
            }
        };
        FieldSample {
            x,
            y,
            distance,
            region,
            e_mag,
            v_pot,
            ex,
            ey,
        }
    }
}

/// Field and potential at a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSample {
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub region: Region,
    /// Physical field magnitude (never clipped).
    pub e_mag: f64,
    pub v_pot: f64,
    pub ex: f64,
    pub ey: f64,
}

/// Inputs of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellParams {
    /// Shell radius `R` (m).
    pub radius: f64,
    /// Total charge `Q` (signed).
    pub charge: f64,
    /// Samples per axis `N`.
    pub resolution: usize,
    /// Domain half-width `L` (m).
    pub half_width: f64,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            radius: 1.5,
            charge: 5.0,
            resolution: 50,
            half_width: DOMAIN_HALF_WIDTH,
        }
    }
}

impl ShellParams {
    pub fn new(radius: f64, charge: f64, resolution: usize) -> Self {
        Self {
            radius,
            charge,
            resolution,
            half_width: DOMAIN_HALF_WIDTH,
        }
    }

    /// Validated shell described by these parameters.
    pub fn shell(&self) -> Result<Shell, ShellError> {
        Shell::new(self.radius, self.charge)
    }
}

/// Every derived array of one evaluation over the domain grid.
#[derive(Debug, Clone)]
pub struct ShellField {
    shell: Shell,
    grid: Grid,
    e_mag: Field,
    e_display: Field,
    clip_limit: f64,
    v_pot: Field,
    ex: Field,
    ey: Field,
    outside: Vec<bool>,
}

/// Samples the shell over the `N x N` grid spanning `[-L, L]^2`.
///
/// Pure function of its parameters: every call rebuilds the grid and all
/// fields from scratch.
pub fn evaluate(params: &ShellParams) -> Result<ShellField, ShellError> {
    let shell = params.shell()?;
    let grid = Grid::new(params.resolution, params.half_width)?;
    let n = grid.len();

    let len = n * n;
    let mut e_mag = Vec::with_capacity(len);
    let mut v_pot = Vec::with_capacity(len);
    let mut ex = Vec::with_capacity(len);
    let mut ey = Vec::with_capacity(len);
    let mut outside = Vec::with_capacity(len);

    for (_, _, x, y) in grid.points() {
        let s = shell.sample(x, y);
        e_mag.push(s.e_mag);
        v_pot.push(s.v_pot);
        ex.push(s.ex);
        ey.push(s.ey);
        outside.push(s.region == Region::Outside);
    }

    let outside_values: Vec<f64> = e_mag
        .iter()
        .zip(&outside)
        .filter(|(_, out)| **out)
        .map(|(&e, _)| e)
        .collect();
    let clip_limit =
        percentile(&outside_values, DISPLAY_PERCENTILE).unwrap_or(FALLBACK_CLIP_LIMIT);

    let e_mag = Field::from_data(n, n, e_mag)?;
    let e_display = e_mag.clipped(0.0, clip_limit);

    let field = ShellField {
        shell,
        grid,
        e_mag,
        e_display,
        clip_limit,
        v_pot: Field::from_data(n, n, v_pot)?,
        ex: Field::from_data(n, n, ex)?,
        ey: Field::from_data(n, n, ey)?,
        outside,
    };

    if field.reaches_boundary() {
        warn!(
            radius = params.radius,
            half_width = params.half_width,
            outside = field.outside_count(),
            "shell radius reaches the domain boundary"
        );
    }
    debug!(
        radius = params.radius,
        charge = params.charge,
        resolution = n,
        outside = field.outside_count(),
        clip_limit,
        "evaluated shell field"
    );

    Ok(field)
}

/// Evaluates a single coordinate with the same formulas as [`evaluate`].
///
/// The resolution is irrelevant here and not validated.
pub fn sample_at(x: f64, y: f64, params: &ShellParams) -> Result<FieldSample, ShellError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ShellError::invalid(
            "point",
            format!("coordinates must be finite, got ({x}, {y})"),
        ));
    }
    Ok(params.shell()?.sample(x, y))
}

impl ShellField {
    pub fn shell(&self) -> Shell {
        self.shell
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Physical field magnitude.
    pub fn e_mag(&self) -> &Field {
        &self.e_mag
    }

    /// Field magnitude clipped to `[0, clip_limit]`, for the heatmap color
    /// scale only.
    pub fn e_display(&self) -> &Field {
        &self.e_display
    }

    /// Upper bound of the heatmap color scale: the 98th percentile of the
    /// outside-shell magnitudes, or 1.0 when nothing lies outside.
    pub fn clip_limit(&self) -> f64 {
        self.clip_limit
    }

    pub fn v_pot(&self) -> &Field {
        &self.v_pot
    }

    pub fn ex(&self) -> &Field {
        &self.ex
    }

    pub fn ey(&self) -> &Field {
        &self.ey
    }

    pub fn outside_count(&self) -> usize {
        self.outside.iter().filter(|&&o| o).count()
    }

    /// True when `R >= L`: the shell touches or leaves the visible domain.
    pub fn reaches_boundary(&self) -> bool {
        self.shell.radius >= self.grid.half_width()
    }

    /// True when no sample lies outside the shell.
    pub fn all_inside(&self) -> bool {
        self.outside_count() == 0
    }

    /// Mean display magnitude over the outside samples, if any.
    pub fn mean_outside_display(&self) -> Option<f64> {
        self.e_display.mean_where(&self.outside)
    }

    /// The display metrics, derived from the physical parameters.
    pub fn metrics(&self) -> ShellMetrics {
        ShellMetrics::from_shell(&self.shell)
    }
}

/// `sign(Q)` with `sign(0) = 0`, unlike `f64::signum`.
fn charge_sign(charge: f64) -> f64 {
    if charge > 0.0 {
        1.0
    } else if charge < 0.0 {
        -1.0
    } else {
        0.0
    }
}
