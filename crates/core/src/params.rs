//! Typed extraction of control values from `serde_json::Value` objects, and
//! the range-constrained [`Controls`] that drive one evaluation.
//!
//! The `param_*` helpers never fail: a missing key or a value of the wrong
//! type yields the default. [`Controls`] then clamps and snaps what it reads
//! so every combination it hands to the evaluator is one the page sliders
//! could have produced.

use serde::Serialize;
use serde_json::{json, Value};

use crate::shell::{ShellParams, DOMAIN_HALF_WIDTH};

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

pub const RADIUS_MIN: f64 = 0.5;
pub const RADIUS_MAX: f64 = 3.0;
pub const RADIUS_STEP: f64 = 0.1;
pub const DEFAULT_RADIUS: f64 = 1.5;

pub const CHARGE_MIN: f64 = -10.0;
pub const CHARGE_MAX: f64 = 10.0;
pub const CHARGE_STEP: f64 = 0.5;
pub const DEFAULT_CHARGE: f64 = 5.0;

/// Grid sizes offered by the resolution selector.
pub const RESOLUTION_OPTIONS: [usize; 3] = [30, 50, 80];
pub const DEFAULT_RESOLUTION: usize = 50;

pub const DEFAULT_SHOW_VECTORS: bool = true;

/// The four user-facing inputs, always within their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Controls {
    radius: f64,
    charge: f64,
    resolution: usize,
    show_vectors: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            charge: DEFAULT_CHARGE,
            resolution: DEFAULT_RESOLUTION,
            show_vectors: DEFAULT_SHOW_VECTORS,
        }
    }
}

impl Controls {
    /// Normalizes raw values: radius and charge are clamped and snapped to
    /// their step, resolution snaps to the nearest offered size. Non-finite
    /// numbers fall back to the defaults.
    pub fn new(radius: f64, charge: f64, resolution: usize, show_vectors: bool) -> Self {
        Self {
            radius: snap(radius, RADIUS_MIN, RADIUS_MAX, RADIUS_STEP, DEFAULT_RADIUS),
            charge: snap(charge, CHARGE_MIN, CHARGE_MAX, CHARGE_STEP, DEFAULT_CHARGE),
            resolution: nearest_resolution(resolution as f64),
            show_vectors,
        }
    }

    /// Reads controls from a JSON object. Missing keys or wrong types take
    /// the default; numeric resolutions need not be integers.
    pub fn from_json(params: &Value) -> Self {
        let resolution = param_f64(params, "resolution", DEFAULT_RESOLUTION as f64);
        Self {
            radius: snap(
                param_f64(params, "radius", DEFAULT_RADIUS),
                RADIUS_MIN,
                RADIUS_MAX,
                RADIUS_STEP,
                DEFAULT_RADIUS,
            ),
            charge: snap(
                param_f64(params, "charge", DEFAULT_CHARGE),
                CHARGE_MIN,
                CHARGE_MAX,
                CHARGE_STEP,
                DEFAULT_CHARGE,
            ),
            resolution: nearest_resolution(resolution),
            show_vectors: param_bool(params, "show_vectors", DEFAULT_SHOW_VECTORS),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn show_vectors(&self) -> bool {
        self.show_vectors
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "radius": self.radius,
            "charge": self.charge,
            "resolution": self.resolution,
            "show_vectors": self.show_vectors,
        })
    }

    /// Type, range, step, default and description of every control.
    pub fn param_schema() -> Value {
        json!({
            "radius": {
                "type": "number",
                "default": DEFAULT_RADIUS,
                "min": RADIUS_MIN,
                "max": RADIUS_MAX,
                "step": RADIUS_STEP,
                "description": "Shell radius R (m)"
            },
            "charge": {
                "type": "number",
                "default": DEFAULT_CHARGE,
                "min": CHARGE_MIN,
                "max": CHARGE_MAX,
                "step": CHARGE_STEP,
                "description": "Total charge Q on the shell (signed)"
            },
            "resolution": {
                "type": "integer",
                "default": DEFAULT_RESOLUTION,
                "options": RESOLUTION_OPTIONS,
                "description": "Grid samples per axis N"
            },
            "show_vectors": {
                "type": "boolean",
                "default": DEFAULT_SHOW_VECTORS,
                "description": "Overlay field direction arrows on the field map"
            }
        })
    }

    /// Evaluator inputs over the fixed domain `[-4, 4]^2`.
    pub fn shell_params(&self) -> ShellParams {
        ShellParams {
            radius: self.radius,
            charge: self.charge,
            resolution: self.resolution,
            half_width: DOMAIN_HALF_WIDTH,
        }
    }
}

/// Rounds `value` to a multiple of `step` and clamps it to `[min, max]`.
fn snap(value: f64, min: f64, max: f64, step: f64, default: f64) -> f64 {
    if !value.is_finite() {
        return default;
    }
    let scale = step.recip();
    ((value * scale).round() / scale).clamp(min, max)
}

/// Offered resolution closest to `value`; ties go to the smaller size.
fn nearest_resolution(value: f64) -> usize {
    if !value.is_finite() {
        return DEFAULT_RESOLUTION;
    }
    RESOLUTION_OPTIONS
        .iter()
        .copied()
        .min_by(|&a, &b| (a as f64 - value).abs().total_cmp(&(b as f64 - value).abs()))
        .unwrap_or(DEFAULT_RESOLUTION)
}
