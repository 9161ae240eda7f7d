//! Display metrics shown next to the field map.
//!
//! All three come straight from the physical parameters; none of them reads
//! the clipped heatmap field.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shell::Shell;

/// Direction of the net electric flux through a closed surface around the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flux {
    /// `Q > 0`: field lines leave the shell.
    Outward,
    /// `Q < 0`: field lines enter the shell.
    Inward,
    /// `Q = 0`: no net flux.
    None,
}

impl Flux {
    pub fn from_charge(charge: f64) -> Self {
        if charge > 0.0 {
            Flux::Outward
        } else if charge < 0.0 {
            Flux::Inward
        } else {
            Flux::None
        }
    }

    /// Lowercase label used in CLI output and the page.
    pub fn label(self) -> &'static str {
        match self {
            Flux::Outward => "outward",
            Flux::Inward => "inward",
            Flux::None => "none",
        }
    }
}

impl fmt::Display for Flux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three headline numbers for a shell configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellMetrics {
    /// `k|Q|/R^2` in N/C.
    pub surface_field: f64,
    /// `kQ/R` in V.
    pub interior_potential: f64,
    pub flux: Flux,
}

impl ShellMetrics {
    pub fn from_shell(shell: &Shell) -> Self {
        Self {
            surface_field: shell.surface_field(),
            interior_potential: shell.interior_potential(),
            flux: Flux::from_charge(shell.charge()),
        }
    }
}

impl fmt::Display for ShellMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "surface field (r = R):      {} N/C",
            format_sci(self.surface_field)
        )?;
        writeln!(
            f,
            "interior potential (r < R): {} V",
            format_sci(self.interior_potential)
        )?;
        write!(f, "flux:                       {}", self.flux)
    }
}

/// Scientific notation with two decimals and a signed two-digit exponent,
/// e.g. `2.00e+10`, `-3.00e+10`, `0.00e+00`.
pub fn format_sci(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{value:.2e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => raw,
    }
}
