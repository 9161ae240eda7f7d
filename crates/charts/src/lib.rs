#![deny(unsafe_code)]
//! Chart rendering for the gauss-shell demo.
//!
//! Both charts are drawn with `plotters` against any `DrawingBackend`: the
//! page gets SVG strings, the CLI gets SVG files or PNG snapshots (feature
//! `png`, default on). This crate sits between `gauss-shell-core`, which
//! produces the [`ShellField`](gauss_shell_core::ShellField) arrays, and the
//! CLI and page server that present them.

pub mod field_map;
pub mod quiver;
pub mod surface;
pub mod theme;

#[cfg(feature = "png")]
pub mod snapshot;

use gauss_shell_core::error::ShellError;
use gauss_shell_core::palette::Palette;
use gauss_shell_core::params::{param_string, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use field_map::{draw_field_map, field_map_svg};
pub use surface::{draw_potential_surface, potential_svg};
pub use theme::Labels;

pub const DEFAULT_WIDTH: u32 = 760;
pub const DEFAULT_HEIGHT: u32 = 640;
pub const DEFAULT_FIELD_PALETTE: &str = "inferno";
pub const DEFAULT_SURFACE_PALETTE: &str = "viridis";

const MIN_SIDE: u32 = 200;
const MAX_SIDE: u32 = 4096;

/// Presentation settings shared by both charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub field_palette: String,
    pub surface_palette: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            field_palette: DEFAULT_FIELD_PALETTE.to_string(),
            surface_palette: DEFAULT_SURFACE_PALETTE.to_string(),
        }
    }
}

impl ChartOptions {
    /// Reads `width`, `height`, `field_palette` and `surface_palette`,
    /// falling back to the defaults. Pixel sizes are clamped to a usable range.
    pub fn from_json(params: &Value) -> Self {
        let side = |name: &str, default: u32| {
            param_usize(params, name, default as usize).clamp(MIN_SIDE as usize, MAX_SIDE as usize)
                as u32
        };
        Self {
            width: side("width", DEFAULT_WIDTH),
            height: side("height", DEFAULT_HEIGHT),
            field_palette: param_string(params, "field_palette", DEFAULT_FIELD_PALETTE),
            surface_palette: param_string(params, "surface_palette", DEFAULT_SURFACE_PALETTE),
        }
    }

    /// Resolves both palette names.
    ///
    /// Returns `ShellError::UnknownPalette` for a name that is not built in.
    pub fn palettes(&self) -> Result<(Palette, Palette), ShellError> {
        Ok((
            Palette::from_name(&self.field_palette)?,
            Palette::from_name(&self.surface_palette)?,
        ))
    }

    /// Rejects sizes too small to hold the axes or too large to buffer.
    pub fn validate(&self) -> Result<(), ShellError> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !(MIN_SIDE..=MAX_SIDE).contains(&v) {
                return Err(ShellError::invalid(
                    name,
                    format!("must be within {MIN_SIDE}..={MAX_SIDE} pixels, got {v}"),
                ));
            }
        }
        Ok(())
    }
}

/// Wraps any plotters error as `ShellError::Render`.
pub(crate) fn render_err(e: impl std::fmt::Display) -> ShellError {
    ShellError::Render(e.to_string())
}
