#![deny(unsafe_code)]
//! Core types for the gauss-shell demo.
//!
//! Provides the closed-form shell evaluator ([`evaluate`], [`sample_at`]),
//! the domain [`Grid`], the row-major scalar [`Field`], range-constrained
//! [`Controls`], display [`ShellMetrics`], color types and [`Palette`], and
//! the shared [`ShellError`].

pub mod color;
pub mod error;
pub mod field;
pub mod grid;
pub mod metrics;
pub mod palette;
pub mod params;
pub mod shell;

pub use color::{LinearRgb, OkLab, Srgb};
pub use error::ShellError;
pub use field::{percentile, Field};
pub use grid::{linspace, Grid};
pub use metrics::{format_sci, Flux, ShellMetrics};
pub use palette::Palette;
pub use params::Controls;
pub use shell::{
    evaluate, sample_at, FieldSample, Region, Shell, ShellField, ShellParams, COULOMB_K,
    DOMAIN_HALF_WIDTH,
};
