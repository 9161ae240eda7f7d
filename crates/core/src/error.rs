//! Error types for the gauss-shell core.

use thiserror::Error;

/// Errors produced by field evaluation, palette construction and rendering.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A physical or grid parameter was outside its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Width or height was zero when creating a Field or a chart.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two fields (or a field and its data) had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in palette has the requested name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// The chart backend failed while drawing.
    #[error("render error: {0}")]
    Render(String),

    /// Writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl ShellError {
    /// Shorthand for [`ShellError::InvalidParameter`].
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ShellError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
