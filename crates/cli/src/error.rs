//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: evaluation error (invalid shell parameters, chart rendering)
//! - 11: I/O error (chart files, output directory)
//! - 12: input error (unknown palette, unusable option)
//! - 13: serialization error
//! - 14: server error (bind failure, runtime)

use gauss_shell_core::ShellError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// Evaluation or rendering failed.
    Shell(ShellError),
    /// Writing a chart or creating the output directory failed.
    Io(String),
    /// A user input error the evaluator never sees (e.g. palette names).
    Input(String),
    /// JSON output failed.
    Serialization(String),
    /// The page server could not start or stopped with an error.
    Server(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Shell(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::Server(_) => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Shell(e) => write!(f, "{e}"),
            CliError::Io(msg)
            | CliError::Input(msg)
            | CliError::Serialization(msg)
            | CliError::Server(msg) => f.write_str(msg),
        }
    }
}

impl From<ShellError> for CliError {
    fn from(e: ShellError) -> Self {
        match e {
            ShellError::Io(msg) => CliError::Io(msg),
            ShellError::UnknownPalette(_) => CliError::Input(e.to_string()),
            other => CliError::Shell(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
