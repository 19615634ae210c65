//! Boundary error types for Gambit.
//!
//! Everything here is recoverable input validation: it is raised before any
//! actor sees a message, so no actor state is ever touched by these failures.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for input validation and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Location codec errors
    #[error("invalid location '{input}': {reason}")]
    InvalidLocation { input: String, reason: String },

    #[error("coordinate ({file}, {rank}) is outside the 8x8 board")]
    OutOfBounds { file: u8, rank: u8 },

    // Configuration errors
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create an invalid location error.
    pub fn invalid_location(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an out-of-bounds coordinate error.
    pub const fn out_of_bounds(file: u8, rank: u8) -> Self {
        Self::OutOfBounds { file, rank }
    }

    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a TOML parse error.
    pub fn toml_parse_failed(reason: impl Into<String>) -> Self {
        Self::TomlParseFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
