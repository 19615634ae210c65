//! Configuration for the demonstration game.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::collections::HashSet;
use std::path::Path;

use gambit_core::{Color, Error, Location, MoveRequest, Result, ResultExt};
use serde::{Deserialize, Serialize};

/// Configuration for a demonstration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Sides to set up, in order.
    #[serde(default = "default_sides")]
    pub sides: Vec<Color>,

    /// Move to play once the board is set up.
    #[serde(default)]
    pub opening: OpeningConfig,

    /// Print the board after the move.
    #[serde(default = "default_true")]
    pub render: bool,

    /// Delete every piece before closing the board.
    #[serde(default = "default_true")]
    pub clear_on_exit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            sides: default_sides(),
            opening: OpeningConfig::default(),
            render: default_true(),
            clear_on_exit: default_true(),
        }
    }
}

impl GameConfig {
    /// Create a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TomlParseFailed`] for malformed TOML (including bad
    /// squares, which fail the location codec during deserialization) or
    /// [`Error::InvalidConfig`] if validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::toml_parse_failed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileReadFailed`] if the file cannot be read, otherwise
    /// see [`GameConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        std::fs::read_to_string(path)
            .map_err(|e| Error::file_read_failed(path, e.to_string()))
            .and_then(|text| Self::from_toml_str(&text))
            .warn_on_error("Failed to load configuration")
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.sides.is_empty() {
            return Err(Error::invalid_config("sides must name at least one color"));
        }

        let unique: HashSet<Color> = self.sides.iter().copied().collect();
        if unique.len() != self.sides.len() {
            return Err(Error::invalid_config("sides must not repeat a color"));
        }

        if self.log_filter.trim().is_empty() {
            return Err(Error::invalid_config("log_filter must not be empty"));
        }

        Ok(())
    }

    /// The configured opening as a move request.
    #[must_use]
    pub const fn opening_move(&self) -> MoveRequest {
        MoveRequest {
            from: self.opening.from,
            to: self.opening.to,
        }
    }
}

/// The demonstration move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpeningConfig {
    /// Square to move from.
    #[serde(default = "default_from")]
    pub from: Location,

    /// Square to move to.
    #[serde(default = "default_to")]
    pub to: Location,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        Self {
            from: default_from(),
            to: default_to(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_sides() -> Vec<Color> {
    vec![Color::White, Color::Black]
}

const fn default_true() -> bool {
    true
}

// D2 and D4: the queen's pawn opening.
fn default_from() -> Location {
    Location::new(3, 1).unwrap_or_default()
}

fn default_to() -> Location {
    Location::new(3, 3).unwrap_or_default()
}
