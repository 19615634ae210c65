//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Gambit - chess pieces and board as message-passing actors
#[derive(Parser, Debug)]
#[command(name = "gambit")]
#[command(version)]
#[command(about = "Chess pieces and the board as independent actors")]
#[command(
    long_about = "Gambit spawns a board actor and one actor per piece, sets up the standard position, plays an opening move through the piece and board protocols, and renders the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Set up the board and play a single move
    Play {
        /// Square to move from (e.g. D2)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Square to move to (e.g. D4)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not print the board after the move
        #[arg(long, default_value_t = false)]
        no_render: bool,

        /// Skip clearing; pieces stay registered until the board closes
        #[arg(long, default_value_t = false)]
        keep: bool,
    },

    /// Set up the board and print the starting position
    Show {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    /// Configuration file named on the command line, if any.
    #[must_use]
    pub const fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Play { config, .. } | Self::Show { config } => config.as_ref(),
        }
    }
}
