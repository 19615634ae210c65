#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # Gambit
//!
//! Chess pieces and the board as independent actors.
//!
//! This library holds the binary's command layer and re-exports the
//! workspace crates for convenience.

pub use gambit_board;
pub use gambit_core;

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
