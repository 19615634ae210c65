//! # Gambit Board
//!
//! Chess pieces and the board as independent ractor actors that talk only
//! through message passing.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub use gambit_core::{Color, Error, Location, MoveRequest, PieceKind, Result, Role};

/// Piece and board actors, their messages, handles and spawn helpers.
pub mod actors;

/// Whole-board coordination: play a move, clear, render.
pub mod game;

/// Move legality hook.
pub mod legality;

/// Standard starting arrangement.
pub mod setup;

pub use actors::{ActorError, BoardHandle, PieceHandle};
