//! # Gambit Core
//!
//! Plain data shared by every Gambit crate: board locations and their text
//! codec, piece kinds and glyphs, and the boundary error type.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod location;
pub mod piece;
pub mod result;

pub use error::Error;
pub use location::{Location, MoveRequest};
pub use piece::{Color, PieceKind, Role};
pub use result::{Result, ResultExt};
