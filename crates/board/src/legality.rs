//! Move legality hook.
//!
//! A piece actor consults its validator before it sends the board a
//! relocation notice, so a rejected move never touches the occupancy map.
//! The crate ships [`Permissive`]; real rules plug in by implementing
//! [`MoveValidator`].

use gambit_core::{Location, PieceKind};

/// What a piece knows about itself when a move is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSnapshot {
    /// Current square.
    pub location: Location,
    /// Current kind.
    pub kind: PieceKind,
}

/// Pure predicate deciding whether a piece may move to `to`.
pub trait MoveValidator: Send + Sync + 'static {
    /// Returns the rejection reason if the move is not allowed.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the move is refused.
    fn validate(&self, piece: &PieceSnapshot, to: Location) -> Result<(), String>;
}

/// Allows every move.
#[derive(Debug, Clone, Copy, Default)]
pub struct Permissive;

impl MoveValidator for Permissive {
    fn validate(&self, _piece: &PieceSnapshot, _to: Location) -> Result<(), String> {
        Ok(())
    }
}

impl<F> MoveValidator for F
where
    F: Fn(&PieceSnapshot, Location) -> Result<(), String> + Send + Sync + 'static,
{
    fn validate(&self, piece: &PieceSnapshot, to: Location) -> Result<(), String> {
        self(piece, to)
    }
}
