//! Actor-specific error types.
//!
//! These are returned in RPC replies. The board checks every precondition
//! before it mutates the occupancy map, so a rejected request leaves the
//! actor running with its state intact; the caller decides how fatal the
//! failure is (see [`ActorError::is_protocol_violation`]).

use gambit_core::Location;
use thiserror::Error;

/// Errors returned through piece and board reply ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    /// Place or Relocate targeted a square that already holds another piece.
    #[error("A piece already exists on {0}")]
    Occupied(Location),

    /// Relocate found no piece on its source square.
    #[error("No piece at {0}")]
    Vacant(Location),

    /// Delete was asked to remove a piece the board does not track.
    #[error("Piece not registered on the board: {0}")]
    NotRegistered(String),

    /// A piece was queried or moved before SetLocation/SetKind.
    #[error("Piece not configured: {0}")]
    Unconfigured(String),

    /// The legality hook refused the move.
    #[error("Illegal move from {from} to {to}: {reason}")]
    IllegalMove {
        from: Location,
        to: Location,
        reason: String,
    },

    /// The target actor has stopped or dropped the reply port.
    #[error("Actor not available: {0}")]
    Unavailable(String),

    /// Failed to spawn an actor.
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),
}

impl ActorError {
    /// Create an occupied-square error.
    pub const fn occupied(location: Location) -> Self {
        Self::Occupied(location)
    }

    /// Create a vacant-square error.
    pub const fn vacant(location: Location) -> Self {
        Self::Vacant(location)
    }

    /// Create a not-registered error.
    pub fn not_registered(piece: impl Into<String>) -> Self {
        Self::NotRegistered(piece.into())
    }

    /// Create an unconfigured-piece error.
    pub fn unconfigured(what: impl Into<String>) -> Self {
        Self::Unconfigured(what.into())
    }

    /// Create an illegal move error.
    pub fn illegal_move(from: Location, to: Location, reason: impl Into<String>) -> Self {
        Self::IllegalMove {
            from,
            to,
            reason: reason.into(),
        }
    }

    /// Create an actor unavailable error.
    pub fn unavailable(actor: impl Into<String>) -> Self {
        Self::Unavailable(actor.into())
    }

    /// Create a spawn failure error.
    pub fn spawn_failed(msg: impl Into<String>) -> Self {
        Self::SpawnFailed(msg.into())
    }

    /// Whether this error means a caller broke the actor contract.
    ///
    /// Illegal moves are the only expected, user-level rejection; everything
    /// else indicates a bug in whoever sent the request.
    #[must_use]
    pub const fn is_protocol_violation(&self) -> bool {
        !matches!(self, Self::IllegalMove { .. })
    }
}
