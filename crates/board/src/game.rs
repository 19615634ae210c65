//! Whole-board coordination built from the board and piece protocols.
//!
//! Anything here that needs every piece first drains LookupAll into a
//! vector and only then talks to the pieces or the board again. Issuing a
//! request while the stream is still open would wait on a board that is
//! itself waiting on the reader.

use std::collections::HashMap;

use gambit_core::{Location, MoveRequest, PieceKind};
use itertools::Itertools;
use tracing::info;

use crate::actors::{ActorError, BoardHandle, PieceHandle};

/// Move whatever stands on `request.from` to `request.to`.
///
/// # Errors
///
/// Returns [`ActorError::Vacant`] if no piece stands on the source square,
/// otherwise whatever the piece's Move handshake returns.
pub async fn play(board: &BoardHandle, request: MoveRequest) -> Result<PieceHandle, ActorError> {
    let piece = board
        .lookup(request.from)
        .await?
        .ok_or_else(|| ActorError::vacant(request.from))?;

    piece.move_to(request.to).await?;
    info!(request = %request, piece = %piece, "Played move");
    Ok(piece)
}

/// Delete every piece on the board. Returns how many were removed.
///
/// # Errors
///
/// Stops at the first failed delete.
pub async fn clear(board: &BoardHandle) -> Result<usize, ActorError> {
    let pieces = board.pieces().await?;
    let total = pieces.len();

    for piece in pieces {
        board.delete(piece).await?;
    }

    info!(total, "Board cleared");
    Ok(total)
}

/// Ask every piece where it is and what it is.
///
/// # Errors
///
/// Returns the first piece query that fails.
pub async fn snapshot(board: &BoardHandle) -> Result<HashMap<Location, PieceKind>, ActorError> {
    let pieces = board.pieces().await?;
    let mut squares = HashMap::with_capacity(pieces.len());

    for piece in &pieces {
        squares.insert(piece.location().await?, piece.kind().await?);
    }

    Ok(squares)
}

/// Text diagram of the current position, rank 8 at the top.
///
/// # Errors
///
/// See [`snapshot`].
pub async fn render(board: &BoardHandle) -> Result<String, ActorError> {
    Ok(diagram(&snapshot(board).await?))
}

/// Lay out `squares` as an 8x8 grid of glyphs, `.` for empty squares.
#[must_use]
pub fn diagram(squares: &HashMap<Location, PieceKind>) -> String {
    let rows = (0..Location::SIZE).rev().map(|rank| {
        let cells = (0..Location::SIZE)
            .map(|file| {
                Location::new(file, rank)
                    .ok()
                    .and_then(|location| squares.get(&location))
                    .map_or('.', |kind| kind.glyph())
            })
            .join(" ");
        format!("{} {}", u16::from(rank) + 1, cells)
    });

    rows.chain(std::iter::once("  A B C D E F G H".to_string()))
        .join("\n")
}
