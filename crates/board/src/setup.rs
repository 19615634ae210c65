//! Standard starting arrangement.

use gambit_core::{Color, Location, PieceKind, Role};
use tracing::info;

use crate::actors::{ActorError, BoardHandle, PieceHandle, spawn_piece};

const BACK_ROW: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// The sixteen starting placements for one side: pawns first, then the back row.
#[must_use]
pub fn standard_layout(color: Color) -> Vec<(PieceKind, Location)> {
    let pawns = (0..Location::SIZE).map(|file| (Role::Pawn, file, color.pawn_rank()));
    let back_row = (0..Location::SIZE)
        .zip(BACK_ROW)
        .map(|(file, role)| (role, file, color.home_rank()));

    pawns
        .chain(back_row)
        .filter_map(|(role, file, rank)| {
            Location::new(file, rank)
                .ok()
                .map(|location| (PieceKind::new(role, color), location))
        })
        .collect()
}

/// Spawn and place one side's pieces.
///
/// # Errors
///
/// Stops at the first rejected placement; pieces placed before it stay on
/// the board.
pub async fn populate(board: &BoardHandle, color: Color) -> Result<Vec<PieceHandle>, ActorError> {
    let mut pieces = Vec::with_capacity(16);
    for (kind, location) in standard_layout(color) {
        pieces.push(spawn_piece(board, kind, location).await?);
    }
    info!(side = %color, count = pieces.len(), "Side set up");
    Ok(pieces)
}

/// Populate every requested side in order.
///
/// # Errors
///
/// See [`populate`].
pub async fn setup(board: &BoardHandle, sides: &[Color]) -> Result<Vec<PieceHandle>, ActorError> {
    let mut pieces = Vec::new();
    for &color in sides {
        pieces.extend(populate(board, color).await?);
    }
    Ok(pieces)
}
