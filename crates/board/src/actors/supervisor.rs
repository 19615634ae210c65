//! Spawn helpers for board and piece actors.
//!
//! Spawning a piece is orchestration, not a third actor: start the piece,
//! configure it, then register it with the board. Both setup handshakes have
//! completed before Place is sent, so any request that reaches the piece
//! through the board sees a configured piece.

use std::sync::Arc;

use gambit_core::{Location, PieceKind};
use ractor::Actor;
use ractor::concurrency::JoinHandle;
use tracing::{info, warn};

use crate::legality::{MoveValidator, Permissive};

use super::board::{BoardActor, BoardHandle};
use super::errors::ActorError;
use super::piece::{PieceActor, PieceArguments, PieceHandle};

/// Spawn an empty board actor.
///
/// The join handle resolves once the board has stopped (see
/// [`BoardHandle::close`]).
///
/// # Errors
///
/// Returns [`ActorError::SpawnFailed`] if the actor fails to start.
pub async fn spawn_board() -> Result<(BoardHandle, JoinHandle<()>), ActorError> {
    let (actor_ref, handle) = Actor::spawn(None, BoardActor, ())
        .await
        .map_err(|e| ActorError::spawn_failed(format!("Failed to spawn board: {e}")))?;
    Ok((BoardHandle::new(actor_ref), handle))
}

/// Spawn a piece, configure it, and place it on `board`.
///
/// # Errors
///
/// Returns [`ActorError::Occupied`] if `location` is taken (the new piece is
/// terminated again, the occupant is untouched), or
/// [`ActorError::SpawnFailed`] if the actor fails to start.
pub async fn spawn_piece(
    board: &BoardHandle,
    kind: PieceKind,
    location: Location,
) -> Result<PieceHandle, ActorError> {
    spawn_piece_with_validator(board, kind, location, Arc::new(Permissive)).await
}

/// Like [`spawn_piece`], with a custom legality hook.
///
/// # Errors
///
/// See [`spawn_piece`].
pub async fn spawn_piece_with_validator(
    board: &BoardHandle,
    kind: PieceKind,
    location: Location,
    validator: Arc<dyn MoveValidator>,
) -> Result<PieceHandle, ActorError> {
    let piece = spawn_unplaced_piece(board, validator).await?;
    if let Err(e) = configure(&piece, kind, location).await {
        let _ = piece.terminate().await;
        return Err(e);
    }

    if let Err(e) = board.place(location, piece.clone()).await {
        warn!(kind = %kind.describe(), location = %location, error = %e, "Placement rejected");
        // The piece never became reachable through the board; don't leak it.
        let _ = piece.terminate().await;
        return Err(e);
    }

    info!(kind = %kind.describe(), glyph = %kind, location = %location, "Spawned piece");
    Ok(piece)
}

async fn configure(
    piece: &PieceHandle,
    kind: PieceKind,
    location: Location,
) -> Result<(), ActorError> {
    piece.set_kind(kind).await?;
    piece.set_location(location).await
}

/// Spawn an unconfigured piece that knows `board` but is not registered on it.
///
/// # Errors
///
/// Returns [`ActorError::SpawnFailed`] if the actor fails to start.
pub async fn spawn_unplaced_piece(
    board: &BoardHandle,
    validator: Arc<dyn MoveValidator>,
) -> Result<PieceHandle, ActorError> {
    let args = PieceArguments::new(board.clone()).with_validator(validator);
    let (actor_ref, _handle) = Actor::spawn(None, PieceActor, args)
        .await
        .map_err(|e| ActorError::spawn_failed(format!("Failed to spawn piece: {e}")))?;
    Ok(PieceHandle::new(actor_ref))
}
