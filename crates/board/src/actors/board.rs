//! BoardActor - the single owner of the occupancy map.
//!
//! Every structural change to the location → piece mapping goes through this
//! actor's mailbox, so all placements, relocations and deletions are totally
//! ordered. The board never queries a piece while handling Place or Relocate;
//! it only initiates contact with a piece during Delete.

use gambit_core::Location;
use im::HashMap;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::errors::ActorError;
use super::messages::BoardMessage;
use super::piece::PieceHandle;
use super::rpc;

/// Capacity of the LookupAll stream. One slot keeps the hand-off close to a
/// rendezvous: the board cannot run ahead of the reader.
const LOOKUP_ALL_BUFFER: usize = 1;

/// The board actor definition.
#[derive(Clone, Copy, Default)]
pub struct BoardActor;

/// Actor state: the authoritative occupancy map.
#[derive(Default)]
pub struct BoardState {
    occupancy: HashMap<Location, PieceHandle>,
}

impl Actor for BoardActor {
    type Msg = BoardMessage;
    type State = BoardState;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("BoardActor starting");
        Ok(BoardState::default())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            BoardMessage::Place {
                location,
                piece,
                reply,
            } => {
                let result = Self::handle_place(state, location, piece);
                let _ = reply.send(result);
            }

            BoardMessage::Relocate { from, to, reply } => {
                let result = Self::handle_relocate(state, from, to);
                let _ = reply.send(result);
            }

            BoardMessage::Lookup { location, reply } => {
                let piece = state.occupancy.get(&location).cloned();
                debug!(location = %location, found = piece.is_some(), "Lookup");
                let _ = reply.send(piece);
            }

            BoardMessage::LookupAll { sink } => {
                Self::handle_lookup_all(state, sink).await;
            }

            BoardMessage::Delete { piece, reply } => {
                let result = Self::handle_delete(state, &piece).await;
                if let Err(e) = &result {
                    warn!(piece = %piece, error = %e, "Delete rejected");
                }
                let _ = reply.send(result);
            }

            BoardMessage::Close { reply } => {
                let remaining = state.occupancy.len();
                if remaining > 0 {
                    warn!(remaining, "Board closing with pieces still running");
                } else {
                    info!("Board closing");
                }
                myself.stop(Some("closed".to_string()));
                let _ = reply.send(remaining);
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        _state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        info!("BoardActor stopped");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Implementation
// ═══════════════════════════════════════════════════════════════════════════

impl BoardActor {
    fn handle_place(
        state: &mut BoardState,
        location: Location,
        piece: PieceHandle,
    ) -> Result<(), ActorError> {
        if state.occupancy.contains_key(&location) {
            warn!(location = %location, "Place rejected: square occupied");
            return Err(ActorError::occupied(location));
        }

        info!(location = %location, piece = %piece, "New piece");
        state.occupancy.insert(location, piece);
        Ok(())
    }

    fn handle_relocate(
        state: &mut BoardState,
        from: Location,
        to: Location,
    ) -> Result<(), ActorError> {
        let Some(piece) = state.occupancy.get(&from).cloned() else {
            warn!(from = %from, to = %to, "Relocate rejected: source empty");
            return Err(ActorError::vacant(from));
        };

        if from == to {
            return Ok(());
        }

        if state.occupancy.contains_key(&to) {
            warn!(from = %from, to = %to, "Relocate rejected: destination occupied");
            return Err(ActorError::occupied(to));
        }

        state.occupancy.remove(&from);
        info!(piece = %piece, from = %from, to = %to, "Move");
        state.occupancy.insert(to, piece);
        Ok(())
    }

    async fn handle_lookup_all(state: &BoardState, sink: mpsc::Sender<PieceHandle>) {
        let pieces: Vec<PieceHandle> = state.occupancy.values().cloned().collect();
        let total = pieces.len();

        for piece in pieces {
            if sink.send(piece).await.is_err() {
                debug!("LookupAll reader went away before draining");
                return;
            }
        }

        debug!(total, "LookupAll streamed");
        // Dropping the sink closes the stream.
    }

    /// Ask the piece where it is, check the entry, terminate, then remove.
    async fn handle_delete(
        state: &mut BoardState,
        piece: &PieceHandle,
    ) -> Result<Location, ActorError> {
        let location = piece
            .location()
            .await
            .map_err(|_| ActorError::not_registered(piece.to_string()))?;

        if state.occupancy.get(&location) != Some(piece) {
            return Err(ActorError::not_registered(piece.to_string()));
        }

        piece.terminate().await?;
        state.occupancy.remove(&location);

        info!(location = %location, "Deleted piece");
        Ok(location)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Handle
// ═══════════════════════════════════════════════════════════════════════════

/// Capability to message the board actor.
#[derive(Clone, Debug)]
pub struct BoardHandle {
    actor: ActorRef<BoardMessage>,
}

impl BoardHandle {
    const NAME: &'static str = "board";

    /// Wrap a spawned board actor.
    pub const fn new(actor: ActorRef<BoardMessage>) -> Self {
        Self { actor }
    }

    /// The underlying actor reference.
    pub const fn actor(&self) -> &ActorRef<BoardMessage> {
        &self.actor
    }

    /// Register `piece` on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Occupied`] if the square is taken; the existing
    /// occupant is left in place.
    pub async fn place(&self, location: Location, piece: PieceHandle) -> Result<(), ActorError> {
        rpc::request(&self.actor, Self::NAME, |reply| BoardMessage::Place {
            location,
            piece,
            reply,
        })
        .await?
    }

    /// Repoint the entry at `from` to `to`.
    ///
    /// This is the board half of a piece's Move handshake; callers that want
    /// to move a piece should use [`PieceHandle::move_to`] so the piece's own
    /// location stays in step.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Vacant`] if `from` is empty, or
    /// [`ActorError::Occupied`] if another piece stands on `to`.
    pub async fn relocate(&self, from: Location, to: Location) -> Result<(), ActorError> {
        rpc::request(&self.actor, Self::NAME, |reply| BoardMessage::Relocate {
            from,
            to,
            reply,
        })
        .await?
    }

    /// The piece on `location`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the board has stopped.
    pub async fn lookup(&self, location: Location) -> Result<Option<PieceHandle>, ActorError> {
        rpc::request(&self.actor, Self::NAME, |reply| BoardMessage::Lookup {
            location,
            reply,
        })
        .await
    }

    /// Start streaming every registered piece.
    ///
    /// The board is blocked until the returned receiver has been drained (or
    /// dropped); read it to the end before sending the board anything else.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the board has stopped.
    pub fn lookup_all(&self) -> Result<mpsc::Receiver<PieceHandle>, ActorError> {
        let (sink, stream) = mpsc::channel(LOOKUP_ALL_BUFFER);
        rpc::command(&self.actor, Self::NAME, BoardMessage::LookupAll { sink })?;
        Ok(stream)
    }

    /// Drain [`lookup_all`](Self::lookup_all) into a vector.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the board has stopped.
    pub async fn pieces(&self) -> Result<Vec<PieceHandle>, ActorError> {
        let mut stream = self.lookup_all()?;
        let mut pieces = Vec::new();
        while let Some(piece) = stream.recv().await {
            pieces.push(piece);
        }
        Ok(pieces)
    }

    /// Terminate `piece` and remove it from the board. Returns the vacated square.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::NotRegistered`] if the board does not hold this
    /// piece where the piece says it stands.
    pub async fn delete(&self, piece: PieceHandle) -> Result<Location, ActorError> {
        rpc::request(&self.actor, Self::NAME, |reply| BoardMessage::Delete {
            piece,
            reply,
        })
        .await?
    }

    /// Stop the board. Returns how many pieces were still registered.
    ///
    /// Pieces still on the board are not terminated; clear the board first
    /// if they should go too.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the board already stopped.
    pub async fn close(&self) -> Result<usize, ActorError> {
        rpc::request(&self.actor, Self::NAME, |reply| BoardMessage::Close { reply }).await
    }
}
