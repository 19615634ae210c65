//! PieceActor - one actor per piece, owning its location and kind.
//!
//! The only way to read or change a piece is through its mailbox. Moving is
//! a handshake with the board: the piece validates the move, asks the board
//! to repoint its occupancy entry, and only stores the new location once the
//! board has accepted.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use gambit_core::{Location, PieceKind};
use ractor::{Actor, ActorId, ActorProcessingErr, ActorRef};
use tracing::{debug, warn};

use crate::legality::{MoveValidator, Permissive, PieceSnapshot};

use super::board::BoardHandle;
use super::errors::ActorError;
use super::messages::PieceMessage;
use super::rpc;

/// The piece actor definition.
#[derive(Clone, Copy, Default)]
pub struct PieceActor;

/// Arguments passed to the actor on startup.
#[derive(Clone)]
pub struct PieceArguments {
    /// Board to notify when the piece moves.
    pub board: BoardHandle,
    /// Legality hook consulted before every move.
    pub validator: Arc<dyn MoveValidator>,
}

impl PieceArguments {
    /// Arguments with the permissive legality hook.
    pub fn new(board: BoardHandle) -> Self {
        Self {
            board,
            validator: Arc::new(Permissive),
        }
    }

    /// Replace the legality hook.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn MoveValidator>) -> Self {
        self.validator = validator;
        self
    }
}

/// Private state of one piece. Unset until configured.
pub struct PieceState {
    board: BoardHandle,
    validator: Arc<dyn MoveValidator>,
    location: Option<Location>,
    kind: Option<PieceKind>,
}

impl PieceState {
    fn new(args: PieceArguments) -> Self {
        Self {
            board: args.board,
            validator: args.validator,
            location: None,
            kind: None,
        }
    }

    fn location(&self) -> Result<Location, ActorError> {
        self.location
            .ok_or_else(|| ActorError::unconfigured("location was never set"))
    }

    fn kind(&self) -> Result<PieceKind, ActorError> {
        self.kind
            .ok_or_else(|| ActorError::unconfigured("kind was never set"))
    }

    fn snapshot(&self) -> Result<PieceSnapshot, ActorError> {
        Ok(PieceSnapshot {
            location: self.location()?,
            kind: self.kind()?,
        })
    }
}

impl Actor for PieceActor {
    type Msg = PieceMessage;
    type State = PieceState;
    type Arguments = PieceArguments;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        debug!(piece = %myself.get_id(), "PieceActor starting");
        Ok(PieceState::new(args))
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            PieceMessage::SetLocation { location, reply } => {
                state.location = Some(location);
                let _ = reply.send(());
            }

            PieceMessage::SetKind { kind, reply } => {
                state.kind = Some(kind);
                let _ = reply.send(());
            }

            PieceMessage::GetLocation { reply } => {
                // Ignore send error - caller may have gone away
                let _ = reply.send(state.location());
            }

            PieceMessage::GetKind { reply } => {
                let _ = reply.send(state.kind());
            }

            PieceMessage::Move { to, reply } => {
                let result = Self::handle_move(state, to).await;
                if let Err(e) = &result {
                    warn!(piece = %myself.get_id(), error = %e, "Move rejected");
                }
                let _ = reply.send(result);
            }

            PieceMessage::Terminate { reply } => {
                debug!(piece = %myself.get_id(), "Terminate requested");
                // Stop is signalled before the ack so nothing queued behind
                // this message is ever processed.
                myself.stop(Some("terminated".to_string()));
                let _ = reply.send(());
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        myself: ActorRef<Self::Msg>,
        _state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        debug!(piece = %myself.get_id(), "PieceActor stopped");
        Ok(())
    }
}

impl PieceActor {
    /// Legality check, board handshake, then local update - in that order.
    async fn handle_move(state: &mut PieceState, to: Location) -> Result<(), ActorError> {
        let snapshot = state.snapshot()?;

        state
            .validator
            .validate(&snapshot, to)
            .map_err(|reason| ActorError::illegal_move(snapshot.location, to, reason))?;

        state.board.relocate(snapshot.location, to).await?;
        state.location = Some(to);

        debug!(
            kind = %snapshot.kind.describe(),
            from = %snapshot.location,
            to = %to,
            "Piece moved"
        );
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Handle
// ═══════════════════════════════════════════════════════════════════════════

/// Capability to message one piece actor.
///
/// Holding a handle lets you talk to the piece, never inspect it directly.
/// Equality and hashing follow actor identity.
#[derive(Clone)]
pub struct PieceHandle {
    actor: ActorRef<PieceMessage>,
}

impl PieceHandle {
    /// Wrap a spawned piece actor.
    pub const fn new(actor: ActorRef<PieceMessage>) -> Self {
        Self { actor }
    }

    /// Identity of the underlying actor.
    pub fn id(&self) -> ActorId {
        self.actor.get_id()
    }

    /// The underlying actor reference.
    pub const fn actor(&self) -> &ActorRef<PieceMessage> {
        &self.actor
    }

    /// Overwrite the piece's location, waiting until the piece has stored it.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the piece has stopped.
    pub async fn set_location(&self, location: Location) -> Result<(), ActorError> {
        rpc::request(&self.actor, &self.to_string(), |reply| {
            PieceMessage::SetLocation { location, reply }
        })
        .await
    }

    /// Overwrite the piece's kind, waiting until the piece has stored it.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the piece has stopped.
    pub async fn set_kind(&self, kind: PieceKind) -> Result<(), ActorError> {
        rpc::request(&self.actor, &self.to_string(), |reply| {
            PieceMessage::SetKind { kind, reply }
        })
        .await
    }

    /// Ask the piece where it stands.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unconfigured`] before SetLocation, or
    /// [`ActorError::Unavailable`] once the piece has terminated.
    pub async fn location(&self) -> Result<Location, ActorError> {
        rpc::request(&self.actor, &self.to_string(), |reply| {
            PieceMessage::GetLocation { reply }
        })
        .await?
    }

    /// Ask the piece what it is.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unconfigured`] before SetKind, or
    /// [`ActorError::Unavailable`] once the piece has terminated.
    pub async fn kind(&self) -> Result<PieceKind, ActorError> {
        rpc::request(&self.actor, &self.to_string(), |reply| PieceMessage::GetKind {
            reply,
        })
        .await?
    }

    /// Move the piece, waiting until both the board and the piece agree.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::IllegalMove`] if the legality hook refuses, or
    /// the board's rejection if the relocation itself is refused. Neither
    /// the board nor the piece changes in either case.
    pub async fn move_to(&self, to: Location) -> Result<(), ActorError> {
        rpc::request(&self.actor, &self.to_string(), |reply| PieceMessage::Move {
            to,
            reply,
        })
        .await?
    }

    /// Terminate the piece and wait for its acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Unavailable`] if the piece already stopped.
    pub async fn terminate(&self) -> Result<(), ActorError> {
        rpc::request(&self.actor, &self.to_string(), |reply| {
            PieceMessage::Terminate { reply }
        })
        .await
    }
}

impl PartialEq for PieceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PieceHandle {}

impl Hash for PieceHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for PieceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PieceHandle").field(&self.id()).finish()
    }
}

impl fmt::Display for PieceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece {}", self.id())
    }
}
