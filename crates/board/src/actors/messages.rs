//! Messages for the piece and board actors.
//!
//! Design principles:
//! - Every piece and board request is a handshake: the sender awaits a reply
//!   port, so a send only completes once the receiver has taken the message
//! - LookupAll is the one exception; its stream closing is the completion
//! - Contract breaches are returned in RPC replies, NOT as actor crashes

use gambit_core::{Location, PieceKind};
use ractor::RpcReplyPort;
use tokio::sync::mpsc;

use super::errors::ActorError;
use super::piece::PieceHandle;

/// Messages for the PieceActor.
#[derive(Debug)]
pub enum PieceMessage {
    // ═══════════════════════════════════════════════════════════════════════
    // SETUP
    // ═══════════════════════════════════════════════════════════════════════
    /// Overwrite the stored location.
    SetLocation {
        /// New location.
        location: Location,
        /// Acknowledged once the location is stored.
        reply: RpcReplyPort<()>,
    },

    /// Overwrite the stored kind.
    SetKind {
        /// New kind.
        kind: PieceKind,
        /// Acknowledged once the kind is stored.
        reply: RpcReplyPort<()>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════
    /// Report the current location.
    GetLocation {
        /// Reply port for the response.
        reply: RpcReplyPort<Result<Location, ActorError>>,
    },

    /// Report the current kind.
    GetKind {
        /// Reply port for the response.
        reply: RpcReplyPort<Result<PieceKind, ActorError>>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // HANDSHAKES
    // ═══════════════════════════════════════════════════════════════════════
    /// Validate, relocate on the board, then store the new location.
    Move {
        /// Destination square.
        to: Location,
        /// Completes once the board has accepted the relocation.
        reply: RpcReplyPort<Result<(), ActorError>>,
    },

    /// Acknowledge and stop. No message is processed after this one.
    Terminate {
        /// Acknowledgment port.
        reply: RpcReplyPort<()>,
    },
}

/// Messages for the BoardActor.
#[derive(Debug)]
pub enum BoardMessage {
    /// Register a piece on an empty square.
    Place {
        /// Square to occupy.
        location: Location,
        /// Piece to register there.
        piece: PieceHandle,
        /// Reply port for the response.
        reply: RpcReplyPort<Result<(), ActorError>>,
    },

    /// Repoint the entry at `from` to `to`. Sent by a moving piece.
    Relocate {
        /// Square the piece is leaving.
        from: Location,
        /// Square the piece is entering.
        to: Location,
        /// Reply port for the response.
        reply: RpcReplyPort<Result<(), ActorError>>,
    },

    /// Look up the piece on a square.
    Lookup {
        /// Square to inspect.
        location: Location,
        /// `None` when the square is empty.
        reply: RpcReplyPort<Option<PieceHandle>>,
    },

    /// Stream every registered piece into `sink`, then drop it.
    ///
    /// The board's loop is busy until the stream has been drained, so the
    /// receiver must read to the end before sending any other board request.
    LookupAll {
        /// Bounded stream of handles; closed when complete.
        sink: mpsc::Sender<PieceHandle>,
    },

    /// Two-phase delete: ask the piece where it is, terminate it, drop its entry.
    Delete {
        /// Piece to remove.
        piece: PieceHandle,
        /// The square that was vacated.
        reply: RpcReplyPort<Result<Location, ActorError>>,
    },

    /// Stop the board after acknowledging.
    Close {
        /// Number of pieces still registered at close time.
        reply: RpcReplyPort<usize>,
    },
}
