//! Actor-based board and pieces.
//!
//! # Architecture
//!
//! - **Message passing**: pieces and the board communicate only through
//!   their mailboxes; no memory is shared
//! - **Process isolation**: each actor owns its state exclusively
//! - **Handshakes**: every request waits on a reply port; the sender can
//!   always observe completion before it proceeds
//! - **No circular waits**: a piece contacts the board only while moving,
//!   the board contacts a piece only while deleting it
//!
//! # Example
//!
//! ```ignore
//! use gambit_board::actors::{spawn_board, spawn_piece};
//! use gambit_core::{Color, Location, PieceKind, Role};
//!
//! let (board, join) = spawn_board().await?;
//! let d2: Location = "D2".parse()?;
//! let pawn = spawn_piece(&board, PieceKind::new(Role::Pawn, Color::White), d2).await?;
//!
//! pawn.move_to("D4".parse()?).await?;
//! assert!(board.lookup(d2).await?.is_none());
//!
//! board.delete(pawn).await?;
//! board.close().await?;
//! join.await?;
//! ```

pub mod board;
pub mod errors;
pub mod messages;
pub mod piece;
mod rpc;
pub mod supervisor;

pub use board::{BoardActor, BoardHandle, BoardState};
pub use errors::ActorError;
pub use messages::{BoardMessage, PieceMessage};
pub use piece::{PieceActor, PieceArguments, PieceHandle, PieceState};
pub use supervisor::{spawn_board, spawn_piece, spawn_piece_with_validator, spawn_unplaced_piece};
