//! Piece identity: role, color, and the glyph renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side a piece plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Black pieces.
    Black,
    /// White pieces.
    White,
}

impl Color {
    /// Rank holding this side's back row (rooks, knights, bishops, queen, king).
    #[must_use]
    pub const fn home_rank(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// Rank holding this side's pawns at the start of a game.
    #[must_use]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
        }
    }
}

/// Bare piece type, without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pawn => write!(f, "pawn"),
            Self::Knight => write!(f, "knight"),
            Self::Bishop => write!(f, "bishop"),
            Self::Rook => write!(f, "rook"),
            Self::Queen => write!(f, "queen"),
            Self::King => write!(f, "king"),
        }
    }
}

/// A role crossed with a color.
///
/// `Display` renders the Unicode chess glyph; use [`PieceKind::describe`]
/// for a spelled-out name in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceKind {
    /// What the piece is.
    pub role: Role,
    /// Which side it plays for.
    pub color: Color,
}

impl PieceKind {
    /// Create a piece kind.
    #[must_use]
    pub const fn new(role: Role, color: Color) -> Self {
        Self { role, color }
    }

    /// Unicode glyph for this piece.
    #[must_use]
    pub const fn glyph(self) -> char {
        match (self.color, self.role) {
            (Color::White, Role::Pawn) => '♙',
            (Color::White, Role::Knight) => '♘',
            (Color::White, Role::Bishop) => '♗',
            (Color::White, Role::Rook) => '♖',
            (Color::White, Role::Queen) => '♕',
            (Color::White, Role::King) => '♔',
            (Color::Black, Role::Pawn) => '♟',
            (Color::Black, Role::Knight) => '♞',
            (Color::Black, Role::Bishop) => '♝',
            (Color::Black, Role::Rook) => '♜',
            (Color::Black, Role::Queen) => '♛',
            (Color::Black, Role::King) => '♚',
        }
    }

    /// Spelled-out name, e.g. `white pawn`.
    #[must_use]
    pub fn describe(self) -> String {
        format!("{} {}", self.color, self.role)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
