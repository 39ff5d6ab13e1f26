//! Rules engine trait for board game implementations.
//!
//! The interpreter never encodes chess legality itself. It talks to a
//! `RulesEngine`:
//! - which moves are legal in a position
//! - how a move transforms the position
//! - whether the position is terminal (checkmate/stalemate)
//!
//! Move application is fallible by design: an illegal or malformed move is
//! a structured `RulesError` the interpreter pattern-matches, never a
//! panic.

use serde::{Deserialize, Serialize};

use crate::core::Mark;

/// Terminal status reported by a rules engine for the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// Game continues.
    Normal,
    /// Side to move is checkmated.
    Checkmate,
    /// Side to move has no legal move but is not in check.
    Stalemate,
}

/// Piece role, promotion-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece on the board: color plus role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Mark,
    pub kind: PieceKind,
}

/// Failures surfaced by a rules engine.
///
/// The interpreter absorbs all of these into agent statuses; they never
/// cross the interpreter boundary as errors.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// A syntactically valid move that is not legal in the position.
    #[error("illegal move '{mv}'")]
    IllegalMove { mv: String },

    /// Move text that does not parse as coordinate notation.
    #[error("malformed move '{0}'")]
    MalformedMove(String),

    /// A board encoding the engine cannot parse into a position.
    #[error("invalid position encoding '{0}'")]
    InvalidEncoding(String),
}

/// Rules engine contract.
///
/// Implementations own a single position and mutate it through
/// `apply_move`. The interpreter is generic over this trait so tests can
/// substitute engines.
///
/// ## Conventions
///
/// - Moves are UCI coordinate notation: lowercase file+rank pairs, four
///   characters, optional promotion suffix ("e2e4", "e7e8q").
/// - Encodings are full FEN: placement, side to move, castling rights,
///   en-passant target, halfmove clock, fullmove number, space-delimited.
/// - Squares index 0..63 with a1 = 0 and h8 = 63 (rank-major).
pub trait RulesEngine: Sized {
    /// The standard starting position.
    fn starting_position() -> Self;

    /// Construct an engine from a position encoding.
    fn from_encoding(encoding: &str) -> Result<Self, RulesError>;

    /// All legal moves in the current position.
    fn legal_moves(&self) -> Vec<String>;

    /// Apply a move, mutating the position.
    ///
    /// Fails with `MalformedMove` for unparseable text and `IllegalMove`
    /// for moves the position does not admit; the position is unchanged
    /// on failure.
    fn apply_move(&mut self, mv: &str) -> Result<(), RulesError>;

    /// The current position encoding.
    fn encoding(&self) -> String;

    /// Terminal status of the current position.
    fn status(&self) -> EngineStatus;

    /// The piece on a square (0..63), if any.
    fn piece_at(&self, square: u8) -> Option<Piece>;

    /// Half-moves since the last pawn move or capture.
    fn halfmove_clock(&self) -> u32;

    // === Convenience Methods ===

    /// Whether `mv` is legal in the current position.
    #[must_use]
    fn is_legal(&self, mv: &str) -> bool {
        self.legal_moves().iter().any(|legal| legal == mv)
    }
}
