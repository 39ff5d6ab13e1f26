//! Insufficient-material detection.
//!
//! An approximate rule carried over from the platform's reference
//! referee: a side is sufficient with any queen, rook, or pawn, with
//! three or more combined minors, or with fewer than two knights. That
//! leaves exactly one definitively insufficient army: two knights and
//! nothing else beside the king. Bishop pairs are not distinguished by
//! square color, and a bare king counts as sufficient. Accepted
//! approximation; do not tighten without revisiting the test suite.

use crate::core::Mark;
use crate::rules::{PieceKind, RulesEngine};

/// Per-color piece tally. Kings are irrelevant to the rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MaterialCount {
    pawns: u8,
    knights: u8,
    bishops: u8,
    rooks: u8,
    queens: u8,
}

impl MaterialCount {
    fn add(&mut self, kind: PieceKind) {
        match kind {
            PieceKind::Pawn => self.pawns += 1,
            PieceKind::Knight => self.knights += 1,
            PieceKind::Bishop => self.bishops += 1,
            PieceKind::Rook => self.rooks += 1,
            PieceKind::Queen => self.queens += 1,
            PieceKind::King => {}
        }
    }

    /// Whether this side can still deliver mate under the approximate
    /// rule.
    fn is_sufficient(self) -> bool {
        if self.queens > 0 || self.rooks > 0 || self.pawns > 0 {
            return true;
        }
        if self.knights + self.bishops >= 3 {
            return true;
        }
        // Two knights cannot force mate; anything below that threshold is
        // treated as if it could.
        self.knights < 2
    }
}

/// True when neither side has mating material under the approximate rule.
pub fn is_insufficient_material<R: RulesEngine>(engine: &R) -> bool {
    let mut white = MaterialCount::default();
    let mut black = MaterialCount::default();

    for square in 0..64 {
        if let Some(piece) = engine.piece_at(square) {
            match piece.color {
                Mark::White => white.add(piece.kind),
                Mark::Black => black.add(piece.kind),
            }
        }
    }

    !white.is_sufficient() && !black.is_sufficient()
}
