//! Standard chess rules backed by the `shakmaty` library.
//!
//! `shakmaty` supplies full legality (castling, en passant, promotions),
//! FEN parsing/emission, and checkmate/stalemate detection. This adapter
//! maps its position type onto the `RulesEngine` contract and its errors
//! onto `RulesError`.

use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position, Role, Square};

use super::engine::{EngineStatus, Piece, PieceKind, RulesEngine, RulesError};
use crate::core::Mark;

/// Chess rules engine holding one `shakmaty` position.
#[derive(Clone, Debug)]
pub struct StandardRules {
    position: Chess,
}

impl RulesEngine for StandardRules {
    fn starting_position() -> Self {
        Self {
            position: Chess::default(),
        }
    }

    fn from_encoding(encoding: &str) -> Result<Self, RulesError> {
        let fen = encoding
            .parse::<Fen>()
            .map_err(|_| RulesError::InvalidEncoding(encoding.to_string()))?;
        let position = fen
            .into_position(CastlingMode::Standard)
            .map_err(|_| RulesError::InvalidEncoding(encoding.to_string()))?;
        Ok(Self { position })
    }

    fn legal_moves(&self) -> Vec<String> {
        self.position
            .legal_moves()
            .iter()
            .map(|mv| mv.to_uci(CastlingMode::Standard).to_string())
            .collect()
    }

    fn apply_move(&mut self, mv: &str) -> Result<(), RulesError> {
        let uci = mv
            .parse::<Uci>()
            .map_err(|_| RulesError::MalformedMove(mv.to_string()))?;
        let chosen = uci
            .to_move(&self.position)
            .map_err(|_| RulesError::IllegalMove { mv: mv.to_string() })?;
        self.position = self
            .position
            .clone()
            .play(&chosen)
            .map_err(|_| RulesError::IllegalMove { mv: mv.to_string() })?;
        Ok(())
    }

    fn encoding(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    fn status(&self) -> EngineStatus {
        if self.position.is_checkmate() {
            EngineStatus::Checkmate
        } else if self.position.is_stalemate() {
            EngineStatus::Stalemate
        } else {
            EngineStatus::Normal
        }
    }

    fn piece_at(&self, square: u8) -> Option<Piece> {
        if square >= 64 {
            return None;
        }
        let piece = self.position.board().piece_at(Square::new(u32::from(square)))?;
        Some(Piece {
            color: match piece.color {
                Color::White => Mark::White,
                Color::Black => Mark::Black,
            },
            kind: match piece.role {
                Role::Pawn => PieceKind::Pawn,
                Role::Knight => PieceKind::Knight,
                Role::Bishop => PieceKind::Bishop,
                Role::Rook => PieceKind::Rook,
                Role::Queen => PieceKind::Queen,
                Role::King => PieceKind::King,
            },
        })
    }

    fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }
}
