//! Rules engine seam: the legality contract and its standard chess
//! implementation.

pub mod engine;
pub mod standard;

pub use engine::{EngineStatus, Piece, PieceKind, RulesEngine, RulesError};
pub use standard::StandardRules;
