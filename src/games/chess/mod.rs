//! Chess match refereeing: interpreter, draw rules, demo agents.
//!
//! The interpreter owns no chess knowledge beyond draw accounting; full
//! legality lives behind the `RulesEngine` seam.

pub mod agents;
pub mod interpreter;
pub mod material;

pub use agents::{BoardShuffleAgent, KingShuffleAgent, RandomAgent};
pub use interpreter::{ChessInterpreter, FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT};
pub use material::is_insufficient_material;
