//! # rust-arena
//!
//! A turn-based match engine for multi-agent board game competitions.
//!
//! ## Design Principles
//!
//! 1. **Interpreter as a transition function**: one `step` call per
//!    simulation step, consuming and returning the per-agent state pair.
//!    Errors are absorbed into statuses and rewards, never raised past
//!    the interpreter boundary.
//!
//! 2. **Rules behind a trait**: the interpreter delegates all legality,
//!    move application, and terminal detection to a `RulesEngine`. The
//!    standard implementation wraps `shakmaty`; tests can substitute
//!    their own.
//!
//! 3. **Session state is owned, not global**: repetition counts and the
//!    two-phase termination tracker live in a per-interpreter
//!    `MatchSession` with an explicit reset at episode boundaries, so
//!    concurrent matches never share state.
//!
//! ## Modules
//!
//! - `core`: agent states, observations, environment context, sessions,
//!   deterministic RNG
//! - `rules`: the `RulesEngine` contract and the standard chess engine
//! - `games`: match interpreters (chess: state machine, draw rules,
//!   scripted demo agents)
//! - `runner`: a minimal match driver for demos and tests

pub mod core;
pub mod games;
pub mod rules;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{
    Agent, AgentState, AgentStatus, Environment, Mark, MatchRng, MatchSession, Observation,
    TerminalPhase,
};

pub use crate::rules::{EngineStatus, Piece, PieceKind, RulesEngine, RulesError, StandardRules};

pub use crate::games::chess::{
    BoardShuffleAgent, ChessInterpreter, KingShuffleAgent, RandomAgent,
    FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT,
};

pub use crate::runner::MatchRunner;
