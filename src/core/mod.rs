//! Core platform types: agent states, environment context, sessions, RNG.
//!
//! These are game-agnostic. Game interpreters under `games/` consume them
//! and supply the transition semantics.

pub mod agent;
pub mod env;
pub mod rng;
pub mod session;

pub use agent::{Agent, AgentState, AgentStatus, Mark, Observation};
pub use env::Environment;
pub use rng::MatchRng;
pub use session::{MatchSession, TerminalPhase};
