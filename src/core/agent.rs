//! Per-agent match state: status, observation, action, reward.
//!
//! ## AgentState
//!
//! The unit the interpreter transitions. A match holds exactly two, and
//! the interpreter consumes and returns them as a pair:
//! - `status`: where this agent is in the turn cycle
//! - `observation`: what the agent sees (shared board + color assignment)
//! - `action`: the move submitted this step, if any
//! - `reward`: cumulative score across the games of a match
//!
//! ## Status protocol
//!
//! Both agents ACTIVE is the sentinel for "set up a new game". Mid-game,
//! exactly one agent is ACTIVE and the other INACTIVE. Terminal statuses
//! are DONE and ERROR; once both agents are terminal the driver stops
//! stepping the match.

use serde::{Deserialize, Serialize};

/// Lifecycle status of one agent within a match.
///
/// Serialized in the platform's wire casing (`"ACTIVE"`, `"DONE"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentStatus {
    /// It is this agent's turn to act (or, with both agents ACTIVE, a new
    /// game is about to be set up).
    Active,
    /// Waiting for the opponent to act.
    Inactive,
    /// Finished cleanly.
    Done,
    /// Disqualified by an illegal or malformed submission.
    Error,
}

impl AgentStatus {
    /// Terminal statuses end the agent's participation in the match.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, AgentStatus::Done | AgentStatus::Error)
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentStatus::Active => "ACTIVE",
            AgentStatus::Inactive => "INACTIVE",
            AgentStatus::Done => "DONE",
            AgentStatus::Error => "ERROR",
        };
        write!(f, "{name}")
    }
}

/// Color-side assignment for one game.
///
/// Marks alternate between episodes so each agent plays both colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    White,
    Black,
}

impl Mark {
    /// The opposing color.
    #[must_use]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::White => Mark::Black,
            Mark::Black => Mark::White,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::White => write!(f, "white"),
            Mark::Black => write!(f, "black"),
        }
    }
}

/// What one agent observes each step.
///
/// `board` is the shared position encoding (FEN). Each agent state carries
/// its own copy; the interpreter keeps the two copies identical after
/// every step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Full position encoding: placement, side to move, castling rights,
    /// en-passant target, halfmove clock, fullmove number.
    pub board: String,

    /// This agent's color assignment for the current game.
    pub mark: Mark,
}

/// Complete per-agent state, transitioned by the interpreter once per step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Turn-cycle status.
    pub status: AgentStatus,

    /// What the agent sees.
    pub observation: Observation,

    /// Move submitted this step (UCI coordinate notation, e.g. "e2e4").
    /// `None` counts as an illegal submission when this agent is ACTIVE.
    pub action: Option<String>,

    /// Cumulative score: +1 per game won, -1 on disqualification.
    pub reward: i64,
}

impl AgentState {
    /// Create an agent state with the given color and no board yet.
    ///
    /// Starts ACTIVE so that a fresh pair triggers the interpreter's setup
    /// transition on the first step.
    #[must_use]
    pub fn new(mark: Mark) -> Self {
        Self {
            status: AgentStatus::Active,
            observation: Observation {
                board: String::new(),
                mark,
            },
            action: None,
            reward: 0,
        }
    }

    /// The starting pair for a match: both ACTIVE (the setup sentinel),
    /// first agent white, second black. Setup swaps the marks before the
    /// first game, so the second agent opens the match as White.
    #[must_use]
    pub fn initial_pair() -> [AgentState; 2] {
        [AgentState::new(Mark::White), AgentState::new(Mark::Black)]
    }
}

/// A move-selection policy driven by the match runner.
///
/// Implementations read the observation (board + mark) and return a move
/// in UCI coordinate notation, or `None` when they cannot produce one.
pub trait Agent {
    /// Choose a move for the observed position.
    fn act(&mut self, observation: &Observation) -> Option<String>;
}
