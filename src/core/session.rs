//! Per-match session state: repetition accounting and two-phase termination.
//!
//! Everything here used to be process-global in ancestor platforms; owning
//! it in a session object means concurrent matches cannot leak repetition
//! counts or termination phases into one another. The session is reset by
//! the interpreter's episode-reset transition, never implicitly.

use rustc_hash::FxHashMap;

use super::agent::AgentStatus;

/// Where the match stands relative to its terminal conditions.
///
/// Termination is two-phase: the first terminal evaluation of an episode
/// resolves to a soft ACTIVE continuation (`Ending`), and the next one
/// resolves to a hard DONE (`Ended`). The soft step re-enters the setup
/// transition with colors swapped, so a full match plays one game as each
/// color before the hard DONE lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TerminalPhase {
    /// No terminal condition reached yet this episode.
    #[default]
    Running,
    /// A terminal condition has been reached once; the next one ends the
    /// match for good.
    Ending,
    /// The match is over.
    Ended,
}

/// Session state scoped to one match, reset at episode boundaries.
#[derive(Clone, Debug, Default)]
pub struct MatchSession {
    /// Occurrences of each board placement (first FEN field, move counters
    /// excluded) since the last reset.
    repetitions: FxHashMap<String, u32>,
    phase: TerminalPhase,
}

impl MatchSession {
    /// Create a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all session state for a new episode.
    pub fn reset(&mut self) {
        self.repetitions.clear();
        self.phase = TerminalPhase::Running;
    }

    /// Record one occurrence of a board placement and return its count so
    /// far this episode.
    pub fn record_placement(&mut self, placement: &str) -> u32 {
        let count = self.repetitions.entry(placement.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// How often a placement has occurred this episode.
    #[must_use]
    pub fn repetition_count(&self, placement: &str) -> u32 {
        self.repetitions.get(placement).copied().unwrap_or(0)
    }

    /// True when no placements have been recorded since the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repetitions.is_empty()
    }

    /// Current termination phase.
    #[must_use]
    pub fn phase(&self) -> TerminalPhase {
        self.phase
    }

    /// Register that a terminal condition was reached and return the
    /// status to assign to both agents: a soft ACTIVE the first time, a
    /// hard DONE from then on.
    pub fn on_terminal(&mut self) -> AgentStatus {
        match self.phase {
            TerminalPhase::Running => {
                self.phase = TerminalPhase::Ending;
                AgentStatus::Active
            }
            TerminalPhase::Ending | TerminalPhase::Ended => {
                self.phase = TerminalPhase::Ended;
                AgentStatus::Done
            }
        }
    }
}
