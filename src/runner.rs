//! Match runner: a convenience driver for demos and integration tests.
//!
//! The production platform has its own driver; this one reproduces the
//! minimal loop: signal an episode boundary, then repeatedly collect the
//! active agent's move and step the interpreter until both agents are
//! terminal. Because terminal conditions resolve softly the first time, a
//! full run spans two games with colors swapped in between.

use log::debug;

use crate::core::{Agent, AgentState, AgentStatus, Environment};
use crate::games::chess::ChessInterpreter;
use crate::rules::RulesEngine;

/// Drives two agents through a complete match.
pub struct MatchRunner<R> {
    interpreter: ChessInterpreter<R>,
    env: Environment,
}

impl<R: RulesEngine> MatchRunner<R> {
    /// Create a runner with a default environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interpreter: ChessInterpreter::new(),
            env: Environment::new(),
        }
    }

    /// Attach a driver configuration passed through to the environment.
    #[must_use]
    pub fn with_configuration(mut self, configuration: serde_json::Value) -> Self {
        self.env = self.env.clone().with_configuration(configuration);
        self
    }

    /// The interpreter being driven.
    #[must_use]
    pub fn interpreter(&self) -> &ChessInterpreter<R> {
        &self.interpreter
    }

    /// Run a match to completion (or until `max_steps` interpreter calls).
    ///
    /// Returns the final agent pair; check `status` and `reward` on each
    /// for the outcome.
    pub fn run<'a>(
        &mut self,
        first: &'a mut dyn Agent,
        second: &'a mut dyn Agent,
        max_steps: usize,
    ) -> [AgentState; 2] {
        // Episode boundary: give the interpreter its reset before setup.
        let mut state = self
            .interpreter
            .step(AgentState::initial_pair(), &Environment::completed());

        let mut agents = [first, second];

        for step in 0..max_steps {
            if state.iter().all(|agent| agent.status.is_terminal()) {
                debug!("match finished after {step} steps");
                break;
            }

            for agent in &mut state {
                agent.action = None;
            }
            // With exactly one agent ACTIVE it is mid-game and a move is
            // wanted; both ACTIVE is the setup step and needs none.
            let active: Vec<usize> = (0..2)
                .filter(|&i| state[i].status == AgentStatus::Active)
                .collect();
            if let &[index] = active.as_slice() {
                state[index].action = agents[index].act(&state[index].observation);
            }

            state = self.interpreter.step(state, &self.env);
        }

        state
    }
}

impl<R: RulesEngine> Default for MatchRunner<R> {
    fn default() -> Self {
        Self::new()
    }
}
