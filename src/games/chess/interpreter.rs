//! Chess match interpreter: the turn-based match state machine.
//!
//! One `step` call per simulation step, driven from outside. Transitions:
//!
//! 1. **Episode reset** (`env.done`): clear session state, return the pair
//!    unchanged; the driver re-invokes for setup.
//! 2. **Setup** (both agents ACTIVE): swap color assignments, deal a fresh
//!    starting position, hand White the move.
//! 3. **Malformed-state guard**: unexpected statuses terminate the match
//!    defensively.
//! 4. **Move application**: the active agent's submission goes to the
//!    rules engine; an illegal or malformed move disqualifies the
//!    submitter (ERROR, reward -1) and ends the opponent (DONE).
//! 5. **Terminal evaluation**, in priority order: fifty-move rule or
//!    insufficient material, then threefold repetition or stalemate, then
//!    checkmate (active agent scores +1). Otherwise activity swaps.
//!
//! Terminal branches assign the session's two-phase terminal status: the
//! first terminal evaluation of an episode yields a soft ACTIVE (which
//! re-enters setup with colors swapped for the return game), the next a
//! hard DONE.

use std::marker::PhantomData;

use log::{debug, trace};

use crate::core::{AgentState, AgentStatus, Environment, MatchSession, Mark, TerminalPhase};
use crate::rules::{EngineStatus, RulesEngine, RulesError};

use super::material::is_insufficient_material;

/// Halfmove-clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u32 = 100;

/// Placement occurrences at which threefold repetition ends the game.
pub const REPETITION_DRAW_COUNT: u32 = 3;

/// Match interpreter for chess, generic over the rules engine.
///
/// Owns the per-match session state; construct one interpreter per match
/// and it can be reused across episodes via the reset transition.
#[derive(Clone, Debug)]
pub struct ChessInterpreter<R> {
    session: MatchSession,
    _rules: PhantomData<R>,
}

impl<R: RulesEngine> Default for ChessInterpreter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RulesEngine> ChessInterpreter<R> {
    /// Create an interpreter with a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: MatchSession::new(),
            _rules: PhantomData,
        }
    }

    /// Read-only view of the session (repetition table, terminal phase).
    #[must_use]
    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    /// Advance the match by one step.
    ///
    /// Consumes and returns the agent pair; all errors are absorbed into
    /// statuses and rewards, never returned.
    pub fn step(&mut self, state: [AgentState; 2], env: &Environment) -> [AgentState; 2] {
        let [mut first, mut second] = state;

        if env.done {
            debug!("episode finished, resetting match session");
            self.session.reset();
            return [first, second];
        }

        // Both agents ACTIVE is the sentinel for a fresh game.
        if first.status == AgentStatus::Active && second.status == AgentStatus::Active {
            Self::set_up_game(&mut first, &mut second);
            return [first, second];
        }

        let (active, inactive) = if first.status == AgentStatus::Active {
            (&mut first, &mut second)
        } else {
            (&mut second, &mut first)
        };

        if active.status != AgentStatus::Active || inactive.status != AgentStatus::Inactive {
            debug!(
                "malformed match state ({}/{}), terminating defensively",
                active.status, inactive.status
            );
            // An agent still in its expected status is closed out; one
            // already terminal (e.g. ERROR) keeps its record.
            if active.status == AgentStatus::Active {
                active.status = AgentStatus::Done;
            }
            if inactive.status == AgentStatus::Inactive {
                inactive.status = AgentStatus::Done;
            }
            return [first, second];
        }

        // The board is shared: both observations hold the same encoding.
        let board = active.observation.board.clone();
        let applied = R::from_encoding(&board).and_then(|mut engine| {
            let mv = active
                .action
                .as_deref()
                .ok_or_else(|| RulesError::MalformedMove(String::new()))?;
            engine.apply_move(mv)?;
            Ok(engine)
        });

        let engine = match applied {
            Ok(engine) => engine,
            Err(err) => {
                debug!("{} disqualified: {}", active.observation.mark, err);
                active.status = AgentStatus::Error;
                active.reward = -1;
                inactive.status = AgentStatus::Done;
                return [first, second];
            }
        };

        let fen = engine.encoding();
        let placement = fen.split_whitespace().next().unwrap_or_default();
        let repetitions = self.session.record_placement(placement);

        active.observation.board = fen.clone();
        inactive.observation.board = fen;

        let halfmoves = engine.halfmove_clock();
        let status = engine.status();

        if halfmoves >= FIFTY_MOVE_HALFMOVE_LIMIT || is_insufficient_material(&engine) {
            debug!("draw: halfmove clock {halfmoves} or dead material");
            let terminal = self.session.on_terminal();
            active.status = terminal;
            inactive.status = terminal;
        } else if repetitions >= REPETITION_DRAW_COUNT || status == EngineStatus::Stalemate {
            debug!("draw: {repetitions} repetitions or stalemate");
            let terminal = self.session.on_terminal();
            active.status = terminal;
            inactive.status = terminal;
        } else if status == EngineStatus::Checkmate {
            debug!("checkmate by {}", active.observation.mark);
            active.reward += 1;
            let terminal = self.session.on_terminal();
            active.status = terminal;
            inactive.status = terminal;
        } else {
            trace!("turn passes to {}", inactive.observation.mark);
            active.status = AgentStatus::Inactive;
            inactive.status = AgentStatus::Active;
        }

        [first, second]
    }

    /// Setup transition: alternate colors, deal the starting position,
    /// hand White the move.
    fn set_up_game(first: &mut AgentState, second: &mut AgentState) {
        std::mem::swap(&mut first.observation.mark, &mut second.observation.mark);

        let opening = R::starting_position().encoding();
        first.observation.board = opening.clone();
        second.observation.board = opening;

        first.status = Self::status_for(first.observation.mark);
        second.status = Self::status_for(second.observation.mark);
        debug!(
            "new game: first agent plays {}, second plays {}",
            first.observation.mark, second.observation.mark
        );
    }

    fn status_for(mark: Mark) -> AgentStatus {
        if mark == Mark::White {
            AgentStatus::Active
        } else {
            AgentStatus::Inactive
        }
    }

    /// Whether the match has reached its hard end.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.session.phase() == TerminalPhase::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardRules;

    type Interpreter = ChessInterpreter<StandardRules>;

    fn stepped(
        interpreter: &mut Interpreter,
        state: [AgentState; 2],
        mv: &str,
    ) -> [AgentState; 2] {
        let mut state = state;
        let active = state
            .iter_mut()
            .find(|agent| agent.status == AgentStatus::Active)
            .expect("one agent must be active");
        active.action = Some(mv.to_string());
        interpreter.step(state, &Environment::new())
    }

    fn fresh_game(interpreter: &mut Interpreter) -> [AgentState; 2] {
        interpreter.step(AgentState::initial_pair(), &Environment::new())
    }

    #[test]
    fn test_setup_swaps_marks_and_activates_white() {
        let mut interpreter = Interpreter::new();
        let [first, second] = fresh_game(&mut interpreter);

        // initial_pair assigns first=white/second=black; setup swaps.
        assert_eq!(first.observation.mark, Mark::Black);
        assert_eq!(second.observation.mark, Mark::White);
        assert_eq!(first.status, AgentStatus::Inactive);
        assert_eq!(second.status, AgentStatus::Active);
        assert_eq!(first.observation.board, second.observation.board);
        assert!(first.observation.board.starts_with("rnbqkbnr/"));
    }

    #[test]
    fn test_episode_reset_is_idempotent() {
        let mut interpreter = Interpreter::new();
        let state = AgentState::initial_pair();

        let state = interpreter.step(state, &Environment::completed());
        let state = interpreter.step(state, &Environment::completed());

        // Pair unchanged, session empty and running.
        assert_eq!(state, AgentState::initial_pair());
        assert!(interpreter.session().is_empty());
        assert_eq!(interpreter.session().phase(), TerminalPhase::Running);
    }

    #[test]
    fn test_turns_alternate_and_board_stays_shared() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        for mv in ["e2e4", "e7e5", "g1f3"] {
            state = stepped(&mut interpreter, state, mv);

            assert_eq!(state[0].observation.board, state[1].observation.board);
            let actives = state
                .iter()
                .filter(|agent| agent.status == AgentStatus::Active)
                .count();
            assert_eq!(actives, 1);
        }
    }

    #[test]
    fn test_illegal_move_penalizes_only_submitter() {
        let mut interpreter = Interpreter::new();
        let state = fresh_game(&mut interpreter);
        let state = stepped(&mut interpreter, state, "e2e5");

        let (offender, opponent) = if state[0].status == AgentStatus::Error {
            (&state[0], &state[1])
        } else {
            (&state[1], &state[0])
        };
        assert_eq!(offender.status, AgentStatus::Error);
        assert_eq!(offender.reward, -1);
        assert_eq!(opponent.status, AgentStatus::Done);
        assert_eq!(opponent.reward, 0);
    }

    #[test]
    fn test_missing_action_is_disqualifying() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);
        for agent in &mut state {
            agent.action = None;
        }

        let state = interpreter.step(state, &Environment::new());

        assert!(state
            .iter()
            .any(|agent| agent.status == AgentStatus::Error && agent.reward == -1));
    }

    #[test]
    fn test_malformed_state_guard_closes_out_match() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        // Simulate a driver bug: the waiting agent already errored.
        let inactive = state
            .iter_mut()
            .find(|agent| agent.status == AgentStatus::Inactive)
            .unwrap();
        inactive.status = AgentStatus::Error;

        let state = interpreter.step(state, &Environment::new());

        let statuses: Vec<_> = state.iter().map(|agent| agent.status).collect();
        assert!(statuses.contains(&AgentStatus::Done));
        assert!(statuses.contains(&AgentStatus::Error));
        assert!(state.iter().all(|agent| agent.status.is_terminal()));
    }

    #[test]
    fn test_checkmate_rewards_winner_with_soft_terminal() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state = stepped(&mut interpreter, state, mv);
        }

        // First terminal of the episode: soft ACTIVE pair, phase Ending.
        assert_eq!(state[0].status, AgentStatus::Active);
        assert_eq!(state[1].status, AgentStatus::Active);
        assert_eq!(interpreter.session().phase(), TerminalPhase::Ending);

        let winner = state
            .iter()
            .find(|agent| agent.observation.mark == Mark::Black)
            .unwrap();
        assert_eq!(winner.reward, 1);
    }

    #[test]
    fn test_second_game_terminal_is_hard_done() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        // Game one: fool's mate, soft terminal.
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state = stepped(&mut interpreter, state, mv);
        }
        // Both ACTIVE re-enters setup: colors swap for the return game.
        state = interpreter.step(state, &Environment::new());
        assert!(state.iter().any(|agent| agent.status == AgentStatus::Active));

        // Game two: fool's mate again, now a hard DONE.
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state = stepped(&mut interpreter, state, mv);
        }

        assert_eq!(state[0].status, AgentStatus::Done);
        assert_eq!(state[1].status, AgentStatus::Done);
        assert!(interpreter.is_ended());
        // Each agent won once as Black.
        assert_eq!(state[0].reward, 1);
        assert_eq!(state[1].reward, 1);
    }

    #[test]
    fn test_insufficient_material_draws_without_reward() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        // Two knights against two knights: both sides definitively
        // insufficient under the approximate rule.
        let dead = "k7/nn6/8/8/8/8/NN6/K7 w - - 4 20";
        for agent in &mut state {
            agent.observation.board = dead.to_string();
        }
        let state = stepped(&mut interpreter, state, "a2c3");

        assert_eq!(state[0].status, AgentStatus::Active);
        assert_eq!(state[1].status, AgentStatus::Active);
        assert_eq!(interpreter.session().phase(), TerminalPhase::Ending);
        assert_eq!(state[0].reward, 0);
        assert_eq!(state[1].reward, 0);
    }

    #[test]
    fn test_fifty_move_rule_from_high_clock() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        // Rook endgame with the clock one quiet move from the limit.
        let near_limit = "k7/7r/8/8/8/8/7R/K7 w - - 99 80";
        for agent in &mut state {
            agent.observation.board = near_limit.to_string();
        }
        let state = stepped(&mut interpreter, state, "h2h3");

        assert_eq!(state[0].status, AgentStatus::Active);
        assert_eq!(state[1].status, AgentStatus::Active);
        assert_eq!(interpreter.session().phase(), TerminalPhase::Ending);
        assert_eq!(state[0].reward + state[1].reward, 0);
    }

    #[test]
    fn test_threefold_repetition_draws() {
        let mut interpreter = Interpreter::new();
        let mut state = fresh_game(&mut interpreter);

        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        let mut moves = shuffle.iter().cycle();

        // The ninth shuffle half-move brings a placement to its third
        // occurrence.
        for _ in 0..8 {
            state = stepped(&mut interpreter, state, moves.next().unwrap());
            assert_eq!(interpreter.session().phase(), TerminalPhase::Running);
        }
        state = stepped(&mut interpreter, state, moves.next().unwrap());

        assert_eq!(state[0].status, AgentStatus::Active);
        assert_eq!(state[1].status, AgentStatus::Active);
        assert_eq!(interpreter.session().phase(), TerminalPhase::Ending);
        assert_eq!(state[0].reward, 0);
        assert_eq!(state[1].reward, 0);
    }

    #[test]
    fn test_color_alternation_across_setups() {
        let mut interpreter = Interpreter::new();

        let first_setup = fresh_game(&mut interpreter);
        let marks_one = [
            first_setup[0].observation.mark,
            first_setup[1].observation.mark,
        ];

        // A soft terminal leaves both agents ACTIVE, which is the setup
        // sentinel again.
        let mut state = first_setup;
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state = stepped(&mut interpreter, state, mv);
        }
        let second_setup = interpreter.step(state, &Environment::new());
        let marks_two = [
            second_setup[0].observation.mark,
            second_setup[1].observation.mark,
        ];

        assert_eq!(marks_one[0], marks_two[0].opponent());
        assert_eq!(marks_one[1], marks_two[1].opponent());
    }
}
