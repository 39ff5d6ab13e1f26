//! Scripted demo agents.
//!
//! Policy stubs, not engines: they exercise the platform end-to-end and
//! give the integration tests opponents with predictable character. All
//! three are deterministic under a fixed seed.

use std::marker::PhantomData;

use crate::core::{Agent, MatchRng, Observation};
use crate::rules::RulesEngine;

/// Plays a uniformly random legal move.
#[derive(Clone, Debug)]
pub struct RandomAgent<R> {
    rng: MatchRng,
    _rules: PhantomData<R>,
}

impl<R: RulesEngine> RandomAgent<R> {
    /// Create a random agent with its own RNG stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: MatchRng::new(seed),
            _rules: PhantomData,
        }
    }
}

impl<R: RulesEngine> Agent for RandomAgent<R> {
    fn act(&mut self, observation: &Observation) -> Option<String> {
        let engine = R::from_encoding(&observation.board).ok()?;
        let moves = engine.legal_moves();
        self.rng.choose(&moves).cloned()
    }
}

/// Opens with the king's pawn, then shuffles the king back and forth.
///
/// Works from either side of the board: the preference list carries both
/// colors' moves and legality filters out the opponent's half.
#[derive(Clone, Debug)]
pub struct KingShuffleAgent<R> {
    rng: MatchRng,
    _rules: PhantomData<R>,
}

const KING_SHUFFLE_LINE: [&str; 6] = ["e7e5", "e2e4", "e8e7", "e7e8", "e1e2", "e2e1"];

impl<R: RulesEngine> KingShuffleAgent<R> {
    /// Create a king-shuffle agent with its own RNG stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: MatchRng::new(seed),
            _rules: PhantomData,
        }
    }
}

impl<R: RulesEngine> Agent for KingShuffleAgent<R> {
    fn act(&mut self, observation: &Observation) -> Option<String> {
        let engine = R::from_encoding(&observation.board).ok()?;
        let moves = engine.legal_moves();

        for preferred in KING_SHUFFLE_LINE {
            if moves.iter().any(|mv| mv == preferred) {
                return Some(preferred.to_string());
            }
        }
        self.rng.choose(&moves).cloned()
    }
}

/// Opens with the king's pawn, then shuffles minor pieces and king-steps
/// inside ranks 3-6 without occupying e4/e5.
///
/// Useful for driving long non-progressing games: it steers matches
/// toward repetition and fifty-move draws.
#[derive(Clone, Debug)]
pub struct BoardShuffleAgent<R> {
    rng: MatchRng,
    _rules: PhantomData<R>,
}

const BOARD_SHUFFLE_OPENING: [&str; 6] = ["e7e5", "e2e4", "e8e7", "e7e6", "e1e2", "e2e3"];

const MINOR_SHUFFLES: [&str; 12] = [
    "b1c3", "c3b1", "g1f3", "f3g1", "b8c6", "c6b8", "g8f6", "f6g8", "f1e2", "e2f1", "f8e7",
    "e7f8",
];

impl<R: RulesEngine> BoardShuffleAgent<R> {
    /// Create a board-shuffle agent with its own RNG stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: MatchRng::new(seed),
            _rules: PhantomData,
        }
    }

    /// A one-square step that stays inside ranks 3-6 and off e4/e5.
    fn is_quiet_shuffle(mv: &str) -> bool {
        let bytes = mv.as_bytes();
        if bytes.len() < 4 {
            return false;
        }
        let (from_file, from_rank, to_file, to_rank) = (bytes[0], bytes[1], bytes[2], bytes[3]);
        if !(b'3'..=b'6').contains(&from_rank) || !(b'3'..=b'6').contains(&to_rank) {
            return false;
        }
        if from_file.abs_diff(to_file) > 1 || from_rank.abs_diff(to_rank) > 1 {
            return false;
        }
        !matches!(&mv[2..4], "e4" | "e5")
    }
}

impl<R: RulesEngine> Agent for BoardShuffleAgent<R> {
    fn act(&mut self, observation: &Observation) -> Option<String> {
        let engine = R::from_encoding(&observation.board).ok()?;
        let moves = engine.legal_moves();

        for preferred in BOARD_SHUFFLE_OPENING {
            if moves.iter().any(|mv| mv == preferred) {
                return Some(preferred.to_string());
            }
        }

        let mut candidates: Vec<String> =
            MINOR_SHUFFLES.iter().map(|mv| (*mv).to_string()).collect();
        candidates.extend(
            moves
                .iter()
                .filter(|mv| Self::is_quiet_shuffle(mv.as_str()))
                .cloned(),
        );
        self.rng.shuffle(&mut candidates);

        for candidate in candidates {
            if moves.contains(&candidate) {
                return Some(candidate);
            }
        }
        self.rng.choose(&moves).cloned()
    }
}
