//! State record bookkeeping: the win/loss/draw tally kept per state hash.

use serde::{Deserialize, Serialize};

/// How a single recorded visit to a state resolved for the player who caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    Win,
    Loss,
    Draw,
}

/// Accumulated outcomes for one (player, state) hash across all resolved episodes.
///
/// All three counters are monotonically non-decreasing for the lifetime of the
/// store that owns the record. `visits()` therefore equals the number of times
/// this exact state was the move a player actually made and later resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl StateRecord {
    /// Create a record with explicit counter values.
    pub fn new(wins: u64, losses: u64, draws: u64) -> Self {
        StateRecord {
            wins,
            losses,
            draws,
        }
    }

    /// Total number of recorded visits (wins + losses + draws).
    pub fn visits(&self) -> u64 {
        self.wins + self.losses + self.draws
    }

    /// Count one more resolved outcome.
    ///
    /// Stores must call this even when the record was just created, so that
    /// the very first visit to a state is counted like every later one.
    pub fn apply(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Win => self.wins += 1,
            MoveOutcome::Loss => self.losses += 1,
            MoveOutcome::Draw => self.draws += 1,
        }
    }

    /// Fold another record's counters into this one.
    pub fn merge(&mut self, other: &StateRecord) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
    }
}
