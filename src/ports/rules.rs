//! Game rules port: the callback contract a concrete game must satisfy.

use std::hash::Hash;

/// The rules of a deterministic, perfect-information, turn-based game, as
/// consumed by the episode driver and move selector.
///
/// The engine never inspects `State`; it only hashes states, enumerates
/// successors, and asks terminality questions. `Hash` must identify a
/// (acting player, state) pair: two players reaching the same board position
/// legitimately hash to different records, because "my winning chances from
/// here" and "the opponent's winning chances from here" are separate
/// estimates.
pub trait GameRules {
    /// Opaque board/position representation.
    type State: Clone;

    /// Record-store key for a (player, state) pair.
    type Hash: Eq + Hash + Clone;

    /// Deterministically identify the given (player, state) pair.
    fn hash_state(&self, player: usize, state: &Self::State) -> Self::Hash;

    /// All states reachable by `player` moving once from `state`.
    ///
    /// Must be finite, and non-empty unless the position is terminal.
    fn available_states(&self, player: usize, state: &Self::State) -> Vec<Self::State>;

    /// Whether `state` is a drawn terminal position.
    ///
    /// Must be true exactly at positions with no further moves that are not
    /// already covered by a win; the driver checks this before any win check.
    fn is_draw_state(&self, player: usize, state: &Self::State) -> bool;

    /// Whether `state` is a win for `player`.
    ///
    /// The driver evaluates this once per player per step in ascending
    /// player-index order; the first match wins.
    fn is_win_state(&self, player: usize, state: &Self::State) -> bool;
}
