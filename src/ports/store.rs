//! Record store port.

use crate::record::{MoveOutcome, StateRecord};

/// Read/write access to the per-hash outcome tallies.
///
/// The store is owned by the caller; the engine only ever reaches it through
/// this trait. The driver calls `update_record` exactly once per
/// (player, move) pair per resolved episode, which keeps every record's visit
/// count equal to the number of times that exact move was chosen.
pub trait RecordStore<H> {
    /// Current tally for `hash`, or `None` if it has never been updated.
    fn get_record(&self, hash: &H) -> Option<StateRecord>;

    /// Count one more resolved outcome for `hash`.
    ///
    /// Implementations must count the outcome even when this is the first
    /// ever sight of `hash`; initializing a fresh record to zero and dropping
    /// the current outcome silently under-counts the first visit to every
    /// state.
    fn update_record(&mut self, hash: &H, outcome: MoveOutcome);
}
