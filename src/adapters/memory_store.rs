//! In-memory record store backed by a HashMap.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::{
    ports::RecordStore,
    record::{MoveOutcome, StateRecord},
};

/// Process-wide record store: one tally per state hash, kept for the lifetime
/// of the store with no eviction.
///
/// Records are created on first update and counted from that very first
/// outcome onward. The store is plain mutable state; running episodes against
/// it takes `&mut`, so concurrent simulation requires one store per worker
/// followed by [`MemoryStore::merge`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "H: Serialize",
    deserialize = "H: Deserialize<'de> + Eq + Hash"
))]
pub struct MemoryStore<H: Eq + Hash> {
    records: HashMap<H, StateRecord>,
}

impl<H: Eq + Hash + Clone> MemoryStore<H> {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore {
            records: HashMap::new(),
        }
    }

    /// Number of distinct hashes with at least one recorded outcome.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no outcomes have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all (hash, record) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&H, &StateRecord)> {
        self.records.iter()
    }

    /// Install a fully-formed record, summing counters if the hash already
    /// has one. Used when rebuilding a store from a persisted snapshot.
    pub fn insert_record(&mut self, hash: H, record: StateRecord) {
        self.records.entry(hash).or_default().merge(&record);
    }

    /// Fold another store's tallies into this one, summing counters for
    /// hashes present in both. Used to combine per-worker stores after
    /// parallel simulation.
    pub fn merge(&mut self, other: &MemoryStore<H>) {
        for (hash, record) in other.iter() {
            self.records
                .entry(hash.clone())
                .or_default()
                .merge(record);
        }
    }
}

impl<H: Eq + Hash + Clone> Default for MemoryStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Eq + Hash + Clone> RecordStore<H> for MemoryStore<H> {
    fn get_record(&self, hash: &H) -> Option<StateRecord> {
        self.records.get(hash).copied()
    }

    fn update_record(&mut self, hash: &H, outcome: MoveOutcome) {
        // entry + apply counts the outcome even on first creation; see the
        // RecordStore contract.
        self.records.entry(hash.clone()).or_default().apply(outcome);
    }
}
