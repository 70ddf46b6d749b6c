//! Repository port for record-store snapshot persistence.
//!
//! This trait is the boundary between the engine and the storage format;
//! implementations (CSV, MessagePack) live in `crate::adapters`.

use std::path::Path;

use crate::{Result, adapters::MemoryStore};

/// Port for persisting and loading in-memory record stores.
///
/// Persistence is entirely an adapter concern: the engine only ever sees
/// `absent` versus a well-formed record, and a snapshot loaded through this
/// trait must reproduce exactly the tallies that were saved.
pub trait StoreRepository<H: Eq + std::hash::Hash + Clone> {
    /// Save a store snapshot to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, store: &MemoryStore<H>, path: &Path) -> Result<()>;

    /// Load a store snapshot from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    fn load(&self, path: &Path) -> Result<MemoryStore<H>>;
}
