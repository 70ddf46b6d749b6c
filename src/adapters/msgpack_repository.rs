//! MessagePack snapshot repository.
//!
//! Binary snapshots for hash types without a natural string form (for
//! example the byte-string hashes the checkers adapter produces).

use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter};
use std::marker::PhantomData;
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Result,
    adapters::MemoryStore,
    error::Error,
    ports::StoreRepository,
};

/// Repository writing store snapshots as MessagePack.
pub struct MsgpackRepository<H> {
    _hash: PhantomData<H>,
}

impl<H> MsgpackRepository<H> {
    pub fn new() -> Self {
        MsgpackRepository { _hash: PhantomData }
    }
}

impl<H> Default for MsgpackRepository<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> StoreRepository<H> for MsgpackRepository<H>
where
    H: Eq + Hash + Clone + Serialize + DeserializeOwned,
{
    fn save(&self, store: &MemoryStore<H>, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create snapshot file {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, store).map_err(|e| Error::SerializationContext {
            operation: format!("serialize record snapshot to {}", path.display()),
            message: e.to_string(),
        })
    }

    fn load(&self, path: &Path) -> Result<MemoryStore<H>> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open snapshot file {}", path.display()),
            source,
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).map_err(|e| Error::SerializationContext {
            operation: format!("deserialize record snapshot from {}", path.display()),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        ports::RecordStore,
        record::{MoveOutcome, StateRecord},
    };

    #[test]
    fn round_trips_byte_string_hashes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.msgpack");

        let mut store: MemoryStore<Vec<u8>> = MemoryStore::new();
        store.update_record(&vec![0x01, 0xAB], MoveOutcome::Win);
        store.update_record(&vec![0x02], MoveOutcome::Draw);
        store.update_record(&vec![0x02], MoveOutcome::Draw);

        let repo = MsgpackRepository::new();
        repo.save(&store, &path).unwrap();
        let loaded = repo.load(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get_record(&vec![0x02]),
            Some(StateRecord::new(0, 0, 2))
        );
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.msgpack");
        std::fs::write(&path, b"definitely not msgpack").unwrap();

        let repo: MsgpackRepository<u32> = MsgpackRepository::new();
        assert!(matches!(
            repo.load(&path),
            Err(Error::SerializationContext { .. })
        ));
    }
}
