//! CSV snapshot repository: one delimited-text row per hash.
//!
//! The format is `hash,wins,losses,draws` with a header row, which keeps
//! snapshots inspectable with ordinary text tooling. Requires a hash type
//! with a string round-trip (`Display` + `FromStr`).

use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;

use crate::{
    Result,
    adapters::MemoryStore,
    error::Error,
    ports::{RecordStore, StoreRepository},
    record::StateRecord,
};

/// Repository writing store snapshots as delimited text.
pub struct CsvRepository<H> {
    _hash: PhantomData<H>,
}

impl<H> CsvRepository<H> {
    pub fn new() -> Self {
        CsvRepository { _hash: PhantomData }
    }
}

impl<H> Default for CsvRepository<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> StoreRepository<H> for CsvRepository<H>
where
    H: Eq + Hash + Clone + Display + FromStr,
    <H as FromStr>::Err: Display,
{
    fn save(&self, store: &MemoryStore<H>, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["hash", "wins", "losses", "draws"])?;

        // Sorted output keeps snapshots diffable between runs.
        let mut rows: Vec<(String, StateRecord)> = store
            .iter()
            .map(|(hash, record)| (hash.to_string(), *record))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (hash, record) in rows {
            writer.write_record([
                hash,
                record.wins.to_string(),
                record.losses.to_string(),
                record.draws.to_string(),
            ])?;
        }

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush record snapshot to {}", path.display()),
            source,
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<MemoryStore<H>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut store = MemoryStore::new();

        for (row_index, row) in reader.records().enumerate() {
            let row = row?;
            // Header is row 0 as far as the reader is concerned; report
            // 1-based data line numbers including it.
            let line = row_index + 2;

            if row.len() != 4 {
                return Err(Error::MalformedRecordRow {
                    line,
                    message: format!("expected 4 fields, got {}", row.len()),
                });
            }

            let hash = H::from_str(&row[0]).map_err(|e| Error::MalformedRecordRow {
                line,
                message: format!("unparseable hash '{}': {e}", &row[0]),
            })?;
            let record = StateRecord::new(
                parse_counter(&row[1], "wins", line)?,
                parse_counter(&row[2], "losses", line)?,
                parse_counter(&row[3], "draws", line)?,
            );
            store.insert_record(hash, record);
        }

        Ok(store)
    }
}

fn parse_counter(field: &str, name: &str, line: usize) -> Result<u64> {
    field.parse().map_err(|_| Error::MalformedRecordRow {
        line,
        message: format!("unparseable {name} counter '{field}'"),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::record::MoveOutcome;

    #[test]
    fn round_trips_a_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.csv");

        let mut store: MemoryStore<u32> = MemoryStore::new();
        store.update_record(&10, MoveOutcome::Win);
        store.update_record(&10, MoveOutcome::Draw);
        store.update_record(&99, MoveOutcome::Loss);

        let repo = CsvRepository::new();
        repo.save(&store, &path).unwrap();
        let loaded = repo.load(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get_record(&10), Some(StateRecord::new(1, 0, 1)));
        assert_eq!(loaded.get_record(&99), Some(StateRecord::new(0, 1, 0)));
    }

    #[test]
    fn rejects_malformed_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.csv");
        std::fs::write(&path, "hash,wins,losses,draws\n12,three,0,0\n").unwrap();

        let repo: CsvRepository<u32> = CsvRepository::new();
        let result = repo.load(&path);
        assert!(matches!(
            result,
            Err(Error::MalformedRecordRow { line: 2, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let repo: CsvRepository<u32> = CsvRepository::new();
        assert!(repo.load(Path::new("does-not-exist.csv")).is_err());
    }
}
