//! Inspect command - summarize a saved record snapshot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;

use crate::{
    adapters::{MemoryStore, MsgpackRepository},
    cli::GameKind,
    ports::StoreRepository,
    record::StateRecord,
};

#[derive(Parser, Debug)]
#[command(about = "Summarize a saved record snapshot")]
pub struct InspectArgs {
    /// Game the snapshot belongs to (determines the hash encoding)
    #[arg(value_enum)]
    pub game: GameKind,

    /// Snapshot file to inspect
    pub store: PathBuf,

    /// Number of most-visited states to list
    #[arg(long, short = 'n', default_value_t = 20)]
    pub top: usize,
}

fn display_store<H, F>(store: &MemoryStore<H>, top: usize, format_hash: F)
where
    H: Eq + std::hash::Hash + Clone,
    F: Fn(&H) -> String,
{
    let mut totals = StateRecord::default();
    for (_, record) in store.iter() {
        totals.merge(record);
    }

    println!("Distinct states: {}", store.len());
    println!(
        "Recorded outcomes: {} ({} wins, {} losses, {} draws)",
        totals.visits(),
        totals.wins,
        totals.losses,
        totals.draws
    );

    let mut rows: Vec<(&H, &StateRecord)> = store.iter().collect();
    rows.sort_by(|a, b| b.1.visits().cmp(&a.1.visits()));
    rows.truncate(top);

    if rows.is_empty() {
        return;
    }

    println!("\nTop {} states by visits:", rows.len());
    println!("{:<24} {:>8} {:>8} {:>8} {:>8}", "hash", "visits", "wins", "losses", "draws");
    for (hash, record) in rows {
        println!(
            "{:<24} {:>8} {:>8} {:>8} {:>8}",
            format_hash(hash),
            record.visits(),
            record.wins,
            record.losses,
            record.draws
        );
    }
}

fn load_store<H>(path: &PathBuf) -> Result<MemoryStore<H>>
where
    H: Eq + std::hash::Hash + Clone + serde::Serialize + DeserializeOwned,
{
    let repo: MsgpackRepository<H> = MsgpackRepository::new();
    repo.load(path)
        .with_context(|| format!("loading snapshot from {}", path.display()))
}

pub fn execute(args: InspectArgs) -> Result<()> {
    match args.game {
        GameKind::Tictactoe => {
            let store: MemoryStore<u32> = load_store(&args.store)?;
            display_store(&store, args.top, |hash| hash.to_string());
        }
        GameKind::Checkers => {
            let store: MemoryStore<Vec<u8>> = load_store(&args.store)?;
            display_store(&store, args.top, |hash| {
                hash.iter().map(|byte| format!("{byte:02x}")).collect()
            });
        }
    }
    Ok(())
}
