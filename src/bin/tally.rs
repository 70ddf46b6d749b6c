//! tally CLI - tabular self-play learning for turn-based games
//!
//! This CLI provides a unified interface for:
//! - Running self-play simulations that learn per-player move policies
//! - Inspecting the record snapshots those simulations produce

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tally")]
#[command(version, about = "Tabular self-play learning for turn-based games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run self-play episodes against a record store
    Simulate(tally::cli::commands::simulate::SimulateArgs),

    /// Summarize a saved record snapshot
    Inspect(tally::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(args) => tally::cli::commands::simulate::execute(args),
        Commands::Inspect(args) => tally::cli::commands::inspect::execute(args),
    }
}
