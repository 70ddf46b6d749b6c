//! Simulate command - run batches of self-play episodes.

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::to_writer_pretty;

use crate::{
    adapters::{MemoryStore, MsgpackRepository},
    cli::GameKind,
    driver::EpisodeLimits,
    games::{Checkers, TicTacToe},
    ports::{GameRules, StoreRepository},
    simulation::{self, SimulationConfig, SimulationReport},
    weights::LinearWeighting,
};

#[derive(Parser, Debug)]
#[command(about = "Run self-play episodes", allow_negative_numbers = true)]
pub struct SimulateArgs {
    /// Game to play
    #[arg(value_enum)]
    pub game: GameKind,

    /// Number of self-play episodes
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Linear weight applied per recorded win
    #[arg(long, default_value_t = 10.0)]
    pub wins_weight: f64,

    /// Linear weight applied per recorded loss
    #[arg(long, default_value_t = -10.0)]
    pub losses_weight: f64,

    /// Linear weight applied per recorded draw
    #[arg(long, default_value_t = 5.0)]
    pub draws_weight: f64,

    /// Exploration bonus per visit below the most-visited sibling
    #[arg(long, default_value_t = 20.0)]
    pub visit_deficit_weight: f64,

    /// Maximum moves per episode (defaults to 1000 for checkers, unlimited
    /// for tic-tac-toe)
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Count episodes that hit the turn cap as draws; pass `false` to
    /// discard them without updating any records
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub max_turns_is_draw: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Record snapshot to load before the run and save back afterwards
    #[arg(long, short = 'O')]
    pub store: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct SummaryFile {
    game: String,
    episodes: usize,
    wins_by_player: Vec<u64>,
    draws: u64,
    inconclusive: u64,
    total_moves: u64,
    distinct_states: usize,
    seed: Option<u64>,
}

fn display_report(report: &SimulationReport, distinct_states: usize) {
    println!("\n=== Simulation Complete ===");
    println!("Episodes: {}", report.episodes);
    for (player, wins) in report.wins_by_player.iter().enumerate() {
        println!(
            "Player {player} wins: {wins} ({:.1}%)",
            *wins as f64 / report.episodes as f64 * 100.0
        );
    }
    println!(
        "Draws: {} ({:.1}%)",
        report.draws,
        report.draws as f64 / report.episodes as f64 * 100.0
    );
    if report.inconclusive > 0 {
        println!("Inconclusive (turn cap): {}", report.inconclusive);
    }
    println!("Total moves: {}", report.total_moves);
    println!("Distinct states learned: {distinct_states}");
}

fn run_for_game<G>(rules: &G, initial_state: G::State, args: &SimulateArgs) -> Result<()>
where
    G: GameRules,
    G::Hash: Serialize + DeserializeOwned,
{
    let repo: MsgpackRepository<G::Hash> = MsgpackRepository::new();

    let mut store = match &args.store {
        Some(path) if path.exists() => {
            let loaded = repo
                .load(path)
                .with_context(|| format!("loading snapshot from {}", path.display()))?;
            println!(
                "Loaded {} state record(s) from {}",
                loaded.len(),
                path.display()
            );
            loaded
        }
        _ => MemoryStore::new(),
    };

    let weighting = LinearWeighting::new(
        args.wins_weight,
        args.losses_weight,
        args.draws_weight,
        args.visit_deficit_weight,
    );

    // Checkers kings can shuffle indefinitely; cap episodes by default.
    let max_turns = args.max_turns.or(match args.game {
        GameKind::Checkers => Some(1000),
        GameKind::Tictactoe => None,
    });
    let limits = match max_turns {
        Some(cap) => EpisodeLimits::capped(cap, args.max_turns_is_draw),
        None => EpisodeLimits::unlimited(),
    };

    let config = SimulationConfig {
        episodes: args.games,
        num_players: 2,
        limits,
        seed: args.seed,
        show_progress: !args.no_progress,
    };

    let report = simulation::run_simulation(rules, &mut store, &weighting, &initial_state, &config)?;
    display_report(&report, store.len());

    if let Some(path) = &args.store {
        repo.save(&store, path)
            .with_context(|| format!("saving snapshot to {}", path.display()))?;
        println!("Snapshot saved to {}", path.display());
    }

    if let Some(summary_path) = &args.summary {
        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let summary = SummaryFile {
            game: format!("{:?}", args.game).to_lowercase(),
            episodes: report.episodes,
            wins_by_player: report.wins_by_player.clone(),
            draws: report.draws,
            inconclusive: report.inconclusive,
            total_moves: report.total_moves,
            distinct_states: store.len(),
            seed: args.seed,
        };
        let file = File::create(summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    match args.game {
        GameKind::Tictactoe => run_for_game(&TicTacToe, TicTacToe::initial_state(), &args),
        GameKind::Checkers => run_for_game(&Checkers, Checkers::initial_state(), &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_shows_by_default_and_can_be_hidden() {
        let args = SimulateArgs::try_parse_from(["simulate", "tictactoe"]).unwrap();
        assert!(!args.no_progress);

        let args = SimulateArgs::try_parse_from(["simulate", "tictactoe", "--no-progress"]).unwrap();
        assert!(args.no_progress);
    }

    #[test]
    fn capped_episodes_count_as_draws_by_default() {
        let args = SimulateArgs::try_parse_from(["simulate", "checkers"]).unwrap();
        assert!(args.max_turns_is_draw);

        let args = SimulateArgs::try_parse_from([
            "simulate",
            "checkers",
            "--max-turns-is-draw",
            "false",
        ])
        .unwrap();
        assert!(!args.max_turns_is_draw);
    }
}
