//! Batch simulation: run many self-play episodes against one record store
//! and tally the results.

use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    Result,
    driver::{self, EpisodeLimits, EpisodeOutcome},
    error::Error,
    ports::{GameRules, RecordStore},
    weights::WeightingStrategy,
};

/// Configuration for a batch of self-play episodes.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub episodes: usize,
    pub num_players: usize,
    pub limits: EpisodeLimits,
    /// Seed for the shared RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl SimulationConfig {
    pub fn new(episodes: usize, num_players: usize) -> Self {
        SimulationConfig {
            episodes,
            num_players,
            limits: EpisodeLimits::default(),
            seed: None,
            show_progress: false,
        }
    }
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub episodes: usize,
    pub wins_by_player: Vec<u64>,
    pub draws: u64,
    pub inconclusive: u64,
    pub total_moves: u64,
}

impl SimulationReport {
    fn new(num_players: usize) -> Self {
        SimulationReport {
            episodes: 0,
            wins_by_player: vec![0; num_players],
            draws: 0,
            inconclusive: 0,
            total_moves: 0,
        }
    }

    fn tally(&mut self, outcome: EpisodeOutcome, turns: usize) {
        self.episodes += 1;
        self.total_moves += turns as u64;
        match outcome {
            EpisodeOutcome::Win(player) => self.wins_by_player[player] += 1,
            EpisodeOutcome::Draw => self.draws += 1,
            EpisodeOutcome::Inconclusive => self.inconclusive += 1,
        }
    }
}

/// Run `config.episodes` episodes from `initial_state`, accumulating every
/// outcome into `store`.
///
/// Episodes run strictly one after another against the same store, so later
/// episodes select moves using the records the earlier ones wrote. That
/// sequencing is the policy-improvement loop.
pub fn run_simulation<G, S, W>(
    rules: &G,
    store: &mut S,
    weighting: &W,
    initial_state: &G::State,
    config: &SimulationConfig,
) -> Result<SimulationReport>
where
    G: GameRules,
    S: RecordStore<G::Hash>,
    W: WeightingStrategy,
{
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let progress = if config.show_progress {
        let bar = ProgressBar::new(config.episodes as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut report = SimulationReport::new(config.num_players);
    for _ in 0..config.episodes {
        let episode = driver::run_episode(
            rules,
            store,
            weighting,
            initial_state.clone(),
            config.num_players,
            config.limits,
            &mut rng,
        )?;
        report.tally(episode.outcome, episode.turns);

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = &progress {
        bar.finish_with_message("simulation complete");
    }

    Ok(report)
}
