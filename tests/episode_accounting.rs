//! Episode driver accounting: every resolved move is credited exactly once,
//! to the player who made it, with the outcome seen from their side.

use rand::{SeedableRng, rngs::StdRng};
use tally::{
    Error,
    adapters::MemoryStore,
    driver::{EpisodeLimits, EpisodeOutcome, run_episode},
    ports::GameRules,
    weights::FnWeighting,
};

/// Two players alternate adding 1 or 2 to a running total; whoever pushes the
/// total to 10 or beyond wins.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Race {
    total: u32,
    last_mover: Option<usize>,
}

struct RaceToTen;

impl GameRules for RaceToTen {
    type State = Race;
    type Hash = u32;

    fn hash_state(&self, player: usize, state: &Self::State) -> Self::Hash {
        state.total * 2 + player as u32
    }

    fn available_states(&self, player: usize, state: &Self::State) -> Vec<Self::State> {
        if state.total >= 10 {
            return Vec::new();
        }
        [1, 2]
            .iter()
            .map(|step| Race {
                total: state.total + step,
                last_mover: Some(player),
            })
            .collect()
    }

    fn is_draw_state(&self, _player: usize, _state: &Self::State) -> bool {
        false
    }

    fn is_win_state(&self, player: usize, state: &Self::State) -> bool {
        state.total >= 10 && state.last_mover == Some(player)
    }
}

/// Players alternate placing one token each; four tokens on the table is a
/// draw. Every episode resolves the same way, which pins down the accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pile {
    placed: u32,
    last_mover: Option<usize>,
}

struct FillFour;

impl GameRules for FillFour {
    type State = Pile;
    type Hash = u32;

    fn hash_state(&self, player: usize, state: &Self::State) -> Self::Hash {
        state.placed * 2 + player as u32
    }

    fn available_states(&self, player: usize, state: &Self::State) -> Vec<Self::State> {
        if state.placed >= 4 {
            return Vec::new();
        }
        vec![Pile {
            placed: state.placed + 1,
            last_mover: Some(player),
        }]
    }

    fn is_draw_state(&self, _player: usize, state: &Self::State) -> bool {
        state.placed >= 4
    }

    fn is_win_state(&self, _player: usize, _state: &Self::State) -> bool {
        false
    }
}

fn flat_weighting() -> impl tally::weights::WeightingStrategy {
    FnWeighting::new(|_: &tally::StateRecord| 1.0, |_, _, _| 0.0)
}

#[test]
fn win_credits_winner_and_loser_along_their_own_paths() {
    let rules = RaceToTen;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(11);

    let start = Race {
        total: 0,
        last_mover: None,
    };
    let report = run_episode(
        &rules,
        &mut store,
        &flat_weighting(),
        start,
        2,
        EpisodeLimits::unlimited(),
        &mut rng,
    )
    .unwrap();

    let winner = match report.outcome {
        EpisodeOutcome::Win(winner) => winner,
        other => panic!("race must end with a win, got {other:?}"),
    };
    let loser = 1 - winner;

    // Totals strictly increase, so no hash repeats within the episode and
    // every move maps to exactly one record update.
    let mut wins = 0;
    let mut losses = 0;
    let mut visits = 0;
    for (_, record) in store.iter() {
        wins += record.wins;
        losses += record.losses;
        assert_eq!(record.draws, 0);
        visits += record.visits();
    }
    assert_eq!(wins as usize, report.moves_by_player[winner]);
    assert_eq!(losses as usize, report.moves_by_player[loser]);
    assert_eq!(visits as usize, report.turns);
    assert_eq!(
        report.moves_by_player.iter().sum::<usize>(),
        report.turns
    );
}

#[test]
fn draw_credits_every_player_for_every_move() {
    let rules = FillFour;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(3);

    let start = Pile {
        placed: 0,
        last_mover: None,
    };
    let report = run_episode(
        &rules,
        &mut store,
        &flat_weighting(),
        start,
        2,
        EpisodeLimits::unlimited(),
        &mut rng,
    )
    .unwrap();

    assert_eq!(report.outcome, EpisodeOutcome::Draw);
    assert_eq!(report.turns, 4);
    assert_eq!(report.moves_by_player, vec![2, 2]);

    assert_eq!(store.len(), 4);
    for (_, record) in store.iter() {
        assert_eq!(*record, tally::StateRecord::new(0, 0, 1));
    }
}

#[test]
fn zero_players_is_an_invalid_configuration() {
    let rules = RaceToTen;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(0);

    let result = run_episode(
        &rules,
        &mut store,
        &flat_weighting(),
        Race {
            total: 0,
            last_mover: None,
        },
        0,
        EpisodeLimits::unlimited(),
        &mut rng,
    );
    assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
}

#[test]
fn dead_end_without_terminal_state_is_reported() {
    let rules = RaceToTen;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(0);

    // total >= 10 with no recorded mover: no candidates, but nobody won.
    let stuck = Race {
        total: 10,
        last_mover: None,
    };
    let result = run_episode(
        &rules,
        &mut store,
        &flat_weighting(),
        stuck,
        2,
        EpisodeLimits::unlimited(),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(Error::NoAvailableStates { player: 0 })
    ));
    assert!(store.is_empty());
}

#[test]
fn all_zero_weights_abort_the_episode_without_updates() {
    let rules = RaceToTen;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(5);

    let zero = FnWeighting::new(|_: &tally::StateRecord| 0.0, |_, _, _| 0.0);
    let result = run_episode(
        &rules,
        &mut store,
        &zero,
        Race {
            total: 0,
            last_mover: None,
        },
        2,
        EpisodeLimits::unlimited(),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(Error::SamplingExhausted { candidates: 2 })
    ));
    assert!(store.is_empty());
}

#[test]
fn turn_cap_without_draw_leaves_records_untouched() {
    let rules = RaceToTen;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(8);

    let report = run_episode(
        &rules,
        &mut store,
        &flat_weighting(),
        Race {
            total: 0,
            last_mover: None,
        },
        2,
        EpisodeLimits::capped(1, false),
        &mut rng,
    )
    .unwrap();

    assert_eq!(report.outcome, EpisodeOutcome::Inconclusive);
    assert_eq!(report.turns, 1);
    assert!(store.is_empty());
}

#[test]
fn turn_cap_as_draw_records_the_truncated_episode() {
    let rules = RaceToTen;
    let mut store: MemoryStore<u32> = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(8);

    let report = run_episode(
        &rules,
        &mut store,
        &flat_weighting(),
        Race {
            total: 0,
            last_mover: None,
        },
        2,
        EpisodeLimits::capped(1, true),
        &mut rng,
    )
    .unwrap();

    assert_eq!(report.outcome, EpisodeOutcome::Draw);
    assert_eq!(store.len(), 1);
    let (_, record) = store.iter().next().unwrap();
    assert_eq!(*record, tally::StateRecord::new(0, 0, 1));
}
