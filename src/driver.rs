//! Episode driver: runs one full game of self-play and propagates the
//! outcome back into the record store.

use rand::Rng;

use crate::{
    Result,
    error::Error,
    ports::{GameRules, RecordStore},
    record::MoveOutcome,
    selector,
    weights::WeightingStrategy,
};

/// Terminal result of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EpisodeOutcome {
    /// Won by the player with this index.
    Win(usize),
    Draw,
    /// The turn limit was reached without a terminal state and the limit is
    /// not configured to count as a draw. No records are updated.
    Inconclusive,
}

impl EpisodeOutcome {
    /// How this episode resolves for `player`'s own moves, or `None` when
    /// nothing should be recorded.
    fn credit_for(self, player: usize) -> Option<MoveOutcome> {
        match self {
            EpisodeOutcome::Win(winner) if winner == player => Some(MoveOutcome::Win),
            EpisodeOutcome::Win(_) => Some(MoveOutcome::Loss),
            EpisodeOutcome::Draw => Some(MoveOutcome::Draw),
            EpisodeOutcome::Inconclusive => None,
        }
    }
}

/// Turn-count limits for a single episode.
///
/// The engine itself has no timeout concept; games whose rules permit
/// unbounded play (checkers shuffling kings back and forth) need a turn cap
/// to stay well-founded.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeLimits {
    /// Maximum number of moves across all players, or `None` for unlimited.
    pub max_turns: Option<usize>,
    /// Whether hitting the cap counts as a draw (records updated) or leaves
    /// the episode inconclusive (records untouched).
    pub max_turns_is_draw: bool,
}

impl EpisodeLimits {
    pub fn unlimited() -> Self {
        EpisodeLimits {
            max_turns: None,
            max_turns_is_draw: true,
        }
    }

    pub fn capped(max_turns: usize, max_turns_is_draw: bool) -> Self {
        EpisodeLimits {
            max_turns: Some(max_turns),
            max_turns_is_draw,
        }
    }
}

impl Default for EpisodeLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// What happened in one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeReport {
    pub outcome: EpisodeOutcome,
    /// Total moves made across all players.
    pub turns: usize,
    /// Moves made by each player; sums to `turns`.
    pub moves_by_player: Vec<usize>,
}

/// Run one episode from `initial_state` until a terminal state.
///
/// Players move in index order starting from player 0. Each step asks the
/// rules for the acting player's candidate states, draws one through the
/// weighted selector, and appends its hash to that player's path. Terminal
/// detection happens on the chosen state: the draw check first, then the win
/// check for each player in ascending index order (the first matching player
/// wins; simultaneous multi-winner states are a rules-adapter contract
/// violation this driver does not arbitrate).
///
/// On termination every player's path is replayed into the store: a draw
/// records a draw for every hash, a win records wins along the winner's path
/// and losses along everyone else's. Each player is credited only for the
/// states they personally chose, which is what makes the tally a per-player
/// value estimate rather than a shared game value. This is the only place
/// records are mutated; move selection never writes.
///
/// # Errors
///
/// Propagates selector failures ([`Error::SamplingExhausted`],
/// [`Error::InvalidWeight`]) and reports [`Error::NoAvailableStates`] when
/// the rules return no candidates without having signalled a draw, or
/// [`Error::InvalidConfiguration`] for zero players. Any failure aborts the
/// episode with no record updates.
pub fn run_episode<G, S, W, R>(
    rules: &G,
    store: &mut S,
    weighting: &W,
    initial_state: G::State,
    num_players: usize,
    limits: EpisodeLimits,
    rng: &mut R,
) -> Result<EpisodeReport>
where
    G: GameRules,
    S: RecordStore<G::Hash>,
    W: WeightingStrategy,
    R: Rng,
{
    if num_players == 0 {
        return Err(Error::InvalidConfiguration {
            message: "an episode needs at least one player".to_string(),
        });
    }

    let mut paths: Vec<Vec<G::Hash>> = (0..num_players).map(|_| Vec::new()).collect();
    let mut current_player = 0;
    let mut current_state = initial_state;
    let mut turns = 0;

    let outcome = loop {
        if let Some(max_turns) = limits.max_turns {
            if turns >= max_turns {
                break if limits.max_turns_is_draw {
                    EpisodeOutcome::Draw
                } else {
                    EpisodeOutcome::Inconclusive
                };
            }
        }

        let mut candidates = rules.available_states(current_player, &current_state);
        let chosen =
            selector::select_next_state(rules, store, weighting, current_player, &candidates, rng)?;
        let new_state = candidates.swap_remove(chosen);
        turns += 1;

        paths[current_player].push(rules.hash_state(current_player, &new_state));

        if rules.is_draw_state(current_player, &new_state) {
            break EpisodeOutcome::Draw;
        }
        if let Some(winner) = (0..num_players).find(|&p| rules.is_win_state(p, &new_state)) {
            break EpisodeOutcome::Win(winner);
        }

        current_player = (current_player + 1) % num_players;
        current_state = new_state;
    };

    for (player, path) in paths.iter().enumerate() {
        if let Some(credit) = outcome.credit_for(player) {
            for hash in path {
                store.update_record(hash, credit);
            }
        }
    }

    Ok(EpisodeReport {
        outcome,
        turns,
        moves_by_player: paths.iter().map(Vec::len).collect(),
    })
}
