//! Weighting strategies: pluggable scoring functions that turn a state record
//! and its visit count into a sampling weight.
//!
//! Two independent scores are combined by the selector: an outcome score from
//! the record's tally, and an exploration score from the visit count relative
//! to the minimum and maximum visit counts among the sibling candidates.

use crate::record::StateRecord;

/// The pair of scoring functions the move selector calls back into.
///
/// Both functions must be pure and return values usable directly as sampling
/// weights: finite and non-negative once combined. The selector rejects NaN,
/// infinite, and negative combined weights rather than masking them.
pub trait WeightingStrategy {
    /// Score a candidate from its outcome tally.
    fn weigh_outcomes(&self, record: &StateRecord) -> f64;

    /// Score a candidate from how often it has been visited relative to its
    /// siblings. `min_sibling_visits` and `max_sibling_visits` are the range
    /// observed across the currently-available candidate set, which lets a
    /// strategy favor the least-visited sibling without any global state.
    fn weigh_visits(&self, visits: u64, min_sibling_visits: u64, max_sibling_visits: u64) -> f64;
}

/// Linear weighted-sum strategy: `wins*w + losses*l + draws*d`, floored at 1
/// so that a state with only losses remains selectable, plus a visit-deficit
/// exploration bonus proportional to how far below the best-explored sibling
/// this candidate sits.
#[derive(Debug, Clone, Copy)]
pub struct LinearWeighting {
    pub wins_weight: f64,
    pub losses_weight: f64,
    pub draws_weight: f64,
    pub visit_deficit_weight: f64,
}

impl LinearWeighting {
    pub fn new(
        wins_weight: f64,
        losses_weight: f64,
        draws_weight: f64,
        visit_deficit_weight: f64,
    ) -> Self {
        LinearWeighting {
            wins_weight,
            losses_weight,
            draws_weight,
            visit_deficit_weight,
        }
    }
}

impl Default for LinearWeighting {
    /// The coefficients used by the reference simulations: wins 10, losses
    /// -10, draws 5, visit deficit 20.
    fn default() -> Self {
        LinearWeighting::new(10.0, -10.0, 5.0, 20.0)
    }
}

impl WeightingStrategy for LinearWeighting {
    fn weigh_outcomes(&self, record: &StateRecord) -> f64 {
        let score = self.wins_weight * record.wins as f64
            + self.losses_weight * record.losses as f64
            + self.draws_weight * record.draws as f64;
        score.max(1.0)
    }

    fn weigh_visits(&self, visits: u64, _min_sibling_visits: u64, max_sibling_visits: u64) -> f64 {
        (max_sibling_visits - visits) as f64 * self.visit_deficit_weight
    }
}

/// Win-rate strategy: `(wins + 1) / (visits + 1)`, no exploration bonus.
///
/// The +1 smoothing keeps unvisited states selectable and bounds the score
/// in (0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct WinRateWeighting;

impl WeightingStrategy for WinRateWeighting {
    fn weigh_outcomes(&self, record: &StateRecord) -> f64 {
        (record.wins + 1) as f64 / (record.visits() + 1) as f64
    }

    fn weigh_visits(&self, _visits: u64, _min: u64, _max: u64) -> f64 {
        0.0
    }
}

/// Adapter for caller-supplied closures, for strategies that do not warrant a
/// named type.
///
/// # Examples
///
/// ```
/// use tally::weights::{FnWeighting, WeightingStrategy};
/// use tally::record::StateRecord;
///
/// let flat = FnWeighting::new(|_: &StateRecord| 1.0, |_, _, _| 0.0);
/// assert_eq!(flat.weigh_outcomes(&StateRecord::default()), 1.0);
/// ```
pub struct FnWeighting<O, V> {
    outcomes: O,
    visits: V,
}

impl<O, V> FnWeighting<O, V>
where
    O: Fn(&StateRecord) -> f64,
    V: Fn(u64, u64, u64) -> f64,
{
    pub fn new(outcomes: O, visits: V) -> Self {
        FnWeighting { outcomes, visits }
    }
}

impl<O, V> WeightingStrategy for FnWeighting<O, V>
where
    O: Fn(&StateRecord) -> f64,
    V: Fn(u64, u64, u64) -> f64,
{
    fn weigh_outcomes(&self, record: &StateRecord) -> f64 {
        (self.outcomes)(record)
    }

    fn weigh_visits(&self, visits: u64, min_sibling_visits: u64, max_sibling_visits: u64) -> f64 {
        (self.visits)(visits, min_sibling_visits, max_sibling_visits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_weighting_floors_at_one() {
        let weighting = LinearWeighting::default();
        let all_losses = StateRecord::new(0, 12, 0);
        assert_eq!(weighting.weigh_outcomes(&all_losses), 1.0);
    }

    #[test]
    fn linear_weighting_scores_tally() {
        let weighting = LinearWeighting::default();
        let record = StateRecord::new(3, 1, 2);
        // 3*10 - 1*10 + 2*5 = 30
        assert_eq!(weighting.weigh_outcomes(&record), 30.0);
    }

    #[test]
    fn visit_deficit_favors_unexplored_siblings() {
        let weighting = LinearWeighting::new(10.0, -10.0, 5.0, 20.0);
        assert_eq!(weighting.weigh_visits(0, 0, 5), 100.0);
        assert_eq!(weighting.weigh_visits(5, 0, 5), 0.0);
    }

    #[test]
    fn win_rate_smooths_unvisited_states() {
        let weighting = WinRateWeighting;
        assert_eq!(weighting.weigh_outcomes(&StateRecord::default()), 1.0);

        let record = StateRecord::new(1, 2, 0);
        assert!((weighting.weigh_outcomes(&record) - 0.5).abs() < 1e-12);
    }
}
