//! Move selection: weigh every candidate next state and draw one at random
//! in proportion to its weight.

use rand::{Rng, distr::StandardUniform};

use crate::{
    Result,
    error::Error,
    ports::{GameRules, RecordStore},
    record::StateRecord,
    weights::WeightingStrategy,
};

/// Compute the sampling weight for every candidate state.
///
/// Each candidate is hashed for the acting player, its record looked up
/// (absent means a zero tally), and scored as
/// `weigh_outcomes(record) + weigh_visits(visits, min, max)` where min/max
/// are the visit-count extremes across the whole candidate set. Absent
/// candidates contribute zero visits to that range, so an entirely
/// unexplored set yields min = max = 0.
///
/// # Errors
///
/// Returns [`Error::NoAvailableStates`] for an empty candidate set and
/// [`Error::InvalidWeight`] if the strategy produces a NaN, infinite, or
/// negative combined weight.
pub fn candidate_weights<G, S, W>(
    rules: &G,
    store: &S,
    weighting: &W,
    player: usize,
    candidates: &[G::State],
) -> Result<Vec<f64>>
where
    G: GameRules,
    S: RecordStore<G::Hash>,
    W: WeightingStrategy,
{
    if candidates.is_empty() {
        return Err(Error::NoAvailableStates { player });
    }

    let records: Vec<StateRecord> = candidates
        .iter()
        .map(|candidate| {
            let hash = rules.hash_state(player, candidate);
            store.get_record(&hash).unwrap_or_default()
        })
        .collect();

    let mut min_visits = u64::MAX;
    let mut max_visits = 0;
    for record in &records {
        let visits = record.visits();
        min_visits = min_visits.min(visits);
        max_visits = max_visits.max(visits);
    }

    let mut weights = Vec::with_capacity(records.len());
    for record in &records {
        let weight = weighting.weigh_outcomes(record)
            + weighting.weigh_visits(record.visits(), min_visits, max_visits);
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { value: weight });
        }
        weights.push(weight);
    }

    Ok(weights)
}

/// Select the index of the next state for `player` from `candidates`.
///
/// This is a single weighted draw; an unresolvable draw (all weights zero)
/// is surfaced as an error rather than silently falling back to uniform
/// sampling, which would mask a weighting-strategy bug. No retries.
pub fn select_next_state<G, S, W, R>(
    rules: &G,
    store: &S,
    weighting: &W,
    player: usize,
    candidates: &[G::State],
    rng: &mut R,
) -> Result<usize>
where
    G: GameRules,
    S: RecordStore<G::Hash>,
    W: WeightingStrategy,
    R: Rng,
{
    let weights = candidate_weights(rules, store, weighting, player, candidates)?;
    weighted_index(rng, &weights)
}

/// Draw an index with probability proportional to its weight.
///
/// Uses a cumulative-weight table and binary search. Weights need not be
/// normalized; individual zeros are fine as long as the total is positive.
///
/// # Errors
///
/// Returns [`Error::SamplingExhausted`] if the slice is empty or the total
/// weight is not strictly positive, and [`Error::InvalidWeight`] for NaN,
/// infinite, or negative entries.
pub fn weighted_index<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize> {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for &weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { value: weight });
        }
        total += weight;
        cumulative.push(total);
    }

    if total <= 0.0 {
        return Err(Error::SamplingExhausted {
            candidates: weights.len(),
        });
    }

    let ticket = rng.sample::<f64, _>(StandardUniform) * total;
    let index = cumulative.partition_point(|&bound| bound <= ticket);
    if index < weights.len() && weights[index] > 0.0 {
        return Ok(index);
    }

    // Floating-point rounding (or a cumulative total saturating to infinity)
    // can push the ticket past every bound; resolve to the last candidate
    // with strictly positive weight instead of whatever trails the table.
    weights
        .iter()
        .rposition(|&weight| weight > 0.0)
        .ok_or(Error::SamplingExhausted {
            candidates: weights.len(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn weighted_index_rejects_empty_and_zero_totals() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            weighted_index(&mut rng, &[]),
            Err(Error::SamplingExhausted { candidates: 0 })
        ));
        assert!(matches!(
            weighted_index(&mut rng, &[0.0, 0.0]),
            Err(Error::SamplingExhausted { candidates: 2 })
        ));
    }

    #[test]
    fn weighted_index_rejects_malformed_weights() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            weighted_index(&mut rng, &[1.0, f64::NAN]),
            Err(Error::InvalidWeight { .. })
        ));
        assert!(matches!(
            weighted_index(&mut rng, &[1.0, -0.5]),
            Err(Error::InvalidWeight { .. })
        ));
    }

    #[test]
    fn weighted_index_never_picks_zero_weight_entries() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let index = weighted_index(&mut rng, &[0.0, 3.0, 0.0]).unwrap();
            assert_eq!(index, 1);
        }
    }

    #[test]
    fn boundary_tickets_never_land_on_trailing_zero_weights() {
        // Weights whose cumulative total saturates to infinity send every
        // ticket past the last finite bound; the draw must still resolve to
        // a positively-weighted candidate, not the trailing zero.
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..200 {
            let index = weighted_index(&mut rng, &[f64::MAX, f64::MAX, 0.0]).unwrap();
            assert!(
                index < 2,
                "selected the zero-weight candidate at index {index}"
            );
        }
    }

    #[test]
    fn weighted_index_is_unbiased_for_equal_weights() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = HashMap::new();
        let draws = 20_000;
        for _ in 0..draws {
            let index = weighted_index(&mut rng, &[1.0, 1.0]).unwrap();
            *counts.entry(index).or_insert(0u32) += 1;
        }

        let first = *counts.get(&0).unwrap_or(&0) as f64 / draws as f64;
        assert!(
            (first - 0.5).abs() < 0.02,
            "expected ~0.5 selection frequency, got {first}"
        );
    }

    #[test]
    fn weighted_index_follows_the_weights() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0u32; 3];
        for _ in 0..30_000 {
            counts[weighted_index(&mut rng, &[1.0, 2.0, 1.0]).unwrap()] += 1;
        }

        let middle = counts[1] as f64 / 30_000.0;
        assert!(
            (middle - 0.5).abs() < 0.02,
            "expected ~0.5 for the doubled weight, got {middle}"
        );
    }
}
