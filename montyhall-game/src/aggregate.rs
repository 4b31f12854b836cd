//! Outcome aggregation over many independent trials.
//!
//! Three passes produce the same kind of tally:
//! - [`aggregate`] folds a counted iterator of trials (declarative pipeline).
//! - [`aggregate_sequential`] runs a plain loop with a local accumulator.
//! - [`run_interleaved`] plays both strategies in one loop, alternating by
//!   trial-index parity.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ExperimentError;
use crate::strategy::Strategy;
use crate::tally::Tally;
use crate::trial::run_trial;

/// Reject empty runs before any percentage can be taken.
///
/// # Errors
///
/// Returns [`ExperimentError::InvalidTrialCount`] when `trial_count` is zero.
pub fn ensure_trial_count(trial_count: u64) -> Result<u64, ExperimentError> {
    if trial_count == 0 {
        Err(ExperimentError::InvalidTrialCount { count: trial_count })
    } else {
        Ok(trial_count)
    }
}

/// Run `trial_count` trials of `strategy` as a map/fold pipeline.
///
/// # Errors
///
/// Returns [`ExperimentError::InvalidTrialCount`] when `trial_count` is zero.
pub fn aggregate<R: Rng + ?Sized>(
    strategy: Strategy,
    trial_count: u64,
    rng: &mut R,
) -> Result<Tally, ExperimentError> {
    let trial_count = ensure_trial_count(trial_count)?;
    let started = Instant::now();
    log::debug!("pipeline pass: {trial_count} trials using the {strategy} strategy");

    let tally = (1..=trial_count)
        .map(|_| run_trial(strategy, &mut *rng))
        .fold(Tally::new(), Tally::with_outcome);

    log::debug!(
        "pipeline pass finished: {strategy} wins/total {}/{} in {:?}",
        tally.wins(),
        tally.total(),
        started.elapsed()
    );
    Ok(tally)
}

/// Run `trial_count` trials of `strategy` in a plain counted loop.
///
/// # Errors
///
/// Returns [`ExperimentError::InvalidTrialCount`] when `trial_count` is zero.
pub fn aggregate_sequential<R: Rng + ?Sized>(
    strategy: Strategy,
    trial_count: u64,
    rng: &mut R,
) -> Result<Tally, ExperimentError> {
    let trial_count = ensure_trial_count(trial_count)?;
    let started = Instant::now();
    log::debug!("sequential pass: {trial_count} trials using the {strategy} strategy");

    let mut tally = Tally::new();
    for _ in 0..trial_count {
        tally.record(run_trial(strategy, rng));
    }

    log::debug!(
        "sequential pass finished: {strategy} wins/total {}/{} in {:?}",
        tally.wins(),
        tally.total(),
        started.elapsed()
    );
    Ok(tally)
}

/// Tallies for both strategies gathered in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTallies {
    pub switch: Tally,
    pub keep: Tally,
}

impl StrategyTallies {
    #[must_use]
    pub const fn get(&self, strategy: Strategy) -> &Tally {
        match strategy {
            Strategy::Switch => &self.switch,
            Strategy::Keep => &self.keep,
        }
    }

    pub const fn get_mut(&mut self, strategy: Strategy) -> &mut Tally {
        match strategy {
            Strategy::Switch => &mut self.switch,
            Strategy::Keep => &mut self.keep,
        }
    }
}

/// Play `2 * trial_count` rounds in one loop: even 1-based indices switch,
/// odd indices keep, so each strategy ends with exactly `trial_count` trials.
///
/// # Errors
///
/// Returns [`ExperimentError::InvalidTrialCount`] when `trial_count` is zero
/// or when `2 * trial_count` does not fit in a `u64`.
pub fn run_interleaved<R: Rng + ?Sized>(
    trial_count: u64,
    rng: &mut R,
) -> Result<StrategyTallies, ExperimentError> {
    let trial_count = ensure_trial_count(trial_count)?;
    let combined = trial_count
        .checked_mul(2)
        .ok_or(ExperimentError::InvalidTrialCount { count: trial_count })?;
    let started = Instant::now();
    log::debug!("interleaved pass: {combined} trials alternating switch and keep");

    let mut tallies = StrategyTallies::default();
    for index in 1..=combined {
        let strategy = Strategy::for_trial_index(index);
        tallies.get_mut(strategy).record(run_trial(strategy, rng));
    }

    log::debug!(
        "interleaved pass finished in {:?}: switch {}/{} keep {}/{}",
        started.elapsed(),
        tallies.switch.wins(),
        tallies.switch.total(),
        tallies.keep.wins(),
        tallies.keep.total()
    );
    Ok(tallies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn zero_trials_is_rejected_by_every_pass() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let expected = Err(ExperimentError::InvalidTrialCount { count: 0 });
        assert_eq!(aggregate(Strategy::Switch, 0, &mut rng), expected);
        assert_eq!(aggregate_sequential(Strategy::Keep, 0, &mut rng), expected);
        assert_eq!(
            run_interleaved(0, &mut rng),
            Err(ExperimentError::InvalidTrialCount { count: 0 })
        );
    }

    #[test]
    fn single_trial_reports_total_of_one() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for strategy in Strategy::ALL {
            let tally = aggregate(strategy, 1, &mut rng).unwrap();
            assert_eq!(tally.total(), 1);
            assert!(tally.wins() <= 1);

            let tally = aggregate_sequential(strategy, 1, &mut rng).unwrap();
            assert_eq!(tally.total(), 1);
            assert!(tally.wins() <= 1);
        }
    }

    #[test]
    fn pipeline_and_loop_agree_on_identical_draws() {
        for strategy in Strategy::ALL {
            let mut a = ChaCha20Rng::seed_from_u64(2024);
            let mut b = ChaCha20Rng::seed_from_u64(2024);
            assert_eq!(
                aggregate(strategy, 5_000, &mut a).unwrap(),
                aggregate_sequential(strategy, 5_000, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn interleaved_gives_each_strategy_the_full_count() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let tallies = run_interleaved(1_000, &mut rng).unwrap();
        assert_eq!(tallies.switch.total(), 1_000);
        assert_eq!(tallies.keep.total(), 1_000);
        assert!(tallies.switch.wins() <= tallies.switch.total());
        assert!(tallies.keep.wins() <= tallies.keep.total());
    }

    #[test]
    fn interleaved_rejects_counts_whose_double_overflows() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let count = u64::MAX / 2 + 1;
        assert_eq!(
            run_interleaved(count, &mut rng),
            Err(ExperimentError::InvalidTrialCount { count })
        );
    }

    #[test]
    fn wins_never_exceed_total() {
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        for trial_count in [1, 2, 3, 10, 250] {
            for strategy in Strategy::ALL {
                let tally = aggregate(strategy, trial_count, &mut rng).unwrap();
                assert_eq!(tally.total(), trial_count);
                assert!(tally.wins() <= tally.total());
            }
        }
    }
}
