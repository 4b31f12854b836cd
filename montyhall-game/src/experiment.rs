//! One full experiment: both strategies under a single aggregation style.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::aggregate::{aggregate, aggregate_sequential, ensure_trial_count, run_interleaved};
use crate::error::ExperimentError;
use crate::numbers::micros_to_millis;
use crate::rng::{RngStreams, entropy_seed};
use crate::strategy::Strategy;
use crate::tally::Tally;

/// Default number of trials per strategy.
pub const DEFAULT_TRIAL_COUNT: u64 = 10_000;

/// How the trials of an experiment are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStyle {
    /// Two separate passes, each a map/fold over counted trial indices.
    #[default]
    Declarative,
    /// Two separate passes, each a plain loop.
    Sequential,
    /// One combined loop alternating strategy by index parity.
    Interleaved,
}

impl ExperimentStyle {
    pub const ALL: [Self; 3] = [Self::Interleaved, Self::Declarative, Self::Sequential];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Declarative => "declarative",
            Self::Sequential => "sequential",
            Self::Interleaved => "interleaved",
        }
    }
}

impl fmt::Display for ExperimentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperimentStyle {
    type Err = ExperimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declarative" | "pipeline" => Ok(Self::Declarative),
            "sequential" | "loop" => Ok(Self::Sequential),
            "interleaved" | "imperative" => Ok(Self::Interleaved),
            _ => Err(ExperimentError::UnknownStyle {
                value: s.to_string(),
            }),
        }
    }
}

/// Inputs for a single experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Trials played per strategy.
    #[serde(default = "ExperimentConfig::default_trial_count")]
    pub trial_count: u64,
    /// Seed for the random streams; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub style: ExperimentStyle,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trial_count: Self::default_trial_count(),
            seed: None,
            style: ExperimentStyle::default(),
        }
    }
}

impl ExperimentConfig {
    const fn default_trial_count() -> u64 {
        DEFAULT_TRIAL_COUNT
    }

    /// Parse a JSON config document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ExperimentError::InvalidConfig`] for malformed JSON and
    /// [`ExperimentError::InvalidTrialCount`] for a zero trial count.
    pub fn from_json(raw: &str) -> Result<Self, ExperimentError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ExperimentError::InvalidConfig {
                reason: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ExperimentError::InvalidTrialCount`] when `trial_count` is zero.
    pub fn validate(&self) -> Result<(), ExperimentError> {
        ensure_trial_count(self.trial_count).map(|_| ())
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: ExperimentStyle) -> Self {
        self.style = style;
        self
    }
}

/// Final counts for one strategy, plus what its pass cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub wins: u64,
    pub losses: u64,
    pub total: u64,
    /// `None` only for an empty tally, which validation rules out.
    pub win_pct: Option<f64>,
    /// Random draws the pass consumed. Interleaved outcomes share one pass,
    /// so both carry its totals.
    pub draws: u64,
    pub elapsed_ms: f64,
}

impl StrategyOutcome {
    #[must_use]
    pub fn from_tally(strategy: Strategy, tally: &Tally, cost: PassCost) -> Self {
        Self {
            strategy,
            wins: tally.wins(),
            losses: tally.losses(),
            total: tally.total(),
            win_pct: tally.win_percentage(),
            draws: cost.draws,
            elapsed_ms: cost.elapsed_ms,
        }
    }
}

/// Draws and wall time spent by one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassCost {
    pub draws: u64,
    pub elapsed_ms: f64,
}

impl PassCost {
    fn since(started: Instant, draws: u64) -> Self {
        Self {
            draws,
            elapsed_ms: micros_to_millis(started.elapsed().as_micros()),
        }
    }
}

/// Everything the results sink receives for one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub style: ExperimentStyle,
    pub seed: u64,
    pub trial_count: u64,
    pub outcomes: Vec<StrategyOutcome>,
    /// Random draws consumed across all streams.
    pub draws: u64,
    pub elapsed_ms: f64,
    pub finished_at: DateTime<Utc>,
}

impl ExperimentReport {
    #[must_use]
    pub fn outcome(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }
}

/// Run both strategies under `config.style`.
///
/// # Errors
///
/// Returns [`ExperimentError::InvalidTrialCount`] before drawing anything if
/// `config.trial_count` is zero.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport, ExperimentError> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(entropy_seed);
    let mut streams = RngStreams::from_user_seed(seed);
    let started = Instant::now();
    log::debug!(
        "starting {} experiment: seed {seed}, {} trials per strategy",
        config.style,
        config.trial_count
    );

    let (outcomes, draws): (Vec<StrategyOutcome>, u64) = match config.style {
        ExperimentStyle::Interleaved => {
            let rng = streams.interleaved();
            let pass_started = Instant::now();
            let tallies = run_interleaved(config.trial_count, rng)?;
            let cost = PassCost::since(pass_started, rng.draws());
            let outcomes = Strategy::ALL
                .into_iter()
                .map(|strategy| StrategyOutcome::from_tally(strategy, tallies.get(strategy), cost))
                .collect();
            (outcomes, cost.draws)
        }
        ExperimentStyle::Declarative | ExperimentStyle::Sequential => {
            let mut outcomes = Vec::with_capacity(Strategy::ALL.len());
            let mut draws = 0u64;
            for strategy in Strategy::ALL {
                let rng = streams.strategy(strategy);
                let pass_started = Instant::now();
                let tally = if config.style == ExperimentStyle::Declarative {
                    aggregate(strategy, config.trial_count, rng)?
                } else {
                    aggregate_sequential(strategy, config.trial_count, rng)?
                };
                let cost = PassCost::since(pass_started, rng.draws());
                draws = draws.saturating_add(cost.draws);
                outcomes.push(StrategyOutcome::from_tally(strategy, &tally, cost));
            }
            (outcomes, draws)
        }
    };

    let elapsed_ms = micros_to_millis(started.elapsed().as_micros());
    log::debug!("{} experiment finished in {elapsed_ms:.3} ms", config.style);

    Ok(ExperimentReport {
        style: config.style,
        seed,
        trial_count: config.trial_count,
        outcomes,
        draws,
        elapsed_ms,
        finished_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(report: &ExperimentReport) -> Vec<(Strategy, u64, u64, u64)> {
        report
            .outcomes
            .iter()
            .map(|o| (o.strategy, o.wins, o.total, o.draws))
            .collect()
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config = ExperimentConfig::from_json("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
        assert_eq!(config.trial_count, DEFAULT_TRIAL_COUNT);

        let raw = r#"{"trial_count": 250, "seed": 9, "style": "interleaved"}"#;
        let config = ExperimentConfig::from_json(raw).unwrap();
        assert_eq!(config.trial_count, 250);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.style, ExperimentStyle::Interleaved);
    }

    #[test]
    fn config_rejects_zero_trials_and_bad_json() {
        assert_eq!(
            ExperimentConfig::from_json(r#"{"trial_count": 0}"#),
            Err(ExperimentError::InvalidTrialCount { count: 0 })
        );
        assert!(matches!(
            ExperimentConfig::from_json("{"),
            Err(ExperimentError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn config_rejects_misspelled_fields() {
        let err = ExperimentConfig::from_json(r#"{"trials": 5}"#).unwrap_err();
        match err {
            ExperimentError::InvalidConfig { reason } => {
                assert!(reason.contains("unknown field `trials`"), "{reason}");
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn style_parses_aliases() {
        assert_eq!(
            "Imperative".parse::<ExperimentStyle>().unwrap(),
            ExperimentStyle::Interleaved
        );
        assert_eq!(
            "pipeline".parse::<ExperimentStyle>().unwrap(),
            ExperimentStyle::Declarative
        );
        assert!("parallel".parse::<ExperimentStyle>().is_err());
    }

    #[test]
    fn zero_trial_experiment_fails_before_running() {
        let config = ExperimentConfig {
            trial_count: 0,
            ..ExperimentConfig::default()
        };
        assert_eq!(
            run_experiment(&config),
            Err(ExperimentError::InvalidTrialCount { count: 0 })
        );
    }

    #[test]
    fn report_carries_both_strategies_and_seed() {
        for style in ExperimentStyle::ALL {
            let config = ExperimentConfig {
                trial_count: 300,
                ..ExperimentConfig::default()
            }
            .with_seed(42)
            .with_style(style);
            let report = run_experiment(&config).unwrap();
            assert_eq!(report.seed, 42);
            assert_eq!(report.style, style);
            assert!(report.draws > 0);
            for strategy in Strategy::ALL {
                let outcome = report.outcome(strategy).unwrap();
                assert_eq!(outcome.total, 300);
                assert_eq!(outcome.wins + outcome.losses, outcome.total);
                assert!(outcome.win_pct.is_some());
            }
        }
    }

    #[test]
    fn each_outcome_carries_its_own_pass_cost() {
        for style in ExperimentStyle::ALL {
            let config = ExperimentConfig {
                trial_count: 200,
                ..ExperimentConfig::default()
            }
            .with_seed(11)
            .with_style(style);
            let report = run_experiment(&config).unwrap();
            let switch = report.outcome(Strategy::Switch).unwrap();
            let keep = report.outcome(Strategy::Keep).unwrap();
            for outcome in [switch, keep] {
                assert!(outcome.draws > 0, "{style} {} drew nothing", outcome.strategy);
                assert!(outcome.elapsed_ms >= 0.0);
            }
            if style == ExperimentStyle::Interleaved {
                assert_eq!(switch.draws, report.draws);
                assert_eq!(keep.draws, report.draws);
            } else {
                assert_eq!(switch.draws + keep.draws, report.draws);
            }
        }
    }

    #[test]
    fn unseeded_runs_record_the_seed_they_used() {
        let config = ExperimentConfig {
            trial_count: 50,
            ..ExperimentConfig::default()
        };
        let first = run_experiment(&config).unwrap();
        let replay = run_experiment(&config.with_seed(first.seed)).unwrap();
        assert_eq!(counts(&first), counts(&replay));
    }
}
