//! Monty Hall Experiment Engine
//!
//! Estimates the win rates of switching and keeping by simulating many
//! independent game show rounds and tallying the outcomes. This crate holds
//! the statistical core without any presentation or platform concerns.

pub mod aggregate;
pub mod door;
pub mod error;
pub mod experiment;
pub mod numbers;
pub mod rng;
pub mod strategy;
pub mod tally;
pub mod trial;

// Re-export commonly used types
pub use aggregate::{
    StrategyTallies, aggregate, aggregate_sequential, ensure_trial_count, run_interleaved,
};
pub use door::{Door, DoorCandidates, eliminate, elimination_candidates, remaining_door};
pub use error::ExperimentError;
pub use experiment::{
    DEFAULT_TRIAL_COUNT, ExperimentConfig, ExperimentReport, ExperimentStyle, PassCost,
    StrategyOutcome, run_experiment,
};
pub use rng::{CountingRng, RngStreams, derive_stream_seed, entropy_seed};
pub use strategy::Strategy;
pub use tally::Tally;
pub use trial::{Trial, run_trial};
