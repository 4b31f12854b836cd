pub mod experiments;
pub mod reports;
pub mod seeds;

pub use experiments::{ExperimentPlan, run_plan};
pub use seeds::resolve_seed_inputs;
