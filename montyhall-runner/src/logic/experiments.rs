use anyhow::{Context, Result};
use montyhall_game::{ExperimentConfig, ExperimentReport, ExperimentStyle, run_experiment};

use super::seeds::SeedInfo;

/// Every experiment a single invocation will run.
#[derive(Debug, Clone)]
pub struct ExperimentPlan {
    pub trial_count: u64,
    pub styles: Vec<ExperimentStyle>,
    pub seeds: Vec<SeedInfo>,
}

impl ExperimentPlan {
    /// Number of experiments in the plan.
    #[must_use]
    pub fn experiment_count(&self) -> usize {
        self.styles.len() * self.seeds.len()
    }

    /// Configs in run order: seeds outermost, styles innermost.
    pub fn configs(&self) -> impl Iterator<Item = ExperimentConfig> + '_ {
        self.seeds.iter().flat_map(move |info| {
            self.styles.iter().map(move |style| ExperimentConfig {
                trial_count: self.trial_count,
                seed: Some(info.seed),
                style: *style,
            })
        })
    }
}

/// Run every experiment in `plan`, stopping at the first failure.
pub fn run_plan(plan: &ExperimentPlan) -> Result<Vec<ExperimentReport>> {
    let mut reports = Vec::with_capacity(plan.experiment_count());
    for config in plan.configs() {
        let seed = config.seed.unwrap_or_default();
        log::info!(
            "running {} experiment (seed {seed}, {} trials per strategy)",
            config.style,
            config.trial_count
        );
        let report = run_experiment(&config)
            .with_context(|| format!("{} experiment with seed {seed} failed", config.style))?;
        reports.push(report);
    }
    Ok(reports)
}
