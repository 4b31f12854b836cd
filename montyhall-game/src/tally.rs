use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;
use crate::numbers::percentage;

/// Running (wins, total) counters for one strategy.
///
/// `wins <= total` always holds; deserialization rejects documents that
/// break it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTally")]
pub struct Tally {
    wins: u64,
    total: u64,
}

#[derive(Deserialize)]
struct RawTally {
    wins: u64,
    total: u64,
}

impl TryFrom<RawTally> for Tally {
    type Error = ExperimentError;

    fn try_from(raw: RawTally) -> Result<Self, Self::Error> {
        Self::from_counts(raw.wins, raw.total)
    }
}

impl Tally {
    #[must_use]
    pub const fn new() -> Self {
        Self { wins: 0, total: 0 }
    }

    /// Rebuild a tally from stored counts.
    ///
    /// # Errors
    ///
    /// Returns [`ExperimentError::WinsExceedTotal`] when `wins > total`.
    pub fn from_counts(wins: u64, total: u64) -> Result<Self, ExperimentError> {
        if wins > total {
            return Err(ExperimentError::WinsExceedTotal { wins, total });
        }
        Ok(Self { wins, total })
    }

    #[must_use]
    pub const fn wins(&self) -> u64 {
        self.wins
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Fold one outcome into the counters.
    pub fn record(&mut self, won: bool) {
        self.total += 1;
        if won {
            self.wins += 1;
        }
    }

    /// By-value form of [`Tally::record`] for use in `fold`.
    #[must_use]
    pub fn with_outcome(mut self, won: bool) -> Self {
        self.record(won);
        self
    }

    /// Combine counts gathered separately. Order of merging does not matter.
    pub fn merge(&mut self, other: &Self) {
        self.wins += other.wins;
        self.total += other.total;
    }

    #[must_use]
    pub const fn losses(&self) -> u64 {
        self.total.saturating_sub(self.wins)
    }

    /// Wins as a percentage of total, undefined for an empty tally.
    #[must_use]
    pub fn win_percentage(&self) -> Option<f64> {
        percentage(self.wins, self.total)
    }
}
