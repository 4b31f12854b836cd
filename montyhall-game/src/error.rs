use thiserror::Error;

/// Errors raised when an experiment is configured or fed invalid input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    #[error("trial count must be at least 1 (got {count})")]
    InvalidTrialCount { count: u64 },
    #[error("tally wins ({wins}) exceed total ({total})")]
    WinsExceedTotal { wins: u64, total: u64 },
    #[error("door must be 1, 2 or 3 (got {value})")]
    DoorOutOfRange { value: u8 },
    #[error("invalid experiment config: {reason}")]
    InvalidConfig { reason: String },
    #[error("unknown experiment style '{value}' (expected declarative, sequential or interleaved)")]
    UnknownStyle { value: String },
}
