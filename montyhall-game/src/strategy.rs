use serde::{Deserialize, Serialize};
use std::fmt;

/// What the contestant does once the host has opened a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Change to the other closed door.
    Switch,
    /// Stay with the first pick.
    Keep,
}

impl Strategy {
    /// Both strategies in reporting order.
    pub const ALL: [Self; 2] = [Self::Switch, Self::Keep];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Keep => "keep",
        }
    }

    /// Strategy played by 1-based trial `index` in an interleaved run:
    /// even indices switch, odd indices keep.
    #[must_use]
    pub const fn for_trial_index(index: u64) -> Self {
        if index % 2 == 0 { Self::Switch } else { Self::Keep }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
