//! Doors and the host's elimination rule.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::error::ExperimentError;

/// Doors the host may open, stored inline. At most two remain after exclusion.
pub type DoorCandidates = SmallVec<[Door; 2]>;

/// One of the three doors on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Door {
    One,
    Two,
    Three,
}

impl Door {
    /// Every door in stage order.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// The 1-based label shown to contestants.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Draw a door uniformly from {1, 2, 3}.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Door {
    type Error = ExperimentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(ExperimentError::DoorOutOfRange { value }),
        }
    }
}

impl From<Door> for u8 {
    fn from(door: Door) -> Self {
        door.number()
    }
}

/// Doors that are neither `correct` nor `first_choice`.
///
/// One door when the contestant guessed wrong, two when they guessed right.
#[must_use]
pub fn elimination_candidates(correct: Door, first_choice: Door) -> DoorCandidates {
    Door::ALL
        .into_iter()
        .filter(|door| *door != correct && *door != first_choice)
        .collect()
}

/// Pick the door the host opens.
///
/// The choice is uniform over the doors hiding no prize that the contestant
/// did not pick, so the reveal carries no information about `correct` beyond
/// excluding it.
///
/// # Panics
///
/// Panics if no candidate door exists, which three doors and two exclusions
/// make impossible.
pub fn eliminate<R: Rng + ?Sized>(correct: Door, first_choice: Door, rng: &mut R) -> Door {
    let candidates = elimination_candidates(correct, first_choice);
    *candidates
        .choose(rng)
        .expect("two exclusions always leave a door to open")
}

/// The unique door that is neither `a` nor `b`, or `None` when `a == b`.
#[must_use]
pub fn remaining_door(a: Door, b: Door) -> Option<Door> {
    if a == b {
        return None;
    }
    Door::ALL.into_iter().find(|door| *door != a && *door != b)
}
