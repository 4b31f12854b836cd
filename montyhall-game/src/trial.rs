//! A single simulated game show round.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::door::{Door, eliminate, remaining_door};
use crate::strategy::Strategy;

/// Doors chosen during one round.
///
/// `eliminated` and `final_choice` are only filled for [`Strategy::Switch`];
/// keeping never needs the host's reveal to decide the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub strategy: Strategy,
    pub correct: Door,
    pub first_choice: Door,
    pub eliminated: Option<Door>,
    pub final_choice: Option<Door>,
}

impl Trial {
    /// Play one round with `strategy`, drawing the prize door and then the
    /// contestant's pick from `rng`.
    pub fn play<R: Rng + ?Sized>(strategy: Strategy, rng: &mut R) -> Self {
        let correct = Door::random(rng);
        let first_choice = Door::random(rng);
        Self::resolve(strategy, correct, first_choice, rng)
    }

    /// Finish a round whose prize door and first pick are already known.
    ///
    /// # Panics
    ///
    /// Panics if the host opens the contestant's door, which
    /// [`eliminate`] never does.
    pub fn resolve<R: Rng + ?Sized>(
        strategy: Strategy,
        correct: Door,
        first_choice: Door,
        rng: &mut R,
    ) -> Self {
        let (eliminated, final_choice) = match strategy {
            Strategy::Keep => (None, None),
            Strategy::Switch => {
                let eliminated = eliminate(correct, first_choice, rng);
                let final_choice = remaining_door(eliminated, first_choice)
                    .expect("host never opens the contestant's door");
                (Some(eliminated), Some(final_choice))
            }
        };
        Self {
            strategy,
            correct,
            first_choice,
            eliminated,
            final_choice,
        }
    }

    /// The door the contestant ends on.
    #[must_use]
    pub fn chosen_door(&self) -> Door {
        self.final_choice.unwrap_or(self.first_choice)
    }

    #[must_use]
    pub fn won(&self) -> bool {
        self.chosen_door() == self.correct
    }
}

/// Play one round and report whether the contestant won.
pub fn run_trial<R: Rng + ?Sized>(strategy: Strategy, rng: &mut R) -> bool {
    let trial = Trial::play(strategy, rng);
    log::trace!(
        "{} trial: correct {} first {} opened {:?} final {} -> {}",
        strategy,
        trial.correct,
        trial.first_choice,
        trial.eliminated.map(Door::number),
        trial.chosen_door(),
        if trial.won() { "win" } else { "loss" }
    );
    trial.won()
}
