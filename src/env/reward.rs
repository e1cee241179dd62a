//! Reward policy.
//!
//! Branch order is fixed: a seat that has not lost earns the survival
//! reward; a seat that lost earns the bonus only when its opponent lost too;
//! any other loss earns nothing. A clean win therefore only ever shows up
//! as survival.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rules::Engine;

/// Per-step reward for one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardSignal {
    /// The seat has lost and its opponent has not.
    Lost,
    /// The seat has not lost.
    Survived,
    /// The seat has lost, and so has its opponent.
    OpponentLost,
}

impl RewardSignal {
    /// Every value a reward can take.
    pub const VALUES: [i32; 3] = [0, 1, 100];

    /// Evaluate the policy for `player`.
    pub fn for_player<E: Engine>(engine: &E, player: PlayerId) -> Self {
        if !engine.has_lost(player) {
            RewardSignal::Survived
        } else if engine.has_lost(player.opponent()) {
            RewardSignal::OpponentLost
        } else {
            RewardSignal::Lost
        }
    }

    /// Scalar value reported to the learner.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            RewardSignal::Lost => 0,
            RewardSignal::Survived => 1,
            RewardSignal::OpponentLost => 100,
        }
    }
}

impl From<RewardSignal> for i32 {
    fn from(signal: RewardSignal) -> Self {
        signal.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_in_reward_set() {
        for signal in [RewardSignal::Lost, RewardSignal::Survived, RewardSignal::OpponentLost] {
            assert!(RewardSignal::VALUES.contains(&signal.value()));
        }
        assert_eq!(i32::from(RewardSignal::OpponentLost), 100);
    }
}
