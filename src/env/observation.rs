//! Observation builder.
//!
//! An [`Observation`] is a fresh sample of the engine's zone sizes and flags
//! from one seat's point of view. Nothing is cached between calls.
//!
//! Two space descriptors are offered:
//! - [`Observation::snapshot_space`]: the tightest space containing the
//!   current values (sizes change step to step)
//! - [`static_space`]: fixed bounds from [`EnvConfig`] capacities, for
//!   frameworks that need a declared shape
//!
//! [`Observation::to_features`] flattens into a fixed-width normalized vector
//! that matches the static space field for field.

use serde::{Deserialize, Serialize};

use crate::core::{EnvConfig, Phase, PlayerId};
use crate::rules::Engine;

use super::space::Space;

/// Field names, in feature order.
pub const FIELD_NAMES: [&str; Observation::FEATURE_COUNT] = [
    "life",
    "hand",
    "graveyard",
    "deck",
    "battlefield",
    "attackers",
    "blockers",
    "empty_stack",
    "damage_targets",
    "active_player",
    "nonactive_player",
    "priority",
    "current_phase",
];

/// One seat's view of the game at a single instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub life: i32,
    pub hand: usize,
    pub graveyard: usize,
    /// Undrawn cards left in this seat's library.
    pub deck: usize,
    /// Permanents of both seats.
    pub battlefield: usize,
    pub attackers: usize,
    pub blockers: usize,
    pub empty_stack: bool,
    pub damage_targets: usize,
    /// Whether it is this seat's turn.
    pub active_player: bool,
    pub nonactive_player: bool,
    /// Whether this seat holds priority.
    pub priority: bool,
    pub current_phase: Phase,
}

impl Observation {
    /// Width of [`Observation::to_features`].
    pub const FEATURE_COUNT: usize = 13;

    /// Sample the engine for `player`.
    pub fn build<E: Engine>(engine: &E, player: PlayerId) -> Self {
        let active = engine.active_player() == player;
        Self {
            life: engine.life(player),
            hand: engine.hand_size(player),
            graveyard: engine.graveyard_size(player),
            deck: engine.library_size(player),
            battlefield: engine.battlefield_size(),
            attackers: engine.attacker_count(),
            blockers: engine.blocker_count(),
            empty_stack: engine.stack_is_empty(),
            damage_targets: engine.damage_target_count(),
            active_player: active,
            nonactive_player: !active,
            priority: engine.priority_holder() == player,
            current_phase: engine.phase(),
        }
    }

    /// Smallest space that contains this observation.
    ///
    /// Size fields become `Discrete(size + 1)`, flags `Discrete(2)`, life a
    /// one-point bounded range.
    #[must_use]
    pub fn snapshot_space(&self) -> Space {
        let count = |n: usize| Space::Discrete { n: n + 1 };
        let flag = || Space::Discrete { n: 2 };
        let life = i64::from(self.life);

        dict([
            Space::Bounded { low: life, high: life },
            count(self.hand),
            count(self.graveyard),
            count(self.deck),
            count(self.battlefield),
            count(self.attackers),
            count(self.blockers),
            flag(),
            count(self.damage_targets),
            flag(),
            flag(),
            flag(),
            Space::Discrete { n: Phase::COUNT },
        ])
    }

    /// Raw integer values, in field order.
    #[must_use]
    pub fn values(&self) -> [i64; Self::FEATURE_COUNT] {
        let n = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        [
            i64::from(self.life),
            n(self.hand),
            n(self.graveyard),
            n(self.deck),
            n(self.battlefield),
            n(self.attackers),
            n(self.blockers),
            i64::from(self.empty_stack),
            n(self.damage_targets),
            i64::from(self.active_player),
            i64::from(self.nonactive_player),
            i64::from(self.priority),
            i64::from(self.current_phase.id()),
        ]
    }

    /// Normalized feature vector of width [`Observation::FEATURE_COUNT`].
    ///
    /// Every entry lies in `[0, 1]`. Values above the configured capacity
    /// saturate; negative life reads as zero.
    #[must_use]
    pub fn to_features(&self, config: &EnvConfig) -> Vec<f32> {
        let zone = config.max_zone_size as f32;
        let shared = config.max_battlefield as f32;
        let ratio = |v: usize, cap: f32| (v as f32 / cap).clamp(0.0, 1.0);
        let flag = |b: bool| if b { 1.0 } else { 0.0 };

        vec![
            (self.life as f32 / config.max_life as f32).clamp(0.0, 1.0),
            ratio(self.hand, zone),
            ratio(self.graveyard, zone),
            ratio(self.deck, zone),
            ratio(self.battlefield, shared),
            ratio(self.attackers, shared),
            ratio(self.blockers, shared),
            flag(self.empty_stack),
            ratio(self.damage_targets, shared + 2.0),
            flag(self.active_player),
            flag(self.nonactive_player),
            flag(self.priority),
            f32::from(self.current_phase.id()) / (Phase::COUNT - 1) as f32,
        ]
    }
}

/// Fixed observation space from the configured capacities.
#[must_use]
pub fn static_space(config: &EnvConfig) -> Space {
    let zone = Space::Discrete {
        n: config.max_zone_size + 1,
    };
    let shared = Space::Discrete {
        n: config.max_battlefield + 1,
    };
    let flag = Space::Discrete { n: 2 };
    let max_life = i64::from(config.max_life);

    dict([
        Space::Bounded {
            low: -max_life,
            high: max_life,
        },
        zone.clone(),
        zone.clone(),
        zone,
        shared.clone(),
        shared.clone(),
        shared,
        flag.clone(),
        Space::Discrete {
            n: config.max_battlefield + 3,
        },
        flag.clone(),
        flag.clone(),
        flag,
        Space::Discrete { n: Phase::COUNT },
    ])
}

fn dict(spaces: [Space; Observation::FEATURE_COUNT]) -> Space {
    Space::Dict(
        FIELD_NAMES
            .iter()
            .zip(spaces)
            .map(|(name, space)| ((*name).to_string(), space))
            .collect(),
    )
}
