//! Configuration and game-structure identifiers.
//!
//! - `ZoneId`: names every zone of a duel (per-seat and shared)
//! - `Phase`: turn structure
//! - `EnvConfig`: environment settings, loadable from JSON

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerId;

/// Zone identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneId {
    /// Undrawn cards (ordered, top = last).
    Library(PlayerId),
    /// Cards in hand (ordered by arrival).
    Hand(PlayerId),
    /// Discarded and dead cards (ordered, top = last).
    Graveyard(PlayerId),
    /// Permanents of both seats.
    Battlefield,
    /// Spells waiting to resolve (top = last).
    Stack,
}

impl ZoneId {
    /// The seat owning this zone, `None` for shared zones.
    #[must_use]
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            ZoneId::Library(p) | ZoneId::Hand(p) | ZoneId::Graveyard(p) => Some(p),
            ZoneId::Battlefield | ZoneId::Stack => None,
        }
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneId::Library(p) => write!(f, "{p} library"),
            ZoneId::Hand(p) => write!(f, "{p} hand"),
            ZoneId::Graveyard(p) => write!(f, "{p} graveyard"),
            ZoneId::Battlefield => write!(f, "battlefield"),
            ZoneId::Stack => write!(f, "stack"),
        }
    }
}

/// Steps of a turn, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    #[default]
    Untap = 0,
    Upkeep = 1,
    Draw = 2,
    PrecombatMain = 3,
    DeclareAttackers = 4,
    DeclareBlockers = 5,
    CombatDamage = 6,
    PostcombatMain = 7,
    End = 8,
    Cleanup = 9,
}

impl Phase {
    /// Number of distinct phases.
    pub const COUNT: usize = 10;

    /// Numeric identifier, `0..Phase::COUNT`.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// The phase that follows this one. Cleanup wraps to Untap.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Untap => Phase::Upkeep,
            Phase::Upkeep => Phase::Draw,
            Phase::Draw => Phase::PrecombatMain,
            Phase::PrecombatMain => Phase::DeclareAttackers,
            Phase::DeclareAttackers => Phase::DeclareBlockers,
            Phase::DeclareBlockers => Phase::CombatDamage,
            Phase::CombatDamage => Phase::PostcombatMain,
            Phase::PostcombatMain => Phase::End,
            Phase::End => Phase::Cleanup,
            Phase::Cleanup => Phase::Untap,
        }
    }

    /// Main phases allow sorcery-speed plays.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::PrecombatMain | Phase::PostcombatMain)
    }

    /// Phases in which a seat holds priority. The rest run automatically.
    #[must_use]
    pub const fn has_priority(self) -> bool {
        matches!(
            self,
            Phase::PrecombatMain
                | Phase::DeclareAttackers
                | Phase::DeclareBlockers
                | Phase::PostcombatMain
                | Phase::End
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Untap => "untap",
            Phase::Upkeep => "upkeep",
            Phase::Draw => "draw",
            Phase::PrecombatMain => "precombat main",
            Phase::DeclareAttackers => "declare attackers",
            Phase::DeclareBlockers => "declare blockers",
            Phase::CombatDamage => "combat damage",
            Phase::PostcombatMain => "postcombat main",
            Phase::End => "end",
            Phase::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Environment configuration.
///
/// Capacities (`max_*`) do not limit the game; they fix the bounds of the
/// static observation space and the normalization of feature vectors.
///
/// ```
/// use ccg_gym::core::EnvConfig;
///
/// let config = EnvConfig::from_json_str(r#"{ "seed": 7, "starting_life": 10 }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.starting_life, 10);
/// assert_eq!(config.opening_hand_size, 7);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Base seed; episode seeds are derived from it.
    pub seed: u64,

    /// Life each seat starts with.
    pub starting_life: i32,

    /// Cards drawn before the first turn.
    pub opening_hand_size: usize,

    /// Hand size enforced at cleanup.
    pub max_hand_size: usize,

    /// Upper life bound for observations.
    pub max_life: i32,

    /// Upper bound for per-seat zone sizes in observations.
    pub max_zone_size: usize,

    /// Upper bound for shared-zone sizes in observations.
    pub max_battlefield: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_life: 20,
            opening_hand_size: 7,
            max_hand_size: 7,
            max_life: 40,
            max_zone_size: 60,
            max_battlefield: 40,
        }
    }
}

impl EnvConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_life <= 0 {
            return Err(ConfigError::Invalid {
                field: "starting_life",
                reason: "must be positive",
            });
        }
        if self.max_hand_size == 0 {
            return Err(ConfigError::Invalid {
                field: "max_hand_size",
                reason: "must be at least 1",
            });
        }
        if self.max_life < self.starting_life {
            return Err(ConfigError::Invalid {
                field: "max_life",
                reason: "must be at least starting_life",
            });
        }
        if self.max_zone_size == 0 || self.max_battlefield == 0 {
            return Err(ConfigError::Invalid {
                field: "max_zone_size",
                reason: "capacities must be positive",
            });
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }
}
