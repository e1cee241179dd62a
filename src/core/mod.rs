//! Core duel types: seats, entities, moves, RNG, configuration, state.
//!
//! These are the building blocks shared by the rules engine and the
//! environment adapter.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{DamageTarget, Move, MoveRecord};
pub use config::{ConfigError, EnvConfig, Phase, ZoneId};
pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap, SEAT_COUNT};
pub use rng::GameRng;
pub use state::{Combat, GameState, PlayerRecord};
