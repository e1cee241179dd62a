//! # ccg-gym
//!
//! A turn-alternating reinforcement-learning environment over a two-seat
//! card duel.
//!
//! ## Design Principles
//!
//! 1. **Strict alternation**: the environment reports to seat 0, then seat
//!    1, then seat 0, on every step, whoever holds priority. A seat without
//!    priority gets a one-action space and its action is ignored.
//!
//! 2. **Engine behind a trait**: the environment only talks to the
//!    [`Engine`] boundary. The shipped [`Duel`] is one implementation;
//!    tests drive scripted ones.
//!
//! 3. **Nothing partial**: a rejected action leaves the game exactly as it
//!    was.
//!
//! ## Architecture
//!
//! - **Deterministic**: every shuffle goes through a ChaCha8 `GameRng`
//!   seeded per episode, so a seed replays an episode exactly.
//!
//! - **Persistent Data Structures**: zones and move history use `im-rs` so
//!   engine snapshots clone cheaply.
//!
//! ## Modules
//!
//! - `core`: Seats, entities, moves, phases, RNG, configuration, state
//! - `zones`: Card locations
//! - `cards`: Card definitions and instances
//! - `decks`: Deck provider and the core-set decks
//! - `rules`: Engine trait and errors
//! - `stack`: Priority and the spell stack
//! - `games`: The duel engine
//! - `env`: The RL adapter: spaces, observations, rewards, rendering
//! - `training`: Trajectories and rollouts

pub mod cards;
pub mod core;
pub mod decks;
pub mod env;
pub mod games;
pub mod rules;
pub mod stack;
pub mod training;
pub mod zones;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    DamageTarget, EntityId, EnvConfig, GameRng, GameState, Move, MoveRecord, Phase, PlayerId,
    PlayerMap, ZoneId,
};

pub use crate::zones::{ZoneManager, ZonePosition};

pub use crate::cards::{CardDefinition, CardId, CardInstance, CardKind, CardRegistry};

pub use crate::decks::{CoreSetDecks, DeckProvider, Decklist};

pub use crate::rules::{Engine, EngineError, GameResult, PlayerView};

pub use crate::stack::{PassOutcome, PriorityStack, StackEntry};

pub use crate::games::duel::Duel;

pub use crate::env::{
    CardGameEnv, EnvError, Observation, RenderMode, RewardSignal, Space, StepInfo, StepResult,
};

pub use crate::training::{rollout, random_policy, Trajectory, Transition};
