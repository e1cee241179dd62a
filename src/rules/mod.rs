//! Rules engine boundary.
//!
//! Engines implement `Engine` to define:
//! - Legal moves for the seat holding priority
//! - How moves modify state
//! - Win/loss conditions
//!
//! The environment calls into `Engine` but never interprets card-game
//! concepts directly.

pub mod engine;

pub use engine::{Engine, EngineError, GameResult, PlayerView};
