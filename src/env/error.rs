//! Environment errors.

use thiserror::Error;

use crate::core::ConfigError;
use crate::rules::EngineError;

/// Caller-visible failures of the environment.
///
/// None of these leave the game partially modified: a rejected action is
/// rejected before anything is applied.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("action {action} is out of range: {legal} legal moves")]
    OutOfRangeAction { action: usize, legal: usize },

    #[error("unsupported render mode `{0}` (expected \"human\")")]
    InvalidRenderMode(String),

    #[error("environment is not initialized; call reset() first")]
    NotInitialized,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("render output failed: {0}")]
    Io(#[from] std::io::Error),
}
