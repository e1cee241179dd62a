//! Python bindings for the ccg-gym environment.
//!
//! Exposes the adapter with a gym-style surface for Python training loops.
//!
//! # Quick Start
//!
//! ```python
//! import ccg_gym
//!
//! env = ccg_gym.CardGameEnv(seed=42)
//! obs = env.reset()
//! done = False
//! while not done:
//!     action = 0 if env.action_space_n() == 1 else policy(obs)
//!     obs, reward, done, info = env.step(action)
//! env.render()
//! ```

use pyo3::exceptions::{PyIOError, PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::env::EnvError;

mod py_env;
mod py_training;

pub use py_env::*;
pub use py_training::*;

/// Map an environment error onto the closest Python exception.
pub(crate) fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::OutOfRangeAction { .. } => PyIndexError::new_err(err.to_string()),
        EnvError::InvalidRenderMode(_) | EnvError::Config(_) => PyValueError::new_err(err.to_string()),
        EnvError::Io(_) => PyIOError::new_err(err.to_string()),
        EnvError::NotInitialized | EnvError::Engine(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

/// ccg_gym: a turn-alternating RL environment over a two-seat card duel.
#[pymodule]
fn ccg_gym(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCardGameEnv>()?;
    m.add_class::<PyTrajectory>()?;
    Ok(())
}
