//! Training bindings for Python.

use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::PyIOError;
use pyo3::prelude::*;

use crate::core::PlayerId;
use crate::training::{random_policy, rollout, Trajectory};

use super::py_env::PyCardGameEnv;
use super::to_py_err;

/// Python wrapper for a recorded episode.
#[pyclass(name = "Trajectory")]
#[derive(Clone)]
pub struct PyTrajectory {
    trajectory: Trajectory,
    features: Vec<Vec<f32>>,
}

#[pymethods]
impl PyTrajectory {
    /// Play one episode with a uniform random policy.
    #[staticmethod]
    #[pyo3(signature = (env, seed = 0, max_steps = 10_000))]
    fn random_rollout(env: &mut PyCardGameEnv, seed: u64, max_steps: usize) -> PyResult<Self> {
        let trajectory = rollout(&mut env.env, random_policy(seed), max_steps).map_err(to_py_err)?;
        let config = env.env.config();
        let features = trajectory
            .transitions
            .iter()
            .map(|t| t.observation.to_features(config))
            .collect();
        Ok(Self { trajectory, features })
    }

    fn __len__(&self) -> usize {
        self.trajectory.len()
    }

    /// Reward totals per seat.
    fn returns(&self) -> (i64, i64) {
        let r = &self.trajectory.returns;
        (r[PlayerId::FIRST], r[PlayerId::SECOND])
    }

    /// Returns `(features, actions, rewards)` as numpy arrays.
    fn to_numpy<'py>(
        &self,
        py: Python<'py>,
    ) -> PyResult<(
        Bound<'py, PyArray2<f32>>,
        Bound<'py, PyArray1<i64>>,
        Bound<'py, PyArray1<i32>>,
    )> {
        let features = PyArray2::from_vec2_bound(py, &self.features)?;
        let actions = self.trajectory.transitions.iter().map(|t| t.action as i64).collect();
        let rewards = self.trajectory.transitions.iter().map(|t| t.reward).collect();
        Ok((
            features,
            PyArray1::from_vec_bound(py, actions),
            PyArray1::from_vec_bound(py, rewards),
        ))
    }

    /// Write the trajectory as bincode.
    fn save(&self, path: &str) -> PyResult<()> {
        self.trajectory
            .save_to_path(path)
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Trajectory(episode={}, steps={}, result={:?})",
            self.trajectory.episode,
            self.trajectory.len(),
            self.trajectory.result
        )
    }
}
