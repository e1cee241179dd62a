//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::EnvConfig;
use crate::env::{CardGameEnv, Observation, Space, StepResult};

use super::to_py_err;

/// Python wrapper for the duel environment.
#[pyclass(name = "CardGameEnv", unsendable)]
pub struct PyCardGameEnv {
    pub(crate) env: CardGameEnv,
}

pub(crate) fn observation_dict<'py>(py: Python<'py>, obs: &Observation) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("life", obs.life)?;
    dict.set_item("hand", obs.hand)?;
    dict.set_item("graveyard", obs.graveyard)?;
    dict.set_item("deck", obs.deck)?;
    dict.set_item("battlefield", obs.battlefield)?;
    dict.set_item("attackers", obs.attackers)?;
    dict.set_item("blockers", obs.blockers)?;
    dict.set_item("empty_stack", obs.empty_stack)?;
    dict.set_item("damage_targets", obs.damage_targets)?;
    dict.set_item("active_player", obs.active_player)?;
    dict.set_item("nonactive_player", obs.nonactive_player)?;
    dict.set_item("priority", obs.priority)?;
    dict.set_item("current_phase", obs.current_phase.id())?;
    Ok(dict)
}

fn space_repr(space: &Space) -> String {
    space.to_string()
}

#[pymethods]
impl PyCardGameEnv {
    /// Create an environment.
    ///
    /// # Arguments
    /// - seed: base seed for episode shuffles
    /// - starting_life: life each seat starts with
    /// - config_json: optional JSON config; overrides the other arguments
    #[new]
    #[pyo3(signature = (seed = 0, starting_life = 20, config_json = None))]
    fn new(seed: u64, starting_life: i32, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EnvConfig::from_json_str(json).map_err(|e| to_py_err(e.into()))?,
            None => EnvConfig::default().with_seed(seed).with_starting_life(starting_life),
        };
        let env = CardGameEnv::new(config).map_err(to_py_err)?;
        Ok(Self { env })
    }

    /// Start a new episode and return seat 0's observation.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(&mut self, py: Python<'py>, seed: Option<u64>) -> PyResult<Bound<'py, PyDict>> {
        let obs = match seed {
            Some(seed) => self.env.reset_with_seed(seed),
            None => self.env.reset(),
        }
        .map_err(to_py_err)?;
        observation_dict(py, &obs)
    }

    /// Step with an action index; returns `(obs, reward, done, info)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyDict>, i32, bool, Bound<'py, PyDict>)> {
        let StepResult {
            observation,
            reward,
            done,
            info,
        } = self.env.step(action).map_err(to_py_err)?;

        let info_dict = PyDict::new_bound(py);
        info_dict.set_item("player", info.player.index())?;
        info_dict.set_item("priority_holder", info.priority_holder.index())?;
        info_dict.set_item("applied", info.applied.map(|mv| mv.to_string()))?;

        Ok((observation_dict(py, &observation)?, reward, done, info_dict))
    }

    /// Print both seats.
    #[pyo3(signature = (mode = "human"))]
    fn render(&self, mode: &str) -> PyResult<()> {
        self.env.render(mode).map_err(to_py_err)
    }

    /// Size of the current seat's discrete action space.
    fn action_space_n(&self) -> PyResult<usize> {
        self.env.action_count().map_err(to_py_err)
    }

    /// Legal moves the current action indices refer to, as text.
    fn legal_moves(&self) -> PyResult<Vec<String>> {
        let moves = self.env.legal_moves().map_err(to_py_err)?;
        Ok(moves.iter().map(ToString::to_string).collect())
    }

    /// Snapshot observation space, as text.
    fn observation_space(&self) -> PyResult<String> {
        self.env
            .observation_space()
            .map(|space| space_repr(&space))
            .map_err(to_py_err)
    }

    /// Fixed observation space, as text.
    fn static_observation_space(&self) -> String {
        space_repr(&self.env.static_observation_space())
    }

    /// Normalized features of the current seat's observation.
    fn features<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let obs = self.env.observe().map_err(to_py_err)?;
        Ok(PyArray1::from_vec_bound(py, obs.to_features(self.env.config())))
    }

    #[getter]
    fn current_player(&self) -> usize {
        self.env.current_player().index()
    }

    #[getter]
    fn episode(&self) -> u64 {
        self.env.episode()
    }

    fn __repr__(&self) -> String {
        format!(
            "CardGameEnv(episode={}, current_player={})",
            self.env.episode(),
            self.env.current_player().index()
        )
    }
}
