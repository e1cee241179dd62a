//! Episode recording and experience buffering.
//!
//! A trajectory records one episode as the environment reported it:
//! - The seat each step was reported to
//! - The action index submitted and the action-space size it came from
//! - Reward, done flag, and observation returned
//! - Per-seat reward totals and the final result

use std::collections::VecDeque;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::env::{Observation, StepResult};
use crate::rules::GameResult;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("trajectory I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("trajectory encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// One reported step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Seat the step was reported to.
    pub player: PlayerId,

    /// Action index submitted.
    pub action: usize,

    /// Size of the action space the index was chosen from.
    pub action_count: usize,

    pub reward: i32,

    pub done: bool,

    /// Observation returned by the step.
    pub observation: Observation,
}

impl Transition {
    /// Record a completed step.
    pub fn from_step(action: usize, action_count: usize, step: &StepResult) -> Self {
        Self {
            player: step.info.player,
            action,
            action_count,
            reward: step.reward,
            done: step.done,
            observation: step.observation.clone(),
        }
    }

    /// Whether the seat had a real choice at this step.
    #[must_use]
    pub fn had_choice(&self) -> bool {
        self.action_count > 1
    }
}

/// A complete (or truncated) episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub transitions: Vec<Transition>,

    /// Sum of rewards reported to each seat.
    pub returns: PlayerMap<i64>,

    /// Episode number within the environment that produced it.
    pub episode: u64,

    /// Final result, `None` when the episode was cut off.
    pub result: Option<GameResult>,
}

impl Trajectory {
    /// Create an empty trajectory.
    pub fn new(episode: u64) -> Self {
        Self {
            transitions: Vec::new(),
            returns: PlayerMap::default(),
            episode,
            result: None,
        }
    }

    /// Append a transition and update that seat's return.
    pub fn push(&mut self, transition: Transition) {
        self.returns[transition.player] += i64::from(transition.reward);
        self.transitions.push(transition);
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Whether the last recorded step ended the game.
    pub fn is_complete(&self) -> bool {
        self.transitions.last().is_some_and(|t| t.done)
    }

    /// Transitions reported to one seat.
    pub fn player_transitions(&self, player: PlayerId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.player == player)
    }

    pub fn player_return(&self, player: PlayerId) -> i64 {
        self.returns[player]
    }

    /// Write as bincode.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), TrajectoryError> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Read a trajectory written by [`Trajectory::save`].
    pub fn load<R: Read>(reader: R) -> Result<Self, TrajectoryError> {
        Ok(bincode::deserialize_from(reader)?)
    }

    pub fn save_to_path(&self, path: impl AsRef<std::path::Path>) -> Result<(), TrajectoryError> {
        let file = std::fs::File::create(path)?;
        self.save(std::io::BufWriter::new(file))
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TrajectoryError> {
        let file = std::fs::File::open(path)?;
        Self::load(std::io::BufReader::new(file))
    }
}

/// Buffer for storing trajectories during training.
///
/// Uses a FIFO strategy: when full, oldest trajectories are removed.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    trajectories: VecDeque<Trajectory>,
    max_trajectories: usize,
}

impl ExperienceBuffer {
    pub fn new(max_trajectories: usize) -> Self {
        Self {
            trajectories: VecDeque::with_capacity(max_trajectories),
            max_trajectories,
        }
    }

    /// Add a trajectory, evicting the oldest if full.
    pub fn push(&mut self, trajectory: Trajectory) {
        if self.trajectories.len() >= self.max_trajectories {
            self.trajectories.pop_front();
        }
        self.trajectories.push_back(trajectory);
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_trajectories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }

    /// Total transitions across all trajectories.
    pub fn total_transitions(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    /// Sample up to `batch_size` distinct transitions, reproducibly.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<Transition> {
        let all: Vec<&Transition> = self.trajectories.iter().flat_map(|t| &t.transitions).collect();
        if all.is_empty() || batch_size == 0 {
            return vec![];
        }

        let mut rng = GameRng::new(seed);
        let mut indices: Vec<usize> = (0..all.len()).collect();
        let n = indices.len();
        let limit = batch_size.min(n);

        // Partial Fisher-Yates over the first `limit` slots.
        for i in 0..limit {
            let j = i + rng.gen_index(n - i);
            indices.swap(i, j);
        }

        indices[..limit].iter().map(|&i| all[i].clone()).collect()
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}
