//! Training support: episode recording and rollouts.
//!
//! ## Overview
//!
//! - **Trajectory**: the transitions of one episode plus per-seat returns
//! - **ExperienceBuffer**: FIFO store of trajectories with seeded sampling
//! - **rollout**: drives an environment with a policy closure
//!
//! ## Usage
//!
//! ```rust
//! use ccg_gym::core::EnvConfig;
//! use ccg_gym::env::CardGameEnv;
//! use ccg_gym::training::{random_policy, rollout, ExperienceBuffer};
//!
//! let mut env = CardGameEnv::new(EnvConfig::default()).unwrap();
//! let trajectory = rollout(&mut env, random_policy(7), 200).unwrap();
//!
//! let mut buffer = ExperienceBuffer::new(100);
//! buffer.push(trajectory);
//! let batch = buffer.sample_batch(32, 1);
//! assert_eq!(batch.len(), 32);
//! ```

pub mod rollout;
pub mod trajectory;

pub use rollout::{first_action_policy, random_policy, rollout};
pub use trajectory::{ExperienceBuffer, Trajectory, TrajectoryError, Transition};
