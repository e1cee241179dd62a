//! RL environment adapter.
//!
//! [`CardGameEnv`] drives an [`Engine`](crate::rules::Engine) one action at a
//! time and reports `(observation, reward, done, info)` to a strictly
//! alternating seat.
//!
//! ## Pieces
//!
//! - `action_space`: how many action indices the reported seat may choose from
//! - `observation`: fresh zone sizes and flags, plus fixed-shape features
//! - `reward`: per-step reward for the reported seat
//! - `render`: text dump of both seats

pub mod action_space;
mod adapter;
mod error;
pub mod observation;
mod render;
pub mod reward;
mod space;

pub use adapter::{CardGameEnv, StepInfo, StepResult};
pub use error::EnvError;
pub use observation::Observation;
pub use render::RenderMode;
pub use reward::RewardSignal;
pub use space::Space;
