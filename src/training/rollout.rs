//! Episode driver.
//!
//! Runs one episode through a [`CardGameEnv`] with any policy closure and
//! records what the environment reported.

use tracing::debug;

use crate::core::GameRng;
use crate::decks::DeckProvider;
use crate::env::{CardGameEnv, EnvError};
use crate::rules::Engine;

use super::trajectory::{Trajectory, Transition};

/// Reset `env` and step it until the episode ends or `max_steps` steps
/// have been taken.
///
/// `policy` receives the environment and the current action-space size and
/// returns an action index. When the reported seat has a singleton space the
/// policy is still consulted, but only index 0 is ever submitted.
///
/// When the game ends on one seat's step and the other seat is waiting
/// without priority, one more step is recorded for it so both seats'
/// terminal rewards land in the trajectory. That step does not count
/// against `max_steps`.
pub fn rollout<E, P, F>(
    env: &mut CardGameEnv<E, P>,
    mut policy: F,
    max_steps: usize,
) -> Result<Trajectory, EnvError>
where
    E: Engine,
    P: DeckProvider,
    F: FnMut(&CardGameEnv<E, P>, usize) -> usize,
{
    env.reset()?;
    let mut trajectory = Trajectory::new(env.episode());

    for _ in 0..max_steps {
        let action_count = env.action_count()?;
        let choice = policy(env, action_count);
        let action = if action_count <= 1 { 0 } else { choice };

        let step = env.step(action)?;
        trajectory.push(Transition::from_step(action, action_count, &step));
        if step.done {
            record_waiting_terminal(env, &mut trajectory)?;
            break;
        }
    }

    trajectory.result = env.result()?;
    debug!(
        episode = trajectory.episode,
        steps = trajectory.len(),
        result = ?trajectory.result,
        "rollout finished"
    );
    Ok(trajectory)
}

fn record_waiting_terminal<E, P>(
    env: &mut CardGameEnv<E, P>,
    trajectory: &mut Trajectory,
) -> Result<(), EnvError>
where
    E: Engine,
    P: DeckProvider,
{
    let waiting = env
        .engine()
        .is_some_and(|engine| engine.priority_holder() != env.current_player());
    if waiting {
        let step = env.step(0)?;
        trajectory.push(Transition::from_step(0, 1, &step));
    }
    Ok(())
}

/// Policy that picks uniformly among the offered actions.
pub fn random_policy<E, P>(seed: u64) -> impl FnMut(&CardGameEnv<E, P>, usize) -> usize
where
    E: Engine,
    P: DeckProvider,
{
    let mut rng = GameRng::new(seed);
    move |_, action_count| rng.gen_index(action_count)
}

/// Policy that always submits action 0 (pass, or the only action).
pub fn first_action_policy<E, P>(_: &CardGameEnv<E, P>, _: usize) -> usize
where
    E: Engine,
    P: DeckProvider,
{
    0
}
