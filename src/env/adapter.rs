//! Turn-alternating environment over a rules engine.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{EnvConfig, GameRng, Move, PlayerId};
use crate::decks::{CoreSetDecks, DeckProvider};
use crate::games::duel::Duel;
use crate::rules::{Engine, GameResult};

use super::action_space::{action_count, action_space};
use super::error::EnvError;
use super::observation::{static_space, Observation};
use super::render::{render_human, RenderMode};
use super::reward::RewardSignal;
use super::space::Space;

/// Diagnostics attached to every step. Not meant for learning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Seat the step was reported to.
    pub player: PlayerId,
    /// Priority holder when the step began.
    pub priority_holder: PlayerId,
    /// The move applied, `None` when the action was ignored.
    pub applied: Option<Move>,
}

/// Output of one [`CardGameEnv::step`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    /// One of 0, 1, or 100.
    pub reward: i32,
    pub done: bool,
    pub info: StepInfo,
}

/// Two-seat card game exposed as a sequential decision problem.
///
/// The environment reports to one seat per step and strictly alternates
/// seats on every completed step, whoever actually holds priority. A seat
/// without priority is offered a one-action space and its action is
/// ignored.
///
/// ```
/// use ccg_gym::env::CardGameEnv;
/// use ccg_gym::core::{EnvConfig, PlayerId};
///
/// let mut env = CardGameEnv::new(EnvConfig::default()).unwrap();
/// let obs = env.reset().unwrap();
/// assert_eq!(obs.hand, 7);
///
/// let result = env.step(0).unwrap();
/// assert!(!result.done);
/// assert_eq!(env.current_player(), PlayerId::SECOND);
/// ```
#[derive(Debug)]
pub struct CardGameEnv<E: Engine = Duel, P: DeckProvider = CoreSetDecks> {
    config: EnvConfig,
    decks: P,
    engine: Option<E>,
    current_player: PlayerId,
    /// Episodes started so far.
    episode: u64,
    /// Whether the end of the live episode has been logged.
    finished: bool,
}

impl CardGameEnv {
    /// Environment over the shipped duel with the core-set decks.
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        Self::with_decks(config, CoreSetDecks::new())
    }
}

impl<E: Engine, P: DeckProvider> CardGameEnv<E, P> {
    /// Environment with an injected deck provider. No game exists until
    /// [`reset`](Self::reset) is called.
    pub fn with_decks(config: EnvConfig, decks: P) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            config,
            decks,
            engine: None,
            current_player: PlayerId::FIRST,
            episode: 0,
            finished: false,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn decks(&self) -> &P {
        &self.decks
    }

    /// Seat the next step reports to.
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Number of episodes started.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// The live engine, if `reset` has been called.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    fn live(&self) -> Result<&E, EnvError> {
        self.engine.as_ref().ok_or(EnvError::NotInitialized)
    }

    // === Lifecycle ===

    /// Start a new episode with a seed derived from the config seed and the
    /// episode counter.
    pub fn reset(&mut self) -> Result<Observation, EnvError> {
        let seed = GameRng::episode_seed(self.config.seed, self.episode);
        self.reset_with_seed(seed)
    }

    /// Start a new episode with an explicit shuffle seed.
    ///
    /// Builds a fresh engine from the gold and silver decks and discards the
    /// previous one. On failure the previous episode is left as it was.
    pub fn reset_with_seed(&mut self, seed: u64) -> Result<Observation, EnvError> {
        let mut engine = E::new_game(
            &self.decks.gold(),
            &self.decks.silver(),
            self.decks.registry(),
            &self.config,
            seed,
        )?;
        engine.start_game()?;

        let observation = Observation::build(&engine, PlayerId::FIRST);
        self.engine = Some(engine);
        self.current_player = PlayerId::FIRST;
        self.finished = false;
        self.episode += 1;
        info!(episode = self.episode, seed, "episode started");
        Ok(observation)
    }

    /// Advance one step for the current seat.
    ///
    /// When the current seat holds priority, `action` indexes its legal
    /// moves and that move is applied; an index outside the list fails with
    /// [`EnvError::OutOfRangeAction`] and nothing changes. Otherwise
    /// `action` is ignored. Either way the seat's reward and observation
    /// are reported and the current seat flips.
    pub fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        let player = self.current_player;
        let engine = self.engine.as_mut().ok_or(EnvError::NotInitialized)?;
        let holder = engine.priority_holder();

        let applied = if player == holder {
            let moves = engine.legal_moves(holder);
            let Some(&mv) = moves.get(action) else {
                warn!(player = %player, action, legal = moves.len(), "rejected out-of-range action");
                return Err(EnvError::OutOfRangeAction {
                    action,
                    legal: moves.len(),
                });
            };
            engine.apply_move(mv, false)?;
            Some(mv)
        } else {
            None
        };

        let reward = RewardSignal::for_player(&*engine, player).value();
        let observation = Observation::build(&*engine, player);
        let done = engine.is_over();
        let result = engine.result();
        self.current_player = player.opponent();

        debug!(
            player = %player,
            holder = %holder,
            applied = ?applied,
            reward,
            done,
            "step"
        );
        if done && !self.finished {
            self.finished = true;
            info!(episode = self.episode, result = ?result, "episode finished");
        }

        Ok(StepResult {
            observation,
            reward,
            done,
            info: StepInfo {
                player,
                priority_holder: holder,
                applied,
            },
        })
    }

    /// Outcome of the live episode, once it is over.
    pub fn result(&self) -> Result<Option<GameResult>, EnvError> {
        Ok(self.live()?.result())
    }

    // === Spaces ===

    /// Action space for the current seat.
    pub fn action_space(&self) -> Result<Space, EnvError> {
        self.action_space_for(self.current_player)
    }

    pub fn action_space_for(&self, player: PlayerId) -> Result<Space, EnvError> {
        Ok(action_space(self.live()?, player))
    }

    /// Moves the current seat's action indices refer to. Empty when the
    /// seat does not hold priority.
    pub fn legal_moves(&self) -> Result<Vec<Move>, EnvError> {
        let engine = self.live()?;
        if self.current_player == engine.priority_holder() {
            Ok(engine.legal_moves(self.current_player))
        } else {
            Ok(Vec::new())
        }
    }

    /// Number of valid actions for the current seat.
    pub fn action_count(&self) -> Result<usize, EnvError> {
        Ok(action_count(self.live()?, self.current_player))
    }

    /// Snapshot observation space for the current seat.
    pub fn observation_space(&self) -> Result<Space, EnvError> {
        self.observation_space_for(self.current_player)
    }

    pub fn observation_space_for(&self, player: PlayerId) -> Result<Space, EnvError> {
        Ok(Observation::build(self.live()?, player).snapshot_space())
    }

    /// Fixed observation space from configured capacities. Available
    /// before the first reset.
    pub fn static_observation_space(&self) -> Space {
        static_space(&self.config)
    }

    /// Fresh observation for the current seat.
    pub fn observe(&self) -> Result<Observation, EnvError> {
        Ok(Observation::build(self.live()?, self.current_player))
    }

    // === Rendering ===

    /// Print both seats to stdout.
    pub fn render(&self, mode: &str) -> Result<(), EnvError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.render_to(mode, &mut out)
    }

    /// Write both seats to `out`.
    pub fn render_to<W: Write>(&self, mode: &str, out: &mut W) -> Result<(), EnvError> {
        match mode.parse::<RenderMode>()? {
            RenderMode::Human => render_human(self.live()?, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> CardGameEnv {
        CardGameEnv::new(EnvConfig::default().with_seed(11)).unwrap()
    }

    #[test]
    fn test_calls_before_reset_fail() {
        let mut env = env();

        assert!(matches!(env.step(0), Err(EnvError::NotInitialized)));
        assert!(matches!(env.action_space(), Err(EnvError::NotInitialized)));
        assert!(matches!(env.observation_space(), Err(EnvError::NotInitialized)));
        assert!(matches!(env.render_to("human", &mut Vec::new()), Err(EnvError::NotInitialized)));
        assert_eq!(env.static_observation_space().keys().count(), Observation::FEATURE_COUNT);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = CardGameEnv::new(EnvConfig::default().with_starting_life(0)).unwrap_err();
        assert!(matches!(err, EnvError::Config(_)));
    }

    #[test]
    fn test_reset_returns_seat_zero_observation() {
        let mut env = env();
        let obs = env.reset().unwrap();

        assert_eq!(env.current_player(), PlayerId::FIRST);
        assert_eq!(env.episode(), 1);
        assert!(obs.priority);
        assert_eq!(obs.life, 20);
        assert!(!env.engine().unwrap().is_over());
    }

    #[test]
    fn test_passes_follow_priority() {
        let mut env = env();
        env.reset().unwrap();

        let first = env.step(0).unwrap();
        assert_eq!(first.info.player, PlayerId::FIRST);
        assert_eq!(first.info.applied, Some(Move::Pass));
        assert_eq!(first.reward, 1);
        assert_eq!(env.current_player(), PlayerId::SECOND);

        let second = env.step(0).unwrap();
        assert_eq!(second.info.player, PlayerId::SECOND);
        assert_eq!(second.info.applied, Some(Move::Pass));
        assert_eq!(env.current_player(), PlayerId::FIRST);
    }

    #[test]
    fn test_waiting_seat_action_is_ignored() {
        let mut env = env();
        env.reset().unwrap();

        // Prefer any non-pass move; a land play keeps priority, so the next
        // reported seat is left waiting.
        for _ in 0..500 {
            let holder = env.engine().unwrap().priority_holder();
            if env.current_player() != holder {
                let before = env.engine().unwrap().game_state().history.len();
                let result = env.step(usize::MAX).unwrap();

                assert_eq!(result.info.applied, None);
                assert_eq!(result.info.priority_holder, holder);
                assert_eq!(result.reward, 1);
                assert_eq!(env.engine().unwrap().game_state().history.len(), before);
                assert_eq!(env.action_space_for(holder.opponent()).unwrap(), Space::Discrete { n: 1 });
                return;
            }
            let moves = env.legal_moves().unwrap();
            let action = moves.iter().position(|m| !m.is_pass()).unwrap_or(0);
            env.step(action).unwrap();
        }
        panic!("no seat was ever left waiting");
    }

    #[test]
    fn test_out_of_range_leaves_state() {
        let mut env = env();
        env.reset().unwrap();
        let legal = env.action_count().unwrap();
        let before = env.observe().unwrap();

        let err = env.step(legal).unwrap_err();

        assert!(matches!(err, EnvError::OutOfRangeAction { action, legal: l } if action == legal && l == legal));
        assert_eq!(env.current_player(), PlayerId::FIRST);
        assert_eq!(env.observe().unwrap(), before);
    }

    #[test]
    fn test_render_modes() {
        let mut env = env();
        env.reset().unwrap();

        let mut out = Vec::new();
        env.render_to("human", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Player 0:\n"));
        assert!(text.contains("Player 1:\n"));

        let err = env.render_to("ansi", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, EnvError::InvalidRenderMode(_)));
    }

    #[test]
    fn test_reset_is_deterministic_per_episode() {
        let mut a = env();
        let mut b = env();
        assert_eq!(a.reset().unwrap(), b.reset().unwrap());
        assert_eq!(a.reset_with_seed(5).unwrap(), b.reset_with_seed(5).unwrap());
        assert_eq!(a.episode(), 2);
    }
}
