//! Environment adapter integration tests.
//!
//! The scripted engine gives exact control over who holds priority and who
//! has lost; the duel engine checks the adapter against real games.

use ccg_gym::cards::CardRegistry;
use ccg_gym::core::{EntityId, EnvConfig, Move, Phase, PlayerId, PlayerMap};
use ccg_gym::decks::{DeckProvider, Decklist};
use ccg_gym::env::{CardGameEnv, EnvError, RewardSignal, Space};
use ccg_gym::rules::{Engine, EngineError, PlayerView};
use proptest::prelude::*;

// =============================================================================
// Scripted engine
// =============================================================================

/// What the scripted engine does once seat 0 has applied a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Script {
    /// Nobody ever loses.
    Endless,
    /// Both seats lose on the first move.
    MutualLoss,
    /// Seat 0 loses on the first move.
    FirstLoses,
    /// Seat 1 loses on the first move.
    SecondLoses,
    /// Every move is rejected.
    Rejecting,
    /// `new_game` fails.
    Broken,
}

impl Script {
    fn name(self) -> &'static str {
        match self {
            Script::Endless => "endless",
            Script::MutualLoss => "mutual-loss",
            Script::FirstLoses => "first-loses",
            Script::SecondLoses => "second-loses",
            Script::Rejecting => "rejecting",
            Script::Broken => "broken",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "mutual-loss" => Script::MutualLoss,
            "first-loses" => Script::FirstLoses,
            "second-loses" => Script::SecondLoses,
            "rejecting" => Script::Rejecting,
            "broken" => Script::Broken,
            _ => Script::Endless,
        }
    }
}

/// Seat 0 always holds priority and always has three moves.
#[derive(Debug)]
struct ScriptedEngine {
    script: Script,
    applied: Vec<Move>,
    lost: PlayerMap<bool>,
}

impl ScriptedEngine {
    const MOVES: [Move; 3] = [Move::Pass, Move::Attack(EntityId(1)), Move::Attack(EntityId(2))];
}

impl Engine for ScriptedEngine {
    fn new_game(
        gold: &Decklist,
        _silver: &Decklist,
        _registry: &CardRegistry,
        _config: &EnvConfig,
        _seed: u64,
    ) -> Result<Self, EngineError> {
        let script = Script::from_name(&gold.name);
        if script == Script::Broken {
            return Err(EngineError::EmptyDeck(gold.name.clone()));
        }
        Ok(Self {
            script,
            applied: Vec::new(),
            lost: PlayerMap::default(),
        })
    }

    fn start_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn priority_holder(&self) -> PlayerId {
        PlayerId::FIRST
    }

    fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        if player == PlayerId::FIRST && !self.is_over() {
            Self::MOVES.to_vec()
        } else {
            Vec::new()
        }
    }

    fn apply_move(&mut self, mv: Move, _is_response: bool) -> Result<(), EngineError> {
        if self.script == Script::Rejecting {
            return Err(EngineError::IllegalMove {
                player: PlayerId::FIRST,
                mv,
            });
        }
        self.applied.push(mv);
        match self.script {
            Script::MutualLoss => {
                self.lost = PlayerMap::with_value(true);
            }
            Script::FirstLoses => self.lost[PlayerId::FIRST] = true,
            Script::SecondLoses => self.lost[PlayerId::SECOND] = true,
            _ => {}
        }
        Ok(())
    }

    fn state(&self, player: PlayerId) -> PlayerView {
        PlayerView {
            player,
            life: self.life(player),
            has_lost: self.lost[player],
            is_active: player == PlayerId::FIRST,
            has_priority: player == PlayerId::FIRST,
            phase: Phase::PrecombatMain,
            hand: vec!["Scripted Card".into()],
            library_size: 10,
            graveyard: Vec::new(),
            battlefield: Vec::new(),
        }
    }

    fn life(&self, player: PlayerId) -> i32 {
        if self.lost[player] {
            0
        } else {
            20
        }
    }

    fn has_lost(&self, player: PlayerId) -> bool {
        self.lost[player]
    }

    fn hand_size(&self, _player: PlayerId) -> usize {
        1
    }

    fn graveyard_size(&self, _player: PlayerId) -> usize {
        self.applied.len()
    }

    fn library_size(&self, _player: PlayerId) -> usize {
        10
    }

    fn battlefield_size(&self) -> usize {
        0
    }

    fn attacker_count(&self) -> usize {
        0
    }

    fn blocker_count(&self) -> usize {
        0
    }

    fn damage_target_count(&self) -> usize {
        2
    }

    fn stack_is_empty(&self) -> bool {
        true
    }

    fn active_player(&self) -> PlayerId {
        PlayerId::FIRST
    }

    fn phase(&self) -> Phase {
        Phase::PrecombatMain
    }
}

/// Deck provider whose gold list name selects the script.
struct ScriptedDecks {
    script: Script,
    registry: CardRegistry,
}

impl DeckProvider for ScriptedDecks {
    fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn gold(&self) -> Decklist {
        Decklist::new(self.script.name())
    }

    fn silver(&self) -> Decklist {
        Decklist::new("silver")
    }
}

fn scripted(script: Script) -> CardGameEnv<ScriptedEngine, ScriptedDecks> {
    let decks = ScriptedDecks {
        script,
        registry: CardRegistry::new(),
    };
    let mut env = CardGameEnv::with_decks(EnvConfig::default(), decks).unwrap();
    env.reset().unwrap();
    env
}

fn applied(env: &CardGameEnv<ScriptedEngine, ScriptedDecks>) -> usize {
    env.engine().unwrap().applied.len()
}

// =============================================================================
// Reward branches
// =============================================================================

#[test]
fn test_mutual_loss_rewards_both_seats_100() {
    let mut env = scripted(Script::MutualLoss);

    let first = env.step(1).unwrap();
    assert!(first.done);
    assert_eq!(first.reward, 100);
    assert_eq!(first.info.applied, Some(Move::Attack(EntityId(1))));

    let second = env.step(0).unwrap();
    assert!(second.done);
    assert_eq!(second.reward, 100);
    assert_eq!(second.info.applied, None);
}

#[test]
fn test_clean_loss_rewards_zero_and_winner_one() {
    let mut env = scripted(Script::FirstLoses);

    let loser = env.step(0).unwrap();
    assert!(loser.done);
    assert_eq!(loser.reward, 0);

    let winner = env.step(0).unwrap();
    assert_eq!(winner.reward, 1);
    assert_eq!(env.result().unwrap(), Some(ccg_gym::rules::GameResult::Winner(PlayerId::SECOND)));
}

#[test]
fn test_win_is_reported_as_survival() {
    let mut env = scripted(Script::SecondLoses);

    let winner = env.step(2).unwrap();
    assert!(winner.done);
    assert_eq!(winner.reward, RewardSignal::Survived.value());

    let loser = env.step(0).unwrap();
    assert_eq!(loser.reward, RewardSignal::Lost.value());
}

// =============================================================================
// Priority and action resolution
// =============================================================================

#[test]
fn test_non_priority_seat_never_applies() {
    let mut env = scripted(Script::Endless);

    env.step(0).unwrap();
    assert_eq!(applied(&env), 1);
    assert_eq!(env.current_player(), PlayerId::SECOND);
    assert_eq!(env.action_space().unwrap(), Space::Discrete { n: 1 });

    // Any value is accepted and ignored.
    let ignored = env.step(usize::MAX).unwrap();
    assert_eq!(ignored.info.applied, None);
    assert_eq!(ignored.info.priority_holder, PlayerId::FIRST);
    assert_eq!(applied(&env), 1);
    assert_eq!(env.current_player(), PlayerId::FIRST);
}

#[test]
fn test_holder_space_matches_legal_moves() {
    let env = scripted(Script::Endless);

    assert_eq!(env.action_space_for(PlayerId::FIRST).unwrap(), Space::Discrete { n: 3 });
    assert_eq!(env.action_space_for(PlayerId::SECOND).unwrap(), Space::Discrete { n: 1 });
    assert_eq!(env.legal_moves().unwrap(), ScriptedEngine::MOVES.to_vec());
}

#[test]
fn test_out_of_range_is_loud_and_harmless() {
    let mut env = scripted(Script::Endless);

    let err = env.step(3).unwrap_err();

    assert!(matches!(err, EnvError::OutOfRangeAction { action: 3, legal: 3 }));
    assert_eq!(applied(&env), 0);
    assert_eq!(env.current_player(), PlayerId::FIRST);
}

#[test]
fn test_engine_errors_propagate_unchanged() {
    let mut env = scripted(Script::Rejecting);

    let err = env.step(0).unwrap_err();

    match err {
        EnvError::Engine(EngineError::IllegalMove { player, mv }) => {
            assert_eq!(player, PlayerId::FIRST);
            assert_eq!(mv, Move::Pass);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(env.current_player(), PlayerId::FIRST);
}

#[test]
fn test_failed_reset_keeps_env_uninitialized() {
    let decks = ScriptedDecks {
        script: Script::Broken,
        registry: CardRegistry::new(),
    };
    let mut env: CardGameEnv<ScriptedEngine, ScriptedDecks> =
        CardGameEnv::with_decks(EnvConfig::default(), decks).unwrap();

    assert!(matches!(env.reset(), Err(EnvError::Engine(EngineError::EmptyDeck(_)))));
    assert!(matches!(env.step(0), Err(EnvError::NotInitialized)));
    assert_eq!(env.episode(), 0);
}

#[test]
fn test_reset_restores_seat_zero() {
    let mut env = scripted(Script::Endless);
    env.step(0).unwrap();
    assert_eq!(env.current_player(), PlayerId::SECOND);

    env.reset().unwrap();

    assert_eq!(env.current_player(), PlayerId::FIRST);
    assert_eq!(applied(&env), 0);
}

#[test]
fn test_steps_after_game_over_do_not_panic() {
    let mut env = scripted(Script::MutualLoss);
    env.step(0).unwrap();

    // Seat 0 holds priority but has no moves left.
    env.step(0).unwrap();
    assert_eq!(env.action_space().unwrap(), Space::Discrete { n: 0 });
    assert!(matches!(env.step(0), Err(EnvError::OutOfRangeAction { legal: 0, .. })));
    assert!(env.render_to("human", &mut Vec::new()).is_ok());
}

// =============================================================================
// Duel end-to-end
// =============================================================================

fn duel_env(seed: u64) -> CardGameEnv {
    let mut env = CardGameEnv::new(EnvConfig::default().with_seed(seed)).unwrap();
    env.reset().unwrap();
    env
}

#[test]
fn test_first_step_scenario() {
    let mut env = duel_env(0);
    assert_eq!(env.current_player(), PlayerId::FIRST);

    let k = env.action_space_for(PlayerId::FIRST).unwrap().n().unwrap();
    assert!(k > 0);

    let result = env.step(0).unwrap();
    assert!(!result.done);
    assert_eq!(env.current_player(), PlayerId::SECOND);
}

#[test]
fn test_always_first_action_runs_to_completion() {
    let mut env = duel_env(3);
    let mut last = None;

    for _ in 0..10_000 {
        let result = env.step(0).unwrap();
        if result.done {
            last = Some(result);
            break;
        }
    }

    let last = last.expect("episode never ended");
    let engine = env.engine().unwrap();
    let loser = PlayerId::both().find(|&p| engine.has_lost(p)).unwrap();
    assert_eq!(last.info.player, loser);
    assert_eq!(last.reward, 0);

    // The winner, waiting without priority, sees survival on the next step.
    let follow = env.step(0).unwrap();
    assert_eq!(follow.info.player, loser.opponent());
    assert!(follow.info.applied.is_none());
    assert!(follow.done);
    assert_eq!(follow.reward, 1);
}

#[test]
fn test_render_prints_both_seats() {
    let env = duel_env(1);
    let mut out = Vec::new();
    env.render_to("human", &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let first = text.find("Player 0:").unwrap();
    let second = text.find("Player 1:").unwrap();
    assert!(first < second);
    assert!(text.contains("life 20"));
    assert!(matches!(
        env.render_to("rgb_array", &mut Vec::new()),
        Err(EnvError::InvalidRenderMode(_))
    ));
}

#[test]
fn test_observation_space_tracks_state() {
    let env = duel_env(2);
    let snapshot = env.observation_space().unwrap();
    let fixed = env.static_observation_space();

    assert_eq!(snapshot.get("hand"), Some(&Space::Discrete { n: 8 }));
    assert_eq!(
        snapshot.keys().collect::<Vec<_>>(),
        fixed.keys().collect::<Vec<_>>()
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_seats_alternate_and_rewards_stay_in_set(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u16>(), 1..150),
    ) {
        let mut env = duel_env(seed);

        for (i, choice) in choices.into_iter().enumerate() {
            let expected = if i % 2 == 0 { PlayerId::FIRST } else { PlayerId::SECOND };
            prop_assert_eq!(env.current_player(), expected);

            let n = env.action_count().unwrap();
            let action = if n == 0 { 0 } else { usize::from(choice) % n };
            let result = env.step(action).unwrap();

            prop_assert_eq!(result.info.player, expected);
            prop_assert!(RewardSignal::VALUES.contains(&result.reward));
            if result.done {
                break;
            }
        }
    }

    #[test]
    fn prop_action_space_matches_priority(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u16>(), 1..100),
    ) {
        let mut env = duel_env(seed);

        for choice in choices {
            let engine = env.engine().unwrap();
            let holder = engine.priority_holder();
            for seat in PlayerId::both() {
                let n = env.action_space_for(seat).unwrap().n().unwrap();
                if seat == holder {
                    prop_assert_eq!(n, engine.legal_moves(seat).len());
                } else {
                    prop_assert_eq!(n, 1);
                }
            }

            let n = env.action_count().unwrap();
            if env.step(usize::from(choice) % n.max(1)).unwrap().done {
                break;
            }
        }
    }

    #[test]
    fn prop_out_of_range_changes_nothing(
        seed in any::<u64>(),
        warmup in 0usize..40,
        excess in 0usize..10,
    ) {
        let mut env = duel_env(seed);
        for _ in 0..warmup {
            env.step(0).unwrap();
        }

        let holder = env.engine().unwrap().priority_holder();
        if env.current_player() != holder {
            env.step(0).unwrap();
        }
        let before = env.observe().unwrap();
        let seat = env.current_player();
        let legal = env.action_count().unwrap();

        let err = env.step(legal + excess).unwrap_err();

        let is_out_of_range = matches!(err, EnvError::OutOfRangeAction { .. });
        prop_assert!(is_out_of_range);
        prop_assert_eq!(env.current_player(), seat);
        prop_assert_eq!(env.observe().unwrap(), before);
    }
}
