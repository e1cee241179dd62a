//! Duel engine integration tests.
//!
//! Whole games through the `Engine` trait with the core-set decks.

use ccg_gym::core::{EnvConfig, GameRng, Move, PlayerId, ZoneId};
use ccg_gym::decks::{CoreSetDecks, DeckProvider};
use ccg_gym::games::duel::Duel;
use ccg_gym::rules::{Engine, GameResult};

fn new_duel(seed: u64) -> Duel {
    let decks = CoreSetDecks::new();
    let mut duel = Duel::new_game(
        &decks.gold(),
        &decks.silver(),
        decks.registry(),
        &EnvConfig::default(),
        seed,
    )
    .unwrap();
    duel.start_game().unwrap();
    duel
}

/// Play random legal moves until the game ends.
fn play_out(duel: &mut Duel, seed: u64, max_moves: usize) -> usize {
    let mut rng = GameRng::new(seed);
    for played in 0..max_moves {
        if duel.is_over() {
            return played;
        }
        let moves = duel.legal_moves(duel.priority_holder());
        let mv = moves[rng.gen_index(moves.len())];
        duel.apply_move(mv, false).unwrap();
    }
    max_moves
}

fn total_cards(duel: &Duel) -> usize {
    let state = duel.game_state();
    let mut total = state.zones.size(ZoneId::Battlefield) + state.zones.size(ZoneId::Stack);
    for p in PlayerId::both() {
        total += state.zones.size(ZoneId::Library(p))
            + state.zones.size(ZoneId::Hand(p))
            + state.zones.size(ZoneId::Graveyard(p));
    }
    total
}

#[test]
fn test_random_games_terminate() {
    for seed in 0..10 {
        let mut duel = new_duel(seed);
        play_out(&mut duel, seed, 50_000);

        assert!(duel.is_over(), "seed {seed} never finished");
        assert!(duel.result().is_some());
    }
}

#[test]
fn test_cards_are_conserved() {
    let mut duel = new_duel(77);
    let mut rng = GameRng::new(77);

    for _ in 0..2_000 {
        if duel.is_over() {
            break;
        }
        assert_eq!(total_cards(&duel), 80);
        let moves = duel.legal_moves(duel.priority_holder());
        duel.apply_move(moves[rng.gen_index(moves.len())], false).unwrap();
    }
    assert_eq!(total_cards(&duel), 80);
}

#[test]
fn test_pass_is_always_first() {
    let mut duel = new_duel(5);
    let mut rng = GameRng::new(5);

    for _ in 0..500 {
        if duel.is_over() {
            break;
        }
        let holder = duel.priority_holder();
        let moves = duel.legal_moves(holder);
        assert_eq!(moves.first(), Some(&Move::Pass));
        assert!(duel.legal_moves(holder.opponent()).is_empty());
        duel.apply_move(moves[rng.gen_index(moves.len())], false).unwrap();
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = new_duel(99);
    let mut b = new_duel(99);
    play_out(&mut a, 1, 3_000);
    play_out(&mut b, 1, 3_000);

    assert_eq!(a.game_state().history, b.game_state().history);
    assert_eq!(a.result(), b.result());
}

#[test]
fn test_different_seeds_shuffle_differently() {
    let hands: Vec<Vec<String>> = (0..5).map(|s| new_duel(s).state(PlayerId::FIRST).hand).collect();
    assert!(hands.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_pass_only_game_decks_second_seat() {
    let mut duel = new_duel(0);
    while !duel.is_over() {
        duel.apply_move(Move::Pass, false).unwrap();
    }

    assert_eq!(duel.result(), Some(GameResult::Winner(PlayerId::FIRST)));
    assert_eq!(duel.library_size(PlayerId::SECOND), 0);
    assert_eq!(duel.life(PlayerId::FIRST), 20);
}

#[test]
fn test_view_reflects_zones() {
    let duel = new_duel(3);
    let view = duel.state(PlayerId::SECOND);

    assert_eq!(view.hand.len(), duel.hand_size(PlayerId::SECOND));
    assert_eq!(view.library_size, 33);
    assert!(!view.is_active);
    assert!(!view.has_priority);
    assert!(view.to_string().starts_with("Player 1 life 20"));
}
