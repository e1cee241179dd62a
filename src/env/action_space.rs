//! Action space resolution.
//!
//! The seat being asked to act sees the full legal-move list only when it
//! actually holds priority. Otherwise it gets a single implicit "wait"
//! action, so both seats step through the same interface every turn.

use crate::core::PlayerId;
use crate::rules::Engine;

use super::space::Space;

/// Number of valid action indices for `player` right now.
pub fn action_count<E: Engine>(engine: &E, player: PlayerId) -> usize {
    if player == engine.priority_holder() {
        engine.legal_moves(player).len()
    } else {
        1
    }
}

/// Discrete action space for `player` right now.
pub fn action_space<E: Engine>(engine: &E, player: PlayerId) -> Space {
    Space::Discrete {
        n: action_count(engine, player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EnvConfig;
    use crate::decks::{CoreSetDecks, DeckProvider};
    use crate::games::duel::Duel;

    fn started_duel() -> Duel {
        let decks = CoreSetDecks::new();
        let mut duel = Duel::new_game(
            &decks.gold(),
            &decks.silver(),
            decks.registry(),
            &EnvConfig::default(),
            3,
        )
        .unwrap();
        duel.start_game().unwrap();
        duel
    }

    #[test]
    fn test_holder_sees_legal_moves() {
        let duel = started_duel();
        let holder = duel.priority_holder();
        assert_eq!(action_count(&duel, holder), duel.legal_moves(holder).len());
        assert!(action_count(&duel, holder) >= 1);
    }

    #[test]
    fn test_waiting_seat_gets_singleton() {
        let duel = started_duel();
        let waiting = duel.priority_holder().opponent();
        assert_eq!(action_space(&duel, waiting), Space::Discrete { n: 1 });
    }
}
