//! Duel state: seat records, card instances, zones, and turn progression.
//!
//! ## PlayerRecord
//!
//! Per-seat scalars: life, loss flag, land drop used this turn.
//!
//! ## GameState
//!
//! Everything the rules mutate except the priority stack:
//! - Seat records
//! - Zone manager (card locations)
//! - Card instances by entity ID
//! - Phase, turn number, active seat
//! - Combat declarations
//! - Move history and the shuffle RNG

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::MoveRecord;
use super::config::{Phase, ZoneId};
use super::entity::{EntityAllocator, EntityId};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardId, CardInstance};
use crate::zones::{ZoneManager, ZonePosition};

/// Per-seat record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub life: i32,

    /// Set by state-based checks; never cleared within a game.
    pub has_lost: bool,

    /// Whether the seat has played a land this turn.
    pub land_played: bool,
}

/// Combat declarations for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    /// Attacking creatures in declaration order.
    pub attackers: SmallVec<[EntityId; 4]>,

    /// `(blocker, attacker)` pairs in declaration order.
    pub blocks: SmallVec<[(EntityId, EntityId); 4]>,
}

impl Combat {
    #[must_use]
    pub fn is_attacking(&self, creature: EntityId) -> bool {
        self.attackers.contains(&creature)
    }

    #[must_use]
    pub fn is_blocking(&self, creature: EntityId) -> bool {
        self.blocks.iter().any(|&(b, _)| b == creature)
    }

    /// The creature blocking `attacker`, if any.
    #[must_use]
    pub fn blocker_of(&self, attacker: EntityId) -> Option<EntityId> {
        self.blocks.iter().find(|&&(_, a)| a == attacker).map(|&(b, _)| b)
    }

    pub fn clear(&mut self) {
        self.attackers.clear();
        self.blocks.clear();
    }
}

/// Full duel state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: PlayerMap<PlayerRecord>,

    pub zones: ZoneManager,

    cards: FxHashMap<EntityId, CardInstance>,

    pub phase: Phase,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Seat whose turn it is.
    pub active_player: PlayerId,

    pub combat: Combat,

    pub history: Vector<MoveRecord>,

    pub rng: GameRng,

    entities: EntityAllocator,
}

impl GameState {
    /// Create an empty state with both seats at `starting_life`.
    #[must_use]
    pub fn new(starting_life: i32, seed: u64) -> Self {
        Self {
            players: PlayerMap::with_value(PlayerRecord {
                life: starting_life,
                ..PlayerRecord::default()
            }),
            zones: ZoneManager::new(),
            cards: FxHashMap::default(),
            phase: Phase::default(),
            turn_number: 1,
            active_player: PlayerId::FIRST,
            combat: Combat::default(),
            history: Vector::new(),
            rng: GameRng::new(seed),
            entities: EntityAllocator::default(),
        }
    }

    // === Cards ===

    /// Create a new card instance on top of `zone`.
    pub fn create_card(&mut self, card_id: CardId, owner: PlayerId, zone: ZoneId) -> EntityId {
        let entity_id = self.entities.alloc();
        self.cards
            .insert(entity_id, CardInstance::new(entity_id, card_id, owner, zone));
        self.zones.add(entity_id, zone, ZonePosition::Top);
        entity_id
    }

    #[must_use]
    pub fn card(&self, entity_id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&entity_id)
    }

    pub fn card_mut(&mut self, entity_id: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&entity_id)
    }

    /// Move a card between zones, keeping the instance's `zone` in sync.
    ///
    /// Per-permanent state is cleared on every zone change.
    pub fn move_card(&mut self, entity_id: EntityId, zone: ZoneId) -> Option<ZoneId> {
        let old = self.zones.move_to(entity_id, zone, ZonePosition::Top)?;
        if let Some(card) = self.cards.get_mut(&entity_id) {
            card.zone = zone;
            card.clear_state();
        }
        Some(old)
    }

    /// Move the top card of `player`'s library to their hand.
    ///
    /// Returns `None` when the library is empty.
    pub fn draw(&mut self, player: PlayerId) -> Option<EntityId> {
        let top = self.zones.top(ZoneId::Library(player))?;
        self.move_card(top, ZoneId::Hand(player));
        Some(top)
    }

    /// Cards on the battlefield controlled by `player`, in arrival order.
    pub fn permanents(&self, player: PlayerId) -> impl Iterator<Item = &CardInstance> + '_ {
        self.zones
            .cards(ZoneId::Battlefield)
            .filter_map(move |e| self.cards.get(&e))
            .filter(move |c| c.owner == player)
    }

    // === Turn Progression ===

    /// Hand the turn to the other seat.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.active_player = self.active_player.opponent();
        for (_, record) in self.players.iter_mut() {
            record.land_played = false;
        }
        self.combat.clear();
    }

    /// Number of entities created in this game.
    #[must_use]
    pub fn entity_count(&self) -> u32 {
        self.entities.allocated()
    }
}
