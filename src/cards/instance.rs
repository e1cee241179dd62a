//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical card in a duel. It tracks the mutable
//! state the rules care about: current zone, tapped status, summoning
//! sickness, and damage marked this turn.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::config::ZoneId;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// The seat whose deck this card came from. Owners always control
    /// their own cards in this ruleset.
    pub owner: PlayerId,

    /// Current zone.
    pub zone: ZoneId,

    /// Tapped permanents cannot attack, block, or produce mana.
    pub tapped: bool,

    /// Creatures cannot attack the turn they arrive.
    pub summoning_sick: bool,

    /// Damage marked since the last cleanup.
    pub damage: i32,
}

impl CardInstance {
    #[must_use]
    pub fn new(entity_id: EntityId, card_id: CardId, owner: PlayerId, zone: ZoneId) -> Self {
        Self {
            entity_id,
            card_id,
            owner,
            zone,
            tapped: false,
            summoning_sick: false,
            damage: 0,
        }
    }

    /// Reset per-permanent state when the card changes zones.
    pub fn clear_state(&mut self) {
        self.tapped = false;
        self.summoning_sick = false;
        self.damage = 0;
    }
}
