//! Zone manager for card locations and movement.
//!
//! Every zone is ordered: libraries, graveyards and the stack by position
//! (index 0 = bottom), hands and the battlefield by arrival. Stable order is
//! what makes legal-move enumeration deterministic.
//!
//! Zone contents are `im::Vector`s, so cloning a manager for a snapshot is
//! cheap.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::ZoneId;
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top (end) of the zone.
    Top,
    /// Add to bottom (start) of the zone.
    Bottom,
}

/// Tracks which zone every card is in, and the order inside each zone.
///
/// ## Usage
///
/// ```
/// use ccg_gym::core::{EntityId, PlayerId, ZoneId};
/// use ccg_gym::zones::{ZoneManager, ZonePosition};
///
/// let library = ZoneId::Library(PlayerId::FIRST);
/// let hand = ZoneId::Hand(PlayerId::FIRST);
///
/// let mut zones = ZoneManager::new();
/// zones.add(EntityId(10), library, ZonePosition::Top);
/// zones.add(EntityId(11), library, ZonePosition::Top);
///
/// let drawn = zones.top(library).unwrap();
/// zones.move_to(drawn, hand, ZonePosition::Top);
///
/// assert_eq!(drawn, EntityId(11));
/// assert_eq!(zones.size(library), 1);
/// assert_eq!(zones.size(hand), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    locations: FxHashMap<EntityId, ZoneId>,
    contents: FxHashMap<ZoneId, Vector<EntityId>>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card that is not yet tracked.
    ///
    /// Panics if the entity is already in the manager.
    pub fn add(&mut self, entity: EntityId, zone: ZoneId, position: ZonePosition) {
        if self.locations.contains_key(&entity) {
            panic!("Entity {:?} already exists in zone manager", entity);
        }
        self.locations.insert(entity, zone);
        self.insert_ordered(entity, zone, position);
    }

    /// Move a tracked card to another zone.
    ///
    /// Returns the old zone, or `None` if the card wasn't found.
    pub fn move_to(&mut self, entity: EntityId, zone: ZoneId, position: ZonePosition) -> Option<ZoneId> {
        let old_zone = self.locations.get(&entity).copied()?;
        if let Some(order) = self.contents.get_mut(&old_zone) {
            order.retain(|&e| e != entity);
        }
        self.locations.insert(entity, zone);
        self.insert_ordered(entity, zone, position);
        Some(old_zone)
    }

    fn insert_ordered(&mut self, entity: EntityId, zone: ZoneId, position: ZonePosition) {
        let order = self.contents.entry(zone).or_default();
        match position {
            ZonePosition::Top => order.push_back(entity),
            ZonePosition::Bottom => order.push_front(entity),
        }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<ZoneId> {
        self.locations.get(&entity).copied()
    }

    #[must_use]
    pub fn is_in(&self, entity: EntityId, zone: ZoneId) -> bool {
        self.locations.get(&entity) == Some(&zone)
    }

    /// Cards in a zone, bottom to top.
    pub fn cards(&self, zone: ZoneId) -> impl Iterator<Item = EntityId> + '_ {
        self.contents.get(&zone).into_iter().flat_map(|v| v.iter().copied())
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn size(&self, zone: ZoneId) -> usize {
        self.contents.get(&zone).map_or(0, Vector::len)
    }

    /// Top card of a zone.
    #[must_use]
    pub fn top(&self, zone: ZoneId) -> Option<EntityId> {
        self.contents.get(&zone)?.last().copied()
    }

    /// Shuffle a zone in place.
    pub fn shuffle(&mut self, zone: ZoneId, rng: &mut GameRng) {
        if let Some(order) = self.contents.get_mut(&zone) {
            let mut cards: Vec<EntityId> = order.iter().copied().collect();
            rng.shuffle(&mut cards);
            *order = cards.into_iter().collect();
        }
    }

    /// Total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }
}
