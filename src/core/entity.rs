//! Entity identification for card instances.
//!
//! Every physical card in a duel gets a unique `EntityId` when the game is
//! built. Seats are never entities; targets that may be either a seat or a
//! card use [`DamageTarget`](crate::core::DamageTarget).

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sequential allocator for entity IDs.
#[derive(Clone, Debug, Default)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Allocate the next unused ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_sequential() {
        let mut alloc = EntityAllocator::default();
        assert_eq!(alloc.alloc(), EntityId(0));
        assert_eq!(alloc.alloc(), EntityId(1));
        assert_eq!(alloc.allocated(), 2);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(EntityId(7).to_string(), "#7");
    }
}
