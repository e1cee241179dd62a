//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type. For
//! example "Shock" always costs one mana and deals two damage.
//!
//! Instance-specific data (tapped, damage marked, zone) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// Identifies the "type" of card (e.g., "Shock"), not a copy in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a card does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// Taps for one mana. Played once per turn, never cast.
    Land,
    /// Permanent that can attack and block.
    Creature { power: i32, toughness: i32 },
    /// Instant: deals damage to one damage target.
    Burn { damage: i32 },
    /// Sorcery: its controller gains life.
    Lifegain { amount: i32 },
    /// Sorcery: deals damage to every creature and every player.
    Sweep { damage: i32 },
}

/// Static card definition.
///
/// ```
/// use ccg_gym::cards::{CardDefinition, CardId, CardKind};
///
/// let shock = CardDefinition::new(CardId::new(3), "Shock", 1, CardKind::Burn { damage: 2 });
/// assert!(shock.is_instant());
/// assert!(shock.needs_target());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Mana needed to cast. Ignored for lands.
    pub cost: u32,

    pub kind: CardKind,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, cost: u32, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind,
        }
    }

    /// Shorthand for a basic land.
    #[must_use]
    pub fn land(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, 0, CardKind::Land)
    }

    /// Shorthand for a vanilla creature.
    #[must_use]
    pub fn creature(id: CardId, name: impl Into<String>, cost: u32, power: i32, toughness: i32) -> Self {
        Self::new(id, name, cost, CardKind::Creature { power, toughness })
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        matches!(self.kind, CardKind::Land)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        matches!(self.kind, CardKind::Creature { .. })
    }

    /// Instants may be cast whenever their controller holds priority.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        matches!(self.kind, CardKind::Burn { .. })
    }

    /// Whether casting requires a damage target.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        matches!(self.kind, CardKind::Burn { .. })
    }

    /// Creature stats, `None` for non-creatures.
    #[must_use]
    pub fn stats(&self) -> Option<(i32, i32)> {
        match self.kind {
            CardKind::Creature { power, toughness } => Some((power, toughness)),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::Land => write!(f, "{}", self.name),
            CardKind::Creature { power, toughness } => {
                write!(f, "{} ({}) {}/{}", self.name, self.cost, power, toughness)
            }
            _ => write!(f, "{} ({})", self.name, self.cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_stats() {
        let bear = CardDefinition::creature(CardId::new(1), "Grizzly Bears", 2, 2, 2);
        assert!(bear.is_creature());
        assert!(!bear.is_instant());
        assert_eq!(bear.stats(), Some((2, 2)));
        assert_eq!(bear.to_string(), "Grizzly Bears (2) 2/2");
    }

    #[test]
    fn test_land_has_no_stats() {
        let forest = CardDefinition::land(CardId::new(0), "Forest");
        assert!(forest.is_land());
        assert_eq!(forest.stats(), None);
        assert!(!forest.needs_target());
    }
}
