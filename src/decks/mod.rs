//! Deck provider: the two fixed starting decklists.
//!
//! Each episode seats the "gold" deck at seat 0 and the "silver" deck at
//! seat 1. Lists are plain values produced by a [`DeckProvider`]; the
//! environment receives the provider at construction and never reads decks
//! from anywhere else.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId, CardKind, CardRegistry};

/// One line of a decklist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,
    pub count: u32,
}

/// A named, ordered decklist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decklist {
    pub name: String,
    pub entries: Vec<DeckEntry>,
}

impl Decklist {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append `count` copies of `card` (builder pattern).
    #[must_use]
    pub fn with(mut self, card: CardId, count: u32) -> Self {
        self.entries.push(DeckEntry { card, count });
        self
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every card in list order, one item per copy.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.card).take(e.count as usize))
    }
}

/// Source of the two starting decks and the definitions they reference.
///
/// Implementations must be deterministic: every call returns the same lists.
pub trait DeckProvider {
    /// Definitions for every card either list names.
    fn registry(&self) -> &CardRegistry;

    /// Deck for seat 0.
    fn gold(&self) -> Decklist;

    /// Deck for seat 1.
    fn silver(&self) -> Decklist;
}

/// Card pool shared by both core-set decks: (id, name, cost, kind).
const CORE_SET_POOL: &[(u32, &str, u32, CardKind)] = &[
    (1, "Plains", 0, CardKind::Land),
    (2, "Forest", 0, CardKind::Land),
    (3, "Mountain", 0, CardKind::Land),
    (4, "Swamp", 0, CardKind::Land),
    (10, "Savannah Lions", 1, CardKind::Creature { power: 2, toughness: 1 }),
    (11, "Grizzly Bears", 2, CardKind::Creature { power: 2, toughness: 2 }),
    (12, "Venerable Monk", 3, CardKind::Creature { power: 2, toughness: 2 }),
    (13, "Trained Armodon", 3, CardKind::Creature { power: 3, toughness: 3 }),
    (14, "Spined Wurm", 5, CardKind::Creature { power: 5, toughness: 4 }),
    (15, "Serra Angel", 5, CardKind::Creature { power: 4, toughness: 4 }),
    (16, "Craw Wurm", 6, CardKind::Creature { power: 6, toughness: 4 }),
    (20, "Raging Goblin", 1, CardKind::Creature { power: 1, toughness: 1 }),
    (21, "Bog Imp", 2, CardKind::Creature { power: 1, toughness: 1 }),
    (22, "Goblin Raider", 2, CardKind::Creature { power: 2, toughness: 2 }),
    (23, "Scathe Zombies", 3, CardKind::Creature { power: 2, toughness: 3 }),
    (24, "Hill Giant", 4, CardKind::Creature { power: 3, toughness: 3 }),
    (30, "Healing Salve", 1, CardKind::Lifegain { amount: 3 }),
    (31, "Shock", 1, CardKind::Burn { damage: 2 }),
    (32, "Lightning Blast", 4, CardKind::Burn { damage: 4 }),
    (33, "Earthquake", 3, CardKind::Sweep { damage: 2 }),
];

/// The fixed gold (green-white) and silver (red-black) starter decks.
///
/// ```
/// use ccg_gym::decks::{CoreSetDecks, DeckProvider};
///
/// let decks = CoreSetDecks::new();
/// assert_eq!(decks.gold().len(), 40);
/// assert_eq!(decks.silver().len(), 40);
/// assert_eq!(decks.gold(), CoreSetDecks::new().gold());
/// ```
#[derive(Clone, Debug)]
pub struct CoreSetDecks {
    registry: CardRegistry,
}

impl CoreSetDecks {
    #[must_use]
    pub fn new() -> Self {
        let mut registry = CardRegistry::new();
        for &(id, name, cost, kind) in CORE_SET_POOL {
            registry.register(CardDefinition::new(CardId::new(id), name, cost, kind));
        }
        Self { registry }
    }
}

impl Default for CoreSetDecks {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckProvider for CoreSetDecks {
    fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn gold(&self) -> Decklist {
        Decklist::new("gold")
            .with(CardId::new(2), 9)
            .with(CardId::new(1), 8)
            .with(CardId::new(10), 4)
            .with(CardId::new(11), 4)
            .with(CardId::new(12), 3)
            .with(CardId::new(13), 3)
            .with(CardId::new(14), 2)
            .with(CardId::new(15), 2)
            .with(CardId::new(16), 2)
            .with(CardId::new(30), 3)
    }

    fn silver(&self) -> Decklist {
        Decklist::new("silver")
            .with(CardId::new(3), 9)
            .with(CardId::new(4), 8)
            .with(CardId::new(20), 4)
            .with(CardId::new(21), 3)
            .with(CardId::new(22), 3)
            .with(CardId::new(23), 2)
            .with(CardId::new(24), 3)
            .with(CardId::new(31), 4)
            .with(CardId::new(32), 2)
            .with(CardId::new(33), 2)
    }
}
