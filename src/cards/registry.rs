//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition a deck provider can
//! reference and resolves `CardId`s and names to definitions.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_gym::cards::{CardDefinition, CardId, CardKind, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Shock", 1, CardKind::Burn { damage: 2 }));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Shock");
/// assert_eq!(registry.by_name("Shock").unwrap().id, CardId::new(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    names: FxHashMap<String, CardId>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if the ID or the name is already registered.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        if self.names.contains_key(&card.name) {
            panic!("Card named {:?} already registered", card.name);
        }
        self.names.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Look a definition up by its exact name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.names.get(name).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::land(CardId::new(1), "Plains"));

        assert!(registry.contains(CardId::new(1)));
        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Plains");
        assert!(registry.get(CardId::new(99)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(
            CardId::new(4),
            "Healing Salve",
            1,
            CardKind::Lifegain { amount: 3 },
        ));

        assert_eq!(registry.by_name("Healing Salve").map(|c| c.id), Some(CardId::new(4)));
        assert!(registry.by_name("healing salve").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::land(CardId::new(1), "Plains"));
        registry.register(CardDefinition::land(CardId::new(1), "Forest"));
    }
}
