//! Move representation.
//!
//! A `Move` is one complete choice available to the seat holding priority.
//! Moves name the card instances they involve; the engine enumerates them in
//! a fixed order so that an index into the legal-move list is meaningful.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// Something that can be dealt damage: a seat or a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTarget {
    Player(PlayerId),
    Creature(EntityId),
}

impl std::fmt::Display for DamageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageTarget::Player(p) => write!(f, "{p}"),
            DamageTarget::Creature(e) => write!(f, "creature {e}"),
        }
    }
}

/// A complete game move.
///
/// ## Example
///
/// ```
/// use ccg_gym::core::{DamageTarget, EntityId, Move, PlayerId};
///
/// let bolt = Move::Cast {
///     card: EntityId(12),
///     target: Some(DamageTarget::Player(PlayerId::SECOND)),
/// };
/// assert!(!bolt.is_pass());
/// assert!(Move::Pass.is_pass());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Pass priority, or finish a combat declaration.
    Pass,
    /// Put a land from hand onto the battlefield.
    PlayLand(EntityId),
    /// Cast a spell from hand, with a target when the spell needs one.
    Cast {
        card: EntityId,
        target: Option<DamageTarget>,
    },
    /// Declare a creature as an attacker.
    Attack(EntityId),
    /// Declare `blocker` as blocking `attacker`.
    Block { blocker: EntityId, attacker: EntityId },
}

impl Move {
    /// Check if this is a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::PlayLand(card) => write!(f, "play land {card}"),
            Move::Cast { card, target: None } => write!(f, "cast {card}"),
            Move::Cast {
                card,
                target: Some(t),
            } => write!(f, "cast {card} targeting {t}"),
            Move::Attack(card) => write!(f, "attack with {card}"),
            Move::Block { blocker, attacker } => write!(f, "block {attacker} with {blocker}"),
        }
    }
}

/// A move as recorded in the engine's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The seat that made the move.
    pub player: PlayerId,

    /// The move made.
    pub mv: Move,

    /// Whether the caller flagged the move as a response.
    pub is_response: bool,

    /// Turn number when the move was made.
    pub turn: u32,
}
