//! Engine trait: the boundary between the environment and a rules engine.
//!
//! An engine owns one live two-seat game. The environment only ever:
//! - builds a fresh engine from two decklists and starts it
//! - asks who holds priority and what they may do
//! - applies one move at a time
//! - reads zone sizes and flags back out
//!
//! Everything else (mana, combat, the stack, deciding who lost) is the
//! engine's business.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardId, CardRegistry};
use crate::core::{EnvConfig, Move, Phase, PlayerId};
use crate::decks::Decklist;

/// Engine-level failures. The environment passes these through untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("game has not been started")]
    NotStarted,
    #[error("{player} cannot make move `{mv}` in the current state")]
    IllegalMove { player: PlayerId, mv: Move },
    #[error("decklist references unknown card {0}")]
    UnknownCard(CardId),
    #[error("deck `{0}` is empty")]
    EmptyDeck(String),
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Both seats lost at the same time.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// One seat's full state, for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: PlayerId,
    pub life: i32,
    pub has_lost: bool,
    pub is_active: bool,
    pub has_priority: bool,
    pub phase: Phase,
    /// Hand contents, in hand order.
    pub hand: Vec<String>,
    pub library_size: usize,
    /// Graveyard contents, bottom to top.
    pub graveyard: Vec<String>,
    /// This seat's permanents, in arrival order.
    pub battlefield: Vec<String>,
}

impl std::fmt::Display for PlayerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags = Vec::new();
        if self.is_active {
            tags.push("active");
        }
        if self.has_priority {
            tags.push("priority");
        }
        if self.has_lost {
            tags.push("lost");
        }
        write!(f, "{} life {}", self.player, self.life)?;
        if !tags.is_empty() {
            write!(f, " [{}]", tags.join(", "))?;
        }
        writeln!(f, " ({} step)", self.phase)?;
        writeln!(f, "  hand ({}): {}", self.hand.len(), self.hand.join(", "))?;
        writeln!(f, "  library: {}", self.library_size)?;
        writeln!(f, "  graveyard ({}): {}", self.graveyard.len(), self.graveyard.join(", "))?;
        write!(f, "  battlefield ({}): {}", self.battlefield.len(), self.battlefield.join(", "))
    }
}

/// Rules engine for one two-seat game.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty for a seat without priority and after the game ends
/// - `apply_move`: must reject anything not in `legal_moves(priority_holder())`
///   and leave the state untouched when it does
/// - Same decks and seed must replay the same game
pub trait Engine: Sized {
    /// Build a game from the two starting decks. Does not start it.
    fn new_game(
        gold: &Decklist,
        silver: &Decklist,
        registry: &CardRegistry,
        config: &EnvConfig,
        seed: u64,
    ) -> Result<Self, EngineError>;

    /// Shuffle, draw opening hands, and hand priority to the first seat.
    fn start_game(&mut self) -> Result<(), EngineError>;

    /// Seat currently entitled to choose a move.
    fn priority_holder(&self) -> PlayerId;

    /// Ordered legal moves for `player` at this instant.
    fn legal_moves(&self, player: PlayerId) -> Vec<Move>;

    /// Apply a move for the priority holder. `is_response` is recorded only.
    fn apply_move(&mut self, mv: Move, is_response: bool) -> Result<(), EngineError>;

    /// Display snapshot of one seat.
    fn state(&self, player: PlayerId) -> PlayerView;

    /// Whether the game has concluded.
    fn is_over(&self) -> bool {
        PlayerId::both().any(|p| self.has_lost(p))
    }

    /// Outcome once the game has concluded.
    fn result(&self) -> Option<GameResult> {
        match (self.has_lost(PlayerId::FIRST), self.has_lost(PlayerId::SECOND)) {
            (false, false) => None,
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::SECOND)),
            (false, true) => Some(GameResult::Winner(PlayerId::FIRST)),
        }
    }

    // === Seat records ===

    fn life(&self, player: PlayerId) -> i32;
    fn has_lost(&self, player: PlayerId) -> bool;
    fn hand_size(&self, player: PlayerId) -> usize;
    fn graveyard_size(&self, player: PlayerId) -> usize;
    /// Undrawn cards remaining.
    fn library_size(&self, player: PlayerId) -> usize;

    // === Shared zones ===

    fn battlefield_size(&self) -> usize;
    fn attacker_count(&self) -> usize;
    fn blocker_count(&self) -> usize;
    /// Number of things that could be dealt damage right now.
    fn damage_target_count(&self) -> usize;
    fn stack_is_empty(&self) -> bool;
    fn active_player(&self) -> PlayerId;
    fn phase(&self) -> Phase;
}
