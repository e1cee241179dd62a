//! Two-seat tap-land duel.
//!
//! A small MTG-like game that drives the environment:
//! - Each seat starts at 20 life with a 40-card deck and a 7-card hand
//! - One land per turn; lands tap for one mana each
//! - Creatures attack and block; damage is dealt simultaneously
//! - Burn is instant speed and goes on the stack; everything else is sorcery speed
//! - A seat loses at 0 life or when drawing from an empty library

mod game;

pub use game::Duel;
