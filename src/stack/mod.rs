//! Stack and priority.
//!
//! The duel uses MTG-style priority: spells queue on a stack and resolve
//! last-in first-out once both seats pass in succession.

mod priority;

pub use priority::{PassOutcome, PriorityStack, StackEntry};
