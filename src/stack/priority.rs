//! Priority-based stack resolution.
//!
//! Spells are pushed onto a stack and resolve in LIFO order. Priority
//! alternates between the two seats; when both pass in succession, the
//! top of the stack resolves (or, with an empty stack, the step ends).

use serde::{Deserialize, Serialize};

use crate::core::{DamageTarget, EntityId, PlayerId};

/// A spell waiting to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The card being cast (it sits in the stack zone meanwhile).
    pub card: EntityId,

    /// Seat that cast it.
    pub controller: PlayerId,

    /// Chosen target, for spells that take one.
    pub target: Option<DamageTarget>,
}

/// Outcome of a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The other seat now holds priority.
    Continue,
    /// Both seats passed in succession.
    AllPassed,
}

/// Priority stack for a two-seat game.
///
/// 1. A seat receives priority (`give_priority`)
/// 2. Casting pushes an entry; the caster keeps priority
/// 3. A pass hands priority to the other seat
/// 4. Two consecutive passes report `AllPassed`; the caller resolves the
///    top entry (`pop`) or ends the step
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriorityStack {
    /// index 0 = bottom, last = top
    entries: Vec<StackEntry>,

    holder: PlayerId,

    consecutive_passes: u8,
}

impl PriorityStack {
    #[must_use]
    pub fn new(holder: PlayerId) -> Self {
        Self {
            entries: Vec::new(),
            holder,
            consecutive_passes: 0,
        }
    }

    /// Seat currently holding priority.
    #[must_use]
    pub fn holder(&self) -> PlayerId {
        self.holder
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries bottom to top.
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Give priority to a seat and forget earlier passes.
    pub fn give_priority(&mut self, player: PlayerId) {
        self.holder = player;
        self.consecutive_passes = 0;
    }

    /// The holder passes.
    pub fn pass(&mut self) -> PassOutcome {
        self.consecutive_passes += 1;
        if self.consecutive_passes >= 2 {
            PassOutcome::AllPassed
        } else {
            self.holder = self.holder.opponent();
            PassOutcome::Continue
        }
    }

    /// Put a spell on the stack. Its controller keeps priority.
    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry);
        self.give_priority(entry.controller);
    }

    /// Remove the top entry for resolution.
    pub fn pop(&mut self) -> Option<StackEntry> {
        self.consecutive_passes = 0;
        self.entries.pop()
    }
}
