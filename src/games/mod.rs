//! Concrete rules engines.

pub mod duel;
