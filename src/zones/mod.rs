//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `ZoneId`: Zone identifier (from `core::config`)
//! - `ZoneManager`: Card location tracking and movement
//! - `ZonePosition`: Top or bottom insertion

pub mod manager;

pub use manager::{ZoneManager, ZonePosition};

pub use crate::core::config::ZoneId;
