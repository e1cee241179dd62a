//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardKind`: What a card does (land, creature, spell effect)
//! - `CardDefinition`: Static card data
//! - `CardInstance`: Runtime card state (zone, tapped, damage)
//! - `CardRegistry`: Card definition lookup

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardKind};
pub use instance::CardInstance;
pub use registry::CardRegistry;
