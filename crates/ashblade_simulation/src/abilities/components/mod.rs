//! Ability components (per-character state)

pub mod buffer;
pub mod loadout;
pub mod tags;
pub mod tasks;
pub mod weapon;

// Re-export all components
pub use buffer::*;
pub use loadout::*;
pub use tags::*;
pub use tasks::*;
pub use weapon::*;
