//! ECS Components для персонажей
//!
//! Организация по доменам:
//! - character: Character, Player, LocallyControlled
//! - movement: ориентация тела (MovementOrientation)
//! - camera: control rotation и view игрока (ControlRotation, PlayerView)
//!
//! Ability/attribute/lock-on state живёт в своих модулях
//! (abilities, attributes, targeting).

pub mod camera;
pub mod character;
pub mod movement;

// Re-exports для удобного импорта
pub use camera::*;
pub use character::*;
pub use movement::*;
