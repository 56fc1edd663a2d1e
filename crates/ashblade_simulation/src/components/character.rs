//! Базовые компоненты персонажа: Character, Player, LocallyControlled

use bevy::prelude::*;

use crate::abilities::{AbilityController, AbilityLoadout, AbilityTasks, InputBuffer, StateTags};
use crate::attributes::CharacterAttributes;
use crate::components::{ControlRotation, MovementOrientation, PlayerView};
use crate::targeting::LockOn;

/// Персонаж (игрок, враг) — всё что может использовать abilities и быть целью lock-on
///
/// Автоматически добавляет ability state, атрибуты и ориентацию через Required Components.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    StateTags,
    InputBuffer,
    AbilityTasks,
    AbilityController,
    AbilityLoadout,
    CharacterAttributes,
    MovementOrientation
)]
pub struct Character {
    /// Половина высоты капсулы (для точки прицеливания lock-on)
    pub capsule_half_height: f32,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            capsule_half_height: 0.9,
        }
    }
}

/// Marker: персонаж под управлением игрока (камера + lock-on)
///
/// Акторы БЕЗ этого компонента управляются AI/сетью и не лочат цели.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Character, LockOn, ControlRotation, PlayerView)]
pub struct Player;

/// Marker: input этого персонажа обрабатывается локально
///
/// Только у таких персонажей animation notify "fire buffered input" делает flush.
/// Remote proxies живут без него.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LocallyControlled;
