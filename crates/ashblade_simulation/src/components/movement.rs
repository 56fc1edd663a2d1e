//! Movement компоненты: ориентация тела

use bevy::prelude::*;

/// Поворачивать ли тело по направлению движения
///
/// Movement layer (внешний) читает флаг. Lock-on выключает его,
/// чтобы тело смотрело на цель, и восстанавливает при unlock.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MovementOrientation {
    pub orient_to_movement: bool,
}

impl Default for MovementOrientation {
    fn default() -> Self {
        Self {
            orient_to_movement: true,
        }
    }
}
