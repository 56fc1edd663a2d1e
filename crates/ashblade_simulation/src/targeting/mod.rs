//! Target-lock: выбор цели у прицела и доводка камеры/тела
//!
//! Рендер камеры — внешний; ядро ведёт ControlRotation и yaw тела,
//! host применяет их к своей камере.

use bevy::prelude::*;

pub mod lock_on;
pub mod systems;


pub use lock_on::*;
pub use systems::{apply_look_input, process_lock_on_toggles, update_lock_on};

/// Targeting Plugin
///
/// 1. process_lock_on_toggles — lock/unlock по кнопке
/// 2. apply_look_input — ручной поворот камеры
/// 3. update_lock_on — валидация цели + интерполяция к ней
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LockOn>()
            .add_event::<ToggleLockOn>()
            .add_event::<LookInput>()
            .add_event::<LockOnChanged>();

        app.add_systems(
            FixedUpdate,
            (process_lock_on_toggles, apply_look_input, update_lock_on).chain(),
        );
    }
}
