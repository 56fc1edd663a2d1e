//! Combat tuning — единая точка для всех таймингов и коэффициентов
//!
//! Значения по умолчанию совпадают с константами ниже. Host может
//! подменить resource целиком (например, загрузив из RON/JSON через serde).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Длительность parry sub-window с момента активации блока (секунды)
pub const PARRY_WINDOW_SECS: f64 = 0.5;

/// Сколько живёт buffered input (секунды).
///
/// 0.25s — значение, которое реально использовалось для flush;
/// встречающееся в документации 0.5s не применяется.
pub const INPUT_BUFFER_WINDOW_SECS: f64 = 0.25;

/// Скорость интерполяции камеры/тела к lock-on цели
pub const LOCK_ON_INTERP_SPEED: f32 = 10.0;

/// Доля half-height цели, добавляемая к точке прицеливания
pub const LOCK_ON_AIM_HEIGHT_RATIO: f32 = 0.3;

/// Множитель look input пока камера залочена
pub const LOCKED_LOOK_SENSITIVITY: f32 = 0.05;

/// Resource с таймингами ability core
#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct CombatTuning {
    pub parry_window_secs: f64,
    pub input_buffer_window_secs: f64,
    pub lock_on_interp_speed: f32,
    pub lock_on_aim_height_ratio: f32,
    pub locked_look_sensitivity: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            parry_window_secs: PARRY_WINDOW_SECS,
            input_buffer_window_secs: INPUT_BUFFER_WINDOW_SECS,
            lock_on_interp_speed: LOCK_ON_INTERP_SPEED,
            lock_on_aim_height_ratio: LOCK_ON_AIM_HEIGHT_RATIO,
            locked_look_sensitivity: LOCKED_LOOK_SENSITIVITY,
        }
    }
}
