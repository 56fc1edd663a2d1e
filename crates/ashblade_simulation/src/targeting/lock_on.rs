//! Lock-on: компонент, события и чистая математика выбора/доводки цели

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Lock-on состояние персонажа
///
/// `target` — слабая ссылка: entity может исчезнуть в любой момент,
/// update_lock_on проверяет её каждый тик.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LockOn {
    pub target: Option<Entity>,
    pub locked: bool,
}

impl LockOn {
    pub fn locked_target(&self) -> Option<Entity> {
        if self.locked {
            self.target
        } else {
            None
        }
    }
}

/// Toggle lock-on (кнопка игрока)
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleLockOn {
    pub entity: Entity,
}

/// Look input (радианы за тик, уже с учётом чувствительности устройства)
#[derive(Event, Debug, Clone, Copy)]
pub struct LookInput {
    pub entity: Entity,
    pub yaw: f32,
    pub pitch: f32,
}

/// Цель lock-on сменилась (None → unlock)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOnChanged {
    pub entity: Entity,
    pub target: Option<Entity>,
}

/// Кандидат, ближайший к центру экрана
///
/// `candidates` — экранные позиции (пиксели). Центрируем вычитанием
/// половины viewport и берём минимальную квадратную длину.
pub fn select_nearest_to_crosshair(
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
    viewport_size: Vec2,
) -> Option<Entity> {
    let half_viewport = viewport_size * 0.5;
    candidates
        .into_iter()
        .map(|(entity, screen)| (entity, (screen - half_viewport).length_squared()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Точка прицеливания: центр цели + доля half-height вверх
pub fn aim_point(target_location: Vec3, capsule_half_height: f32, height_ratio: f32) -> Vec3 {
    target_location + Vec3::Y * (capsule_half_height * height_ratio)
}

/// Угол в диапазон [-PI, PI)
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Плавная доводка угла к цели по кратчайшей дуге
///
/// Шаг = delta * clamp(dt * speed, 0, 1). speed <= 0 → мгновенно.
pub fn interp_angle(current: f32, target: f32, delta_secs: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let delta = wrap_angle(target - current);
    if delta.abs() < 1e-4 {
        return target;
    }

    let alpha = (delta_secs * speed).clamp(0.0, 1.0);
    wrap_angle(current + delta * alpha)
}
