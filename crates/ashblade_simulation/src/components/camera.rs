//! Camera компоненты: control rotation и view игрока
//!
//! Камера рендерится во внешнем слое; здесь только то, что нужно lock-on:
//! куда смотрит контроллер и как спроецировать точку мира на экран.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_3;

/// Направление взгляда контроллера (радианы)
///
/// yaw = 0, pitch = 0 → смотрим вдоль -Z. Положительный pitch — вверх.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Rotation, смотрящий вдоль `direction`. None для нулевого вектора.
    pub fn looking_along(direction: Vec3) -> Option<Self> {
        let length = direction.length();
        if length <= f32::EPSILON {
            return None;
        }
        Some(Self {
            yaw: (-direction.x).atan2(-direction.z),
            pitch: (direction.y / length).clamp(-1.0, 1.0).asin(),
        })
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Z
    }
}

/// View игрока: проекция world → screen (обновляется host'ом каждый кадр)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerView {
    pub view_projection: Mat4,
    /// Размер viewport в пикселях
    pub viewport_size: Vec2,
    pub camera_location: Vec3,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self::looking_at(Vec3::ZERO, Vec3::NEG_Z, Vec2::new(1920.0, 1080.0))
    }
}

impl PlayerView {
    /// Перспективная камера в `eye`, смотрящая на `target`
    pub fn looking_at(eye: Vec3, target: Vec3, viewport_size: Vec2) -> Self {
        let aspect = viewport_size.x / viewport_size.y.max(1.0);
        let projection = Mat4::perspective_rh(FRAC_PI_3, aspect, 0.1, 1000.0);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        Self {
            view_projection: projection * view,
            viewport_size,
            camera_location: eye,
        }
    }

    /// Экранные координаты точки (пиксели, origin в левом верхнем углу)
    ///
    /// None если точка за камерой или вне viewport.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }

        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport_size.x,
            (1.0 - ndc.y) * 0.5 * self.viewport_size.y,
        ))
    }
}
