//! Lock-on systems: toggle, look input, доводка камеры и тела

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::components::{Character, ControlRotation, MovementOrientation, PlayerView};
use crate::config::CombatTuning;
use crate::targeting::{
    aim_point, interp_angle, select_nearest_to_crosshair, LockOn, LockOnChanged, LookInput,
    ToggleLockOn,
};

/// Запас от вертикали, чтобы yaw не вырождался
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

fn lock(
    entity: Entity,
    target: Entity,
    lock_on: &mut LockOn,
    orientation: &mut MovementOrientation,
    changed: &mut EventWriter<LockOnChanged>,
) {
    orientation.orient_to_movement = false;
    lock_on.target = Some(target);
    lock_on.locked = true;
    changed.write(LockOnChanged {
        entity,
        target: Some(target),
    });
    crate::logger::log(&format!("🎯 ECS: {:?} locked on {:?}", entity, target));
}

fn unlock(
    entity: Entity,
    lock_on: &mut LockOn,
    orientation: &mut MovementOrientation,
    changed: &mut EventWriter<LockOnChanged>,
) {
    let was_locked = lock_on.locked;
    orientation.orient_to_movement = true;
    lock_on.target = None;
    lock_on.locked = false;
    if was_locked {
        changed.write(LockOnChanged {
            entity,
            target: None,
        });
        crate::logger::log(&format!("🎯 ECS: {:?} lock released", entity));
    }
}

/// System: ToggleLockOn → выбрать ближайшую к прицелу цель или снять lock
pub fn process_lock_on_toggles(
    mut toggles: EventReader<ToggleLockOn>,
    mut lockers: Query<(&mut LockOn, &mut MovementOrientation, Option<&PlayerView>)>,
    candidates: Query<(Entity, &Transform), With<Character>>,
    mut changed: EventWriter<LockOnChanged>,
) {
    for event in toggles.read() {
        let Ok((mut lock_on, mut orientation, view)) = lockers.get_mut(event.entity) else {
            continue;
        };

        if lock_on.locked {
            unlock(event.entity, &mut lock_on, &mut orientation, &mut changed);
            continue;
        }

        let Some(view) = view else {
            crate::logger::log_warning(&format!(
                "⚠️ ECS: {:?} toggled lock-on without PlayerView",
                event.entity
            ));
            continue;
        };

        let on_screen = candidates
            .iter()
            .filter(|(candidate, _)| *candidate != event.entity)
            .filter_map(|(candidate, transform)| {
                view.project(transform.translation)
                    .map(|screen| (candidate, screen))
            });

        match select_nearest_to_crosshair(on_screen, view.viewport_size) {
            Some(target) => lock(event.entity, target, &mut lock_on, &mut orientation, &mut changed),
            None => unlock(event.entity, &mut lock_on, &mut orientation, &mut changed),
        }
    }
}

/// System: look input игрока (ослаблен пока камера залочена)
pub fn apply_look_input(
    mut looks: EventReader<LookInput>,
    mut rotations: Query<(&mut ControlRotation, Option<&LockOn>)>,
    tuning: Res<CombatTuning>,
) {
    for event in looks.read() {
        let Ok((mut rotation, lock_on)) = rotations.get_mut(event.entity) else {
            continue;
        };

        let scale = if lock_on.is_some_and(|lock_on| lock_on.locked) {
            tuning.locked_look_sensitivity
        } else {
            1.0
        };

        rotation.yaw = crate::targeting::wrap_angle(rotation.yaw + event.yaw * scale);
        rotation.pitch = (rotation.pitch + event.pitch * scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// System: пока залочены — доводим control rotation и yaw тела к цели
///
/// Цель исчезла (despawn / больше не Character) → unlock в этом же тике.
/// Transform и цели, и залоченного могут совпадать → ParamSet.
pub fn update_lock_on(
    time: Res<Time<Fixed>>,
    tuning: Res<CombatTuning>,
    mut lockers: Query<(
        Entity,
        &mut LockOn,
        &mut MovementOrientation,
        &mut ControlRotation,
        Option<&PlayerView>,
    )>,
    mut transforms: ParamSet<(
        Query<(&Transform, &Character)>,
        Query<&mut Transform>,
    )>,
    mut changed: EventWriter<LockOnChanged>,
) {
    let delta = time.delta_secs();
    let speed = tuning.lock_on_interp_speed;

    // Фаза 1: читаем позиции целей и тел
    let mut aims: Vec<(Entity, Option<Vec3>, Option<Vec3>)> = Vec::new();
    {
        let positions = transforms.p0();
        for (entity, lock_on, ..) in lockers.iter() {
            let Some(target) = lock_on.locked_target() else {
                continue;
            };

            let aim = positions.get(target).ok().map(|(transform, character)| {
                aim_point(
                    transform.translation,
                    character.capsule_half_height,
                    tuning.lock_on_aim_height_ratio,
                )
            });
            let body = positions.get(entity).ok().map(|(transform, _)| transform.translation);
            aims.push((entity, aim, body));
        }
    }

    // Фаза 2: unlock или доводка
    for (entity, aim, body) in aims {
        let Ok((_, mut lock_on, mut orientation, mut rotation, view)) = lockers.get_mut(entity) else {
            continue;
        };

        let Some(aim) = aim else {
            unlock(entity, &mut lock_on, &mut orientation, &mut changed);
            continue;
        };

        let camera_location = view.map(|view| view.camera_location).or(body).unwrap_or(Vec3::ZERO);
        if let Some(desired) = ControlRotation::looking_along(aim - camera_location) {
            rotation.yaw = interp_angle(rotation.yaw, desired.yaw, delta, speed);
            rotation.pitch = interp_angle(rotation.pitch, desired.pitch, delta, speed)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        // Тело: только yaw, pitch/roll не трогаем
        let Some(body) = body else {
            continue;
        };
        let Some(desired) = ControlRotation::looking_along(aim - body) else {
            continue;
        };
        let mut bodies = transforms.p1();
        let Ok(mut transform) = bodies.get_mut(entity) else {
            continue;
        };
        let (yaw, pitch, roll) = transform.rotation.to_euler(EulerRot::YXZ);
        let new_yaw = interp_angle(yaw, desired.yaw, delta, speed);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, new_yaw, pitch, roll);
    }
}
