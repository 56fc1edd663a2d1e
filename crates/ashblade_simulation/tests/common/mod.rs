//! Общие helpers для integration тестов

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use ashblade_simulation::abilities::TaskHandle;
use ashblade_simulation::*;

/// Headless App: один app.update() == один fixed tick (1/60s)
pub fn create_test_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    // Первый update — нулевая delta, fixed tick не выполняется
    app.update();
    app
}

pub fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

pub fn combo_weapon() -> MainHandWeapon {
    MainHandWeapon::new([
        AnimationClip::new("attack_1"),
        AnimationClip::new("attack_2"),
        AnimationClip::new("attack_3"),
    ])
}

pub fn test_loadout() -> AbilityLoadout {
    AbilityLoadout::with_clips(AnimationClip::new("guard"), AnimationClip::new("roll"))
}

/// Игрок (locally controlled) с камерой в origin, смотрящей вдоль -Z
pub fn spawn_player(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            LocallyControlled,
            combo_weapon(),
            test_loadout(),
            PlayerView::looking_at(Vec3::ZERO, Vec3::NEG_Z, Vec2::new(200.0, 200.0)),
        ))
        .id()
}

pub fn spawn_enemy(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Character::default(), Transform::from_translation(position)))
        .id()
}

pub fn possess(app: &mut App, entity: Entity) {
    app.world_mut().send_event(CharacterPossessed { entity });
    app.update();
}

pub fn press(app: &mut App, entity: Entity, input: AbilityInput) {
    app.world_mut()
        .send_event(AbilityInputEvent::pressed(entity, input));
}

pub fn release(app: &mut App, entity: Entity, input: AbilityInput) {
    app.world_mut()
        .send_event(AbilityInputEvent::released(entity, input));
}

/// Забрать все накопленные события типа E
pub fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

pub fn combo_steps(events: &[AbilityLifecycleEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event.kind {
            LifecycleKind::ComboStep { step } => Some(step),
            _ => None,
        })
        .collect()
}

/// Tracked анимации в порядке запуска: (clip, task)
pub fn tracked_plays(requests: &[AnimationRequest]) -> Vec<(String, TaskHandle)> {
    requests
        .iter()
        .filter_map(|request| match &request.command {
            AnimationCommand::Play {
                clip,
                task: Some(task),
            } => Some((clip.name().to_string(), *task)),
            _ => None,
        })
        .collect()
}

pub fn tags_of(app: &App, entity: Entity) -> StateTags {
    app.world()
        .get::<StateTags>(entity)
        .copied()
        .unwrap_or_default()
}

pub fn finish_animation(app: &mut App, entity: Entity, task: TaskHandle, outcome: AnimationOutcome) {
    app.world_mut().send_event(AnimationTaskFinished {
        entity,
        task,
        outcome,
    });
}
