//! Lock-on integration tests
//!
//! Камера игрока в origin смотрит вдоль -Z, viewport 200x200.

mod common;

use bevy::prelude::*;

use ashblade_simulation::*;
use common::*;

fn toggle(app: &mut App, entity: Entity) {
    app.world_mut().send_event(ToggleLockOn { entity });
}

fn lock_on_of(app: &App, entity: Entity) -> LockOn {
    app.world().get::<LockOn>(entity).copied().unwrap_or_default()
}

fn orient_to_movement(app: &App, entity: Entity) -> bool {
    app.world()
        .get::<MovementOrientation>(entity)
        .map(|orientation| orientation.orient_to_movement)
        .unwrap_or(true)
}

#[test]
fn test_toggle_locks_nearest_to_crosshair() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);
    let far = spawn_enemy(&mut app, Vec3::new(4.0, 0.0, -10.0));
    let near = spawn_enemy(&mut app, Vec3::new(1.0, 0.0, -10.0));
    // За спиной — не проецируется
    spawn_enemy(&mut app, Vec3::new(0.0, 0.0, 5.0));

    toggle(&mut app, player);
    tick(&mut app, 1);

    let lock_on = lock_on_of(&app, player);
    assert!(lock_on.locked);
    assert_eq!(lock_on.target, Some(near));
    assert_ne!(lock_on.target, Some(far));
    assert!(!orient_to_movement(&app, player));

    let changes = drain::<LockOnChanged>(&mut app);
    assert_eq!(
        changes,
        vec![LockOnChanged {
            entity: player,
            target: Some(near),
        }]
    );
}

#[test]
fn test_toggle_without_candidates_stays_unlocked() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);
    spawn_enemy(&mut app, Vec3::new(0.0, 0.0, 10.0));

    toggle(&mut app, player);
    tick(&mut app, 1);

    let lock_on = lock_on_of(&app, player);
    assert!(!lock_on.locked);
    assert_eq!(lock_on.target, None);
    assert!(orient_to_movement(&app, player));
}

#[test]
fn test_second_toggle_unlocks() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);
    spawn_enemy(&mut app, Vec3::new(1.0, 0.0, -10.0));

    toggle(&mut app, player);
    tick(&mut app, 1);
    assert!(lock_on_of(&app, player).locked);

    toggle(&mut app, player);
    tick(&mut app, 1);
    assert!(!lock_on_of(&app, player).locked);
    assert!(orient_to_movement(&app, player));
}

#[test]
fn test_locked_rotation_interpolates_toward_target() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);
    spawn_enemy(&mut app, Vec3::new(3.0, 0.0, -10.0));

    toggle(&mut app, player);
    tick(&mut app, 1);

    let desired_yaw = (-3.0f32).atan2(10.0);
    let first = *app.world().get::<ControlRotation>(player).expect("rotation");
    // Интерполяция, не snap: сдвинулись, но не до конца
    assert!(first.yaw < 0.0);
    assert!(first.yaw > desired_yaw);

    tick(&mut app, 60);
    let settled = *app.world().get::<ControlRotation>(player).expect("rotation");
    assert!((settled.yaw - desired_yaw).abs() < 1e-2);
    // Точка прицеливания чуть выше центра цели
    assert!(settled.pitch > 0.0);

    // Тело повернулось по yaw, без наклона
    let body = app.world().get::<Transform>(player).expect("transform");
    let (body_yaw, body_pitch, _) = body.rotation.to_euler(EulerRot::YXZ);
    assert!((body_yaw - desired_yaw).abs() < 1e-2);
    assert!(body_pitch.abs() < 1e-4);
}

#[test]
fn test_destroyed_target_unlocks_next_tick() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);
    let target = spawn_enemy(&mut app, Vec3::new(1.0, 0.0, -10.0));

    toggle(&mut app, player);
    tick(&mut app, 1);
    assert_eq!(lock_on_of(&app, player).target, Some(target));
    drain::<LockOnChanged>(&mut app);

    app.world_mut().despawn(target);
    tick(&mut app, 1);

    let lock_on = lock_on_of(&app, player);
    assert!(!lock_on.locked);
    assert_eq!(lock_on.target, None);
    assert!(orient_to_movement(&app, player));
    assert_eq!(
        drain::<LockOnChanged>(&mut app),
        vec![LockOnChanged {
            entity: player,
            target: None,
        }]
    );
}

#[test]
fn test_look_input_scaled_while_locked() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);

    app.world_mut().send_event(LookInput {
        entity: player,
        yaw: 0.2,
        pitch: 0.0,
    });
    tick(&mut app, 1);
    let free = app.world().get::<ControlRotation>(player).expect("rotation").yaw;
    assert!((free - 0.2).abs() < 1e-6);

    // Lock на цель прямо по центру, потом look input почти не влияет
    spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -10.0));
    app.world_mut().get_mut::<ControlRotation>(player).expect("rotation").yaw = 0.0;
    toggle(&mut app, player);
    tick(&mut app, 1);

    let before = app.world().get::<ControlRotation>(player).expect("rotation").yaw;
    app.world_mut().send_event(LookInput {
        entity: player,
        yaw: 0.2,
        pitch: 0.0,
    });
    tick(&mut app, 1);
    let after = app.world().get::<ControlRotation>(player).expect("rotation").yaw;

    // 0.2 * 0.05 = 0.01, затем доводка тянет обратно к цели
    assert!((after - before).abs() <= 0.01 + 1e-6);
}
