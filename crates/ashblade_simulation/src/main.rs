//! Headless симуляция Ashblade
//!
//! Прогоняет скриптованный бой без рендера: combo с буфером, block/parry,
//! lock-on, roll и урон. Animation layer заменён фейковым аниматором,
//! который завершает tracked анимации через фиксированное число тиков.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use ashblade_simulation::abilities::TaskHandle;
use ashblade_simulation::*;

/// Длительность любой tracked анимации в фейковом аниматоре (тики)
const FAKE_ANIMATION_TICKS: u32 = 24;

#[derive(Resource, Default)]
struct FakeAnimator {
    playing: Vec<(Entity, TaskHandle, u32)>,
}

fn run_fake_animator(
    mut requests: EventReader<AnimationRequest>,
    mut animator: ResMut<FakeAnimator>,
    mut finished: EventWriter<AnimationTaskFinished>,
) {
    for request in requests.read() {
        if let AnimationCommand::Play {
            task: Some(task), ..
        } = &request.command
        {
            animator.playing.push((request.entity, *task, FAKE_ANIMATION_TICKS));
        }
    }

    animator.playing.retain_mut(|(entity, task, remaining)| {
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return true;
        }
        finished.write(AnimationTaskFinished {
            entity: *entity,
            task: *task,
            outcome: AnimationOutcome::Completed,
        });
        false
    });
}

fn print_lifecycle(mut events: EventReader<AbilityLifecycleEvent>) {
    for event in events.read() {
        println!("  {:?}: {:?} {:?}", event.entity, event.ability, event.kind);
    }
}

fn main() {
    println!("Starting Ashblade headless simulation");

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .init_resource::<FakeAnimator>()
        .add_systems(FixedUpdate, (run_fake_animator, print_lifecycle));

    let player = app
        .world_mut()
        .spawn((
            Player,
            LocallyControlled,
            Transform::default(),
            MainHandWeapon::new([
                AnimationClip::new("slash_1"),
                AnimationClip::new("slash_2"),
                AnimationClip::new("thrust"),
            ]),
            AbilityLoadout::with_clips(AnimationClip::new("guard"), AnimationClip::new("roll")),
            PlayerView::looking_at(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 1.0, -5.0), Vec2::new(1920.0, 1080.0)),
        ))
        .id();
    let enemy = app
        .world_mut()
        .spawn((Character::default(), Transform::from_xyz(1.0, 0.0, -6.0)))
        .id();

    for tick in 0..240 {
        let world = app.world_mut();
        match tick {
            1 => {
                world.send_event(CharacterPossessed { entity: player });
            }
            5 => {
                world.send_event(AbilityInputEvent::pressed(player, AbilityInput::ComboAttack));
            }
            12 => {
                // ComboLocked → уходит в буфер
                world.send_event(AbilityInputEvent::pressed(player, AbilityInput::ComboAttack));
            }
            14 => {
                world.send_event(StateWindowEvent {
                    entity: player,
                    tag: StateTag::ComboLocked,
                    phase: WindowPhase::End,
                });
                world.send_event(FireBufferedInput { entity: player });
            }
            60 => {
                world.send_event(AbilityInputEvent::pressed(player, AbilityInput::Block));
            }
            100 => {
                world.send_event(AbilityInputEvent::released(player, AbilityInput::Block));
            }
            110 => {
                world.send_event(ToggleLockOn { entity: player });
            }
            130 => {
                world.send_event(AbilityInputEvent::pressed(player, AbilityInput::Roll));
            }
            170 => {
                if let Some(mut attributes) = world.get_mut::<CharacterAttributes>(player) {
                    attributes.apply(GameplayAttribute::Health, -25.0);
                }
                world.send_event(AttributeMutated {
                    entity: player,
                    attribute: GameplayAttribute::Health,
                    magnitude: -25.0,
                });
            }
            200 => {
                world.despawn(enemy);
            }
            _ => {}
        }

        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let tags: Vec<_> = world
                .get::<StateTags>(player)
                .map(|tags| tags.iter().collect())
                .unwrap_or_default();
            let locked = world.get::<LockOn>(player).and_then(|lock_on| lock_on.locked_target());
            println!("Tick {}: tags {:?}, lock-on {:?}", tick, tags, locked);
        }
    }

    let world = app.world();
    println!(
        "Simulation complete! clock {:.2}s, lock-on {:?}",
        world.resource::<CombatClock>().elapsed(),
        world.get::<LockOn>(player).and_then(|lock_on| lock_on.locked_target())
    );
}
