//! Ability systems: тонкие ECS адаптеры над AbilityController
//!
//! Каждая система собирает AbilityContext из компонентов владельца,
//! вызывает controller и отправляет накопленный output событиями.

use bevy::ecs::query::QueryItem;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::abilities::{
    Ability, AbilityContext, AbilityController, AbilityInputEvent, AbilityKind,
    AbilityLifecycleEvent, AbilityLoadout, AbilityOutput, AbilityTasks, AnimationOutcome,
    AnimationRequest, AnimationTaskFinished, BlockParryAbility, CharacterPossessed, CombatClock,
    ComboAttackAbility, FireBufferedInput, InputAction, InputBuffer, MainHandWeapon, RollAbility,
    StateTags, StateWindowEvent, TaskEvent, WindowPhase,
};
use crate::attributes::CharacterAttributes;
use crate::components::LocallyControlled;
use crate::config::CombatTuning;

/// Компоненты, из которых собирается AbilityContext
pub type AbilityOwnerData = (
    Entity,
    &'static mut AbilityController,
    &'static mut StateTags,
    &'static mut InputBuffer,
    &'static mut AbilityTasks,
    Option<&'static MainHandWeapon>,
);

/// Выход abilities → события для animation layer / UI
#[derive(SystemParam)]
pub struct AbilityOutputWriters<'w> {
    animation_requests: EventWriter<'w, AnimationRequest>,
    lifecycle_events: EventWriter<'w, AbilityLifecycleEvent>,
}

impl AbilityOutputWriters<'_> {
    fn flush(&mut self, entity: Entity, output: AbilityOutput) {
        for command in output.animations {
            self.animation_requests.write(AnimationRequest { entity, command });
        }
        for (ability, kind) in output.lifecycle {
            self.lifecycle_events.write(AbilityLifecycleEvent {
                entity,
                ability,
                kind,
            });
        }
    }
}

/// Вызвать controller с контекстом владельца и отправить output
fn with_ability_context<R>(
    (entity, mut controller, mut tags, mut buffer, mut tasks, weapon): QueryItem<'_, AbilityOwnerData>,
    now: f64,
    tuning: &CombatTuning,
    writers: &mut AbilityOutputWriters,
    f: impl FnOnce(&mut AbilityController, &mut AbilityContext) -> R,
) -> R {
    let mut output = AbilityOutput::default();
    let result = {
        let mut ctx = AbilityContext {
            owner: entity,
            now,
            tags: &mut *tags,
            buffer: &mut *buffer,
            tasks: &mut *tasks,
            main_hand: weapon,
            tuning,
            output: &mut output,
        };
        f(&mut *controller, &mut ctx)
    };
    writers.flush(entity, output);
    result
}

fn build_ability(kind: AbilityKind, loadout: &AbilityLoadout) -> Box<dyn Ability> {
    match kind {
        AbilityKind::ComboAttack => Box::new(ComboAttackAbility::new()),
        AbilityKind::BlockParry => Box::new(BlockParryAbility::new(loadout.guard_clip.clone())),
        AbilityKind::Roll => Box::new(RollAbility::new(loadout.roll_clip.clone())),
    }
}

/// System: possession → сброс состояния, health, grant abilities из loadout
pub fn grant_abilities_on_possession(
    mut possessed: EventReader<CharacterPossessed>,
    mut owners: Query<AbilityOwnerData>,
    mut profiles: Query<(Option<&AbilityLoadout>, Option<&mut CharacterAttributes>)>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut writers: AbilityOutputWriters,
) {
    for event in possessed.read() {
        let Ok(owner) = owners.get_mut(event.entity) else {
            crate::logger::log_warning(&format!(
                "⚠️ ECS: Possessed entity {:?} has no AbilityController",
                event.entity
            ));
            continue;
        };

        let (loadout, attributes) = match profiles.get_mut(event.entity) {
            Ok((loadout, attributes)) => (loadout.cloned().unwrap_or_default(), attributes),
            Err(_) => (AbilityLoadout::default(), None),
        };

        if let Some(mut attributes) = attributes {
            attributes.initialize(loadout.initial_health, loadout.initial_stamina);
        }

        let granted = with_ability_context(owner, clock.elapsed(), &tuning, &mut writers, |controller, ctx| {
            // старые abilities завершаем честно: теги/анимации снимаются
            controller.cancel_all(ctx);
            controller.clear_abilities();
            ctx.tags.clear();
            ctx.tasks.clear();
            *ctx.buffer = InputBuffer::with_window(ctx.tuning.input_buffer_window_secs);

            for kind in &loadout.abilities {
                controller.grant(build_ability(*kind, &loadout), kind.default_input());
            }
            controller.mark_ready();
            controller.specs().count()
        });

        crate::logger::log_info(&format!(
            "🎮 ECS: Possessed {:?} → {} abilities granted (health: {:.0})",
            event.entity, granted, loadout.initial_health
        ));
    }
}

/// System: press/release от input layer
pub fn process_ability_inputs(
    mut inputs: EventReader<AbilityInputEvent>,
    mut owners: Query<AbilityOwnerData>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut writers: AbilityOutputWriters,
) {
    for event in inputs.read() {
        let Ok(owner) = owners.get_mut(event.entity) else {
            continue;
        };

        with_ability_context(owner, clock.elapsed(), &tuning, &mut writers, |controller, ctx| {
            match event.action {
                InputAction::Pressed => controller.press(event.input, ctx),
                InputAction::Released => controller.release(event.input, ctx),
            }
        });
    }
}

/// System: animation state windows (guarded add/remove тега)
pub fn process_state_windows(
    mut windows: EventReader<StateWindowEvent>,
    mut tags: Query<&mut StateTags>,
) {
    for event in windows.read() {
        let Ok(mut owner_tags) = tags.get_mut(event.entity) else {
            continue;
        };

        match event.phase {
            WindowPhase::Begin if !owner_tags.has(event.tag) => {
                owner_tags.add(event.tag);
                crate::logger::log(&format!(
                    "🏷️ ECS: {:?} window begin (entity: {:?})",
                    event.tag, event.entity
                ));
            }
            WindowPhase::End if owner_tags.has(event.tag) => {
                owner_tags.remove(event.tag);
                crate::logger::log(&format!(
                    "🏷️ ECS: {:?} window end (entity: {:?})",
                    event.tag, event.entity
                ));
            }
            _ => {}
        }
    }
}

/// System: callbacks animation tasks (completed / interrupted)
pub fn process_animation_task_events(
    mut finished: EventReader<AnimationTaskFinished>,
    mut owners: Query<AbilityOwnerData>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut writers: AbilityOutputWriters,
) {
    for event in finished.read() {
        let Ok(owner) = owners.get_mut(event.entity) else {
            continue;
        };

        let task_event = match event.outcome {
            AnimationOutcome::Completed => TaskEvent::AnimationCompleted,
            AnimationOutcome::Interrupted => TaskEvent::AnimationInterrupted,
        };
        with_ability_context(owner, clock.elapsed(), &tuning, &mut writers, |controller, ctx| {
            controller.handle_task_event(event.task, task_event, ctx)
        });
    }
}

/// System: animation notify "fire buffered input" (только locally controlled)
pub fn process_buffered_input_notifies(
    mut notifies: EventReader<FireBufferedInput>,
    mut owners: Query<AbilityOwnerData, With<LocallyControlled>>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut writers: AbilityOutputWriters,
) {
    for event in notifies.read() {
        // Remote proxies: буфер живёт только у владельца input
        let Ok(owner) = owners.get_mut(event.entity) else {
            continue;
        };

        with_ability_context(owner, clock.elapsed(), &tuning, &mut writers, |controller, ctx| {
            controller.flush_buffered(ctx)
        });
    }
}

/// System: delay tasks (parry window и т.п.)
pub fn tick_ability_timers(
    mut owners: Query<AbilityOwnerData>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut writers: AbilityOutputWriters,
) {
    let now = clock.elapsed();

    for owner in owners.iter_mut() {
        if owner.4.due_delays(now).is_empty() {
            continue;
        }

        with_ability_context(owner, now, &tuning, &mut writers, |controller, ctx| {
            controller.tick_timers(ctx)
        });
    }
}
