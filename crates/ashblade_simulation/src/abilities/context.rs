//! AbilityContext: всё что ability видит у владельца
//!
//! Собирается системой из компонентов одного entity на время вызова.
//! Abilities не лезут в World и не даункастят владельца: теги, буфер,
//! tasks, оружие и часы приходят через контекст, а анимации и lifecycle
//! копятся в `AbilityOutput` и отправляются событиями после вызова.

use bevy::prelude::*;

use crate::abilities::{
    AbilityInput, AbilityKind, AbilityTasks, AnimationClip, AnimationCommand, InputBuffer,
    LifecycleKind, MainHandWeapon, StateTag, StateTags, TaskHandle, TaskKind,
};
use crate::config::CombatTuning;

/// Накопленные side effects одного вызова
#[derive(Debug, Default)]
pub struct AbilityOutput {
    pub animations: Vec<AnimationCommand>,
    pub lifecycle: Vec<(AbilityKind, LifecycleKind)>,
}

impl AbilityOutput {
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty() && self.lifecycle.is_empty()
    }
}

pub struct AbilityContext<'a> {
    pub owner: Entity,
    /// CombatClock (секунды, монотонно)
    pub now: f64,
    pub tags: &'a mut StateTags,
    pub buffer: &'a mut InputBuffer,
    pub tasks: &'a mut AbilityTasks,
    pub main_hand: Option<&'a MainHandWeapon>,
    pub tuning: &'a CombatTuning,
    pub output: &'a mut AbilityOutput,
}

impl AbilityContext<'_> {
    pub fn has_tag(&self, tag: StateTag) -> bool {
        self.tags.has(tag)
    }

    /// Guarded add (no-op если тег уже стоит)
    pub fn add_tag(&mut self, tag: StateTag) {
        if !self.tags.has(tag) {
            self.tags.add(tag);
        }
    }

    /// Guarded remove
    pub fn remove_tag(&mut self, tag: StateTag) {
        if self.tags.has(tag) {
            self.tags.remove(tag);
        }
    }

    /// Tracked анимация: завершение/прерывание придёт как task callback
    pub fn play_animation(&mut self, owner: AbilityKind, clip: &AnimationClip) -> TaskHandle {
        let handle = self
            .tasks
            .schedule(owner, TaskKind::PlayAnimation { clip: clip.clone() });
        self.output.animations.push(AnimationCommand::Play {
            clip: clip.clone(),
            task: Some(handle),
        });
        handle
    }

    /// Fire-and-forget анимация (без callback)
    pub fn play_untracked(&mut self, clip: &AnimationClip) {
        self.output.animations.push(AnimationCommand::Play {
            clip: clip.clone(),
            task: None,
        });
    }

    pub fn stop_animation(&mut self, clip: &AnimationClip) {
        self.output
            .animations
            .push(AnimationCommand::Stop { clip: clip.clone() });
    }

    pub fn wait_delay(&mut self, owner: AbilityKind, secs: f64) -> TaskHandle {
        let fires_at = self.now + secs;
        self.tasks.schedule(owner, TaskKind::WaitDelay { fires_at })
    }

    pub fn wait_input_release(&mut self, owner: AbilityKind, input: AbilityInput) -> TaskHandle {
        let started_at = self.now;
        self.tasks
            .schedule(owner, TaskKind::WaitInputRelease { input, started_at })
    }

    /// Синхронная отмена: callback этого handle больше никогда не выполнится
    pub fn cancel_task(&mut self, handle: TaskHandle) -> bool {
        self.tasks.cancel(handle)
    }

    pub fn buffer_input(&mut self, owner: AbilityKind, input: AbilityInput) {
        self.buffer.buffer(input, self.now);
        self.notify(owner, LifecycleKind::Buffered { input });
        crate::logger::log(&format!(
            "📥 ECS: {} buffered at {:.3}s (entity: {:?})",
            input, self.now, self.owner
        ));
    }

    pub fn notify(&mut self, ability: AbilityKind, kind: LifecycleKind) {
        self.output.lifecycle.push((ability, kind));
    }
}
