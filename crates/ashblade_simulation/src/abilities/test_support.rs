//! Fixture для unit тестов abilities без World

use bevy::prelude::*;

use crate::abilities::{
    AbilityContext, AbilityController, AbilityInput, AbilityOutput, AbilityTasks, AnimationClip,
    AnimationCommand, BlockParryAbility, ComboAttackAbility, InputBuffer, LifecycleKind,
    MainHandWeapon, RollAbility, StateTags, TaskHandle,
};
use crate::config::CombatTuning;

/// Компоненты одного персонажа, из которых собирается AbilityContext
pub struct TestOwner {
    pub entity: Entity,
    pub tags: StateTags,
    pub buffer: InputBuffer,
    pub tasks: AbilityTasks,
    pub weapon: Option<MainHandWeapon>,
    pub tuning: CombatTuning,
    pub output: AbilityOutput,
}

impl TestOwner {
    pub fn new() -> Self {
        Self {
            entity: Entity::from_raw(7),
            tags: StateTags::default(),
            buffer: InputBuffer::default(),
            tasks: AbilityTasks::default(),
            weapon: Some(MainHandWeapon::new([
                AnimationClip::new("attack_1"),
                AnimationClip::new("attack_2"),
                AnimationClip::new("attack_3"),
            ])),
            tuning: CombatTuning::default(),
            output: AbilityOutput::default(),
        }
    }

    /// Контроллер с combo/block/roll, уже после possession
    pub fn controller_with_defaults(&self) -> AbilityController {
        let mut controller = AbilityController::default();
        controller.grant(Box::new(ComboAttackAbility::new()), AbilityInput::ComboAttack);
        controller.grant(
            Box::new(BlockParryAbility::new(Some(AnimationClip::new("guard")))),
            AbilityInput::Block,
        );
        controller.grant(
            Box::new(RollAbility::new(Some(AnimationClip::new("roll")))),
            AbilityInput::Roll,
        );
        controller.mark_ready();
        controller
    }

    /// Вызов с контекстом на момент `now` (output копится между вызовами)
    pub fn with_ctx<R>(&mut self, now: f64, f: impl FnOnce(&mut AbilityContext) -> R) -> R {
        let mut ctx = AbilityContext {
            owner: self.entity,
            now,
            tags: &mut self.tags,
            buffer: &mut self.buffer,
            tasks: &mut self.tasks,
            main_hand: self.weapon.as_ref(),
            tuning: &self.tuning,
            output: &mut self.output,
        };
        f(&mut ctx)
    }

    pub fn take_output(&mut self) -> AbilityOutput {
        std::mem::take(&mut self.output)
    }

    /// Шаги combo в порядке запуска
    pub fn combo_steps(&self) -> Vec<usize> {
        self.output
            .lifecycle
            .iter()
            .filter_map(|(_, kind)| match kind {
                LifecycleKind::ComboStep { step } => Some(*step),
                _ => None,
            })
            .collect()
    }

    /// Handle последней tracked анимации
    pub fn last_tracked_task(&self) -> Option<TaskHandle> {
        self.output.animations.iter().rev().find_map(|command| match command {
            AnimationCommand::Play { task, .. } => *task,
            AnimationCommand::Stop { .. } => None,
        })
    }
}
