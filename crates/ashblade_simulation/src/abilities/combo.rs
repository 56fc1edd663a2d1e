//! Combo attack: последовательность ударов оружия
//!
//! Idle → Attacking(step) → Idle. Counter продвигается сразу после запуска шага
//! и заворачивается по длине `combo_attacks`. Повторное нажатие пока ability
//! Active либо сразу запускает следующий шаг (ComboLocked снят state window'ом),
//! либо уходит в буфер.

use crate::abilities::{
    Ability, AbilityContext, AbilityFlow, AbilityInput, AbilityKind, LifecycleKind, StateTag,
    TaskEvent, TaskHandle,
};

#[derive(Debug, Default)]
pub struct ComboAttackAbility {
    counter: usize,
    /// Handle анимации текущего шага (callback старых шагов отменён)
    current_step: Option<TaskHandle>,
}

impl ComboAttackAbility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn current_step(&self) -> Option<TaskHandle> {
        self.current_step
    }

    fn play_next_step(&mut self, ctx: &mut AbilityContext) -> AbilityFlow {
        let Some(weapon) = ctx.main_hand else {
            return AbilityFlow::Cancel;
        };
        let len = weapon.combo_len();
        if len == 0 {
            return AbilityFlow::Cancel;
        }
        // оружие могли сменить посреди комбо
        let step = self.counter % len;
        let Some(clip) = weapon.combo_step(step).cloned() else {
            return AbilityFlow::Cancel;
        };

        // Старый шаг отменяем ДО того как трогаем теги
        if let Some(previous) = self.current_step.take() {
            ctx.cancel_task(previous);
        }

        ctx.add_tag(StateTag::ComboLocked);

        self.current_step = Some(ctx.play_animation(AbilityKind::ComboAttack, &clip));
        self.counter = (step + 1) % len;
        ctx.buffer.clear();

        ctx.notify(AbilityKind::ComboAttack, LifecycleKind::ComboStep { step });
        crate::logger::log(&format!(
            "🗡️ ECS: Combo step {} '{}' (entity: {:?}, next: {})",
            step, clip, ctx.owner, self.counter
        ));

        AbilityFlow::Continue
    }
}

impl Ability for ComboAttackAbility {
    fn kind(&self) -> AbilityKind {
        AbilityKind::ComboAttack
    }

    fn can_activate(&self, ctx: &AbilityContext) -> bool {
        let has_combo = ctx.main_hand.is_some_and(|weapon| weapon.has_combo());
        has_combo && !ctx.has_tag(StateTag::ComboLocked)
    }

    fn activate(&mut self, ctx: &mut AbilityContext) -> AbilityFlow {
        self.play_next_step(ctx)
    }

    fn input_pressed(&mut self, ctx: &mut AbilityContext) -> AbilityFlow {
        if self.can_activate(ctx) {
            self.play_next_step(ctx)
        } else {
            ctx.buffer_input(AbilityKind::ComboAttack, AbilityInput::ComboAttack);
            AbilityFlow::Continue
        }
    }

    fn on_task(&mut self, _ctx: &mut AbilityContext, task: TaskHandle, event: TaskEvent) -> AbilityFlow {
        if self.current_step != Some(task) {
            return AbilityFlow::Continue;
        }

        match event {
            TaskEvent::AnimationCompleted => AbilityFlow::End,
            TaskEvent::AnimationInterrupted => AbilityFlow::Cancel,
            _ => AbilityFlow::Continue,
        }
    }

    fn end(&mut self, ctx: &mut AbilityContext, _was_cancelled: bool) {
        ctx.remove_tag(StateTag::ComboLocked);
        if let Some(step) = self.current_step.take() {
            ctx.cancel_task(step);
        }
        self.counter = 0;
    }
}
