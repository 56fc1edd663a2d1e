//! Ability trait: контракт state machine одной ability

use crate::abilities::{AbilityContext, AbilityKind, TaskHandle};

/// Что контроллер делает после вызова ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityFlow {
    /// Ability остаётся Active (ждёт callbacks)
    Continue,
    /// End(was_cancelled = false)
    End,
    /// End(was_cancelled = true)
    Cancel,
}

/// Callback отложенного task
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskEvent {
    AnimationCompleted,
    AnimationInterrupted,
    DelayElapsed,
    InputReleased { time_held: f64 },
}

/// Runtime ability одного персонажа
///
/// Контроллер гарантирует: `activate` вызывается только из Inactive и только
/// если `can_activate` вернул true; `end` вызывается ровно один раз на каждую
/// активацию, после отмены всех tasks этой ability.
pub trait Ability: Send + Sync + 'static {
    fn kind(&self) -> AbilityKind;

    fn can_activate(&self, ctx: &AbilityContext) -> bool;

    fn activate(&mut self, ctx: &mut AbilityContext) -> AbilityFlow;

    /// Повторное нажатие пока ability Active
    fn input_pressed(&mut self, _ctx: &mut AbilityContext) -> AbilityFlow {
        AbilityFlow::Continue
    }

    fn input_released(&mut self, _ctx: &mut AbilityContext) -> AbilityFlow {
        AbilityFlow::Continue
    }

    /// Живой task этой ability сработал
    fn on_task(&mut self, ctx: &mut AbilityContext, task: TaskHandle, event: TaskEvent) -> AbilityFlow;

    /// Снять всё, что ability поставила (теги, анимации)
    fn end(&mut self, ctx: &mut AbilityContext, was_cancelled: bool);
}
