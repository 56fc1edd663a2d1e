//! AbilityController: per-character dispatcher
//!
//! Роутит press/release в нужную ability, пытается активировать,
//! при неудаче кладёт input в буфер. До possession (`is_ready() == false`)
//! все операции — no-op.

use bevy::prelude::*;

use crate::abilities::{
    Ability, AbilityContext, AbilityFlow, AbilityHandle, AbilityInput, AbilityKind, LifecycleKind,
    TaskEvent, TaskHandle,
};

/// Неизменяемое описание выданной ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilitySpec {
    pub kind: AbilityKind,
    pub input: AbilityInput,
    pub handle: AbilityHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbilityState {
    #[default]
    Inactive,
    Active,
    /// Внутри End transition (tasks отменены, ability снимает теги)
    Ending,
}

pub struct AbilitySlot {
    pub spec: AbilitySpec,
    pub state: AbilityState,
    ability: Box<dyn Ability>,
}

#[derive(Component, Default)]
pub struct AbilityController {
    slots: Vec<AbilitySlot>,
    next_handle: u32,
    ready: bool,
}

impl AbilityController {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Выдать ability на input. Одна ability каждого kind: повторный grant
    /// возвращает существующий handle.
    pub fn grant(&mut self, ability: Box<dyn Ability>, input: AbilityInput) -> AbilityHandle {
        let kind = ability.kind();
        if let Some(existing) = self.spec_for_kind(kind) {
            return existing.handle;
        }

        self.next_handle += 1;
        let handle = AbilityHandle(self.next_handle);
        self.slots.push(AbilitySlot {
            spec: AbilitySpec {
                kind,
                input,
                handle,
            },
            state: AbilityState::Inactive,
            ability,
        });
        handle
    }

    /// Снять все abilities (без End transitions, владелец сбрасывает state сам)
    pub fn clear_abilities(&mut self) {
        self.slots.clear();
        self.ready = false;
    }

    pub fn specs(&self) -> impl Iterator<Item = &AbilitySpec> {
        self.slots.iter().map(|slot| &slot.spec)
    }

    pub fn spec_for_input(&self, input: AbilityInput) -> Option<&AbilitySpec> {
        self.specs().find(|spec| spec.input == input)
    }

    pub fn spec_for_kind(&self, kind: AbilityKind) -> Option<&AbilitySpec> {
        self.specs().find(|spec| spec.kind == kind)
    }

    pub fn state_of(&self, kind: AbilityKind) -> Option<AbilityState> {
        self.slots
            .iter()
            .find(|slot| slot.spec.kind == kind)
            .map(|slot| slot.state)
    }

    pub fn is_active(&self, kind: AbilityKind) -> bool {
        self.state_of(kind) == Some(AbilityState::Active)
    }

    fn slot_index_for_input(&self, input: AbilityInput) -> Option<usize> {
        self.slots.iter().position(|slot| slot.spec.input == input)
    }

    fn slot_index_for_kind(&self, kind: AbilityKind) -> Option<usize> {
        self.slots.iter().position(|slot| slot.spec.kind == kind)
    }

    /// Press: очистить буфер → Active ? input_pressed : try_activate, иначе buffer
    pub fn press(&mut self, input: AbilityInput, ctx: &mut AbilityContext) {
        if !self.ready {
            return;
        }

        if ctx.buffer.has_buffered() {
            ctx.buffer.clear();
        }

        let Some(index) = self.slot_index_for_input(input) else {
            return;
        };

        if self.slots[index].state == AbilityState::Active {
            let flow = self.slots[index].ability.input_pressed(ctx);
            self.apply_flow(index, flow, ctx);
            return;
        }

        if !self.try_activate_index(index, ctx) {
            let kind = self.slots[index].spec.kind;
            ctx.buffer_input(kind, input);
        }
    }

    /// Release: доставить release waiters, затем input_released
    pub fn release(&mut self, input: AbilityInput, ctx: &mut AbilityContext) {
        if !self.ready {
            return;
        }

        let Some(index) = self.slot_index_for_input(input) else {
            return;
        };
        if self.slots[index].state != AbilityState::Active {
            return;
        }

        let kind = self.slots[index].spec.kind;
        for (handle, started_at) in ctx.tasks.release_waiters(kind, input) {
            let time_held = ctx.now - started_at;
            self.handle_task_event(handle, TaskEvent::InputReleased { time_held }, ctx);
        }

        if self.slots[index].state == AbilityState::Active {
            let flow = self.slots[index].ability.input_released(ctx);
            self.apply_flow(index, flow, ctx);
        }
    }

    /// Flush буфера: свежий input повторно проходит через press, протухший выбрасывается.
    ///
    /// true если input был переотправлен.
    pub fn flush_buffered(&mut self, ctx: &mut AbilityContext) -> bool {
        if !self.ready {
            return false;
        }

        let Some(input) = ctx.buffer.flush(ctx.now) else {
            return false;
        };
        crate::logger::log(&format!(
            "📤 ECS: Buffered {} fired at {:.3}s (entity: {:?})",
            input, ctx.now, ctx.owner
        ));
        self.press(input, ctx);
        // press мог снова положить input в буфер (ComboLocked) — слот всё равно пуст
        ctx.buffer.clear();
        true
    }

    /// Активировать ability по input. false → caller решает, буферить ли.
    pub fn try_activate(&mut self, input: AbilityInput, ctx: &mut AbilityContext) -> bool {
        if !self.ready {
            return false;
        }
        match self.slot_index_for_input(input) {
            Some(index) => self.try_activate_index(index, ctx),
            None => false,
        }
    }

    fn try_activate_index(&mut self, index: usize, ctx: &mut AbilityContext) -> bool {
        let slot = &mut self.slots[index];
        if slot.state != AbilityState::Inactive || !slot.ability.can_activate(ctx) {
            crate::logger::log(&format!(
                "🚫 ECS: {:?} activation rejected (entity: {:?}, tags: {:?})",
                slot.spec.kind,
                ctx.owner,
                ctx.tags.iter().collect::<Vec<_>>()
            ));
            return false;
        }

        slot.state = AbilityState::Active;
        let kind = slot.spec.kind;
        ctx.notify(kind, LifecycleKind::Activated);
        crate::logger::log(&format!(
            "⚔️ ECS: {:?} activated at {:.3}s (entity: {:?})",
            kind, ctx.now, ctx.owner
        ));

        let flow = slot.ability.activate(ctx);
        self.apply_flow(index, flow, ctx);
        true
    }

    /// Доставить callback task. Мёртвый handle (отменён/уже сработал) → no-op.
    pub fn handle_task_event(&mut self, handle: TaskHandle, event: TaskEvent, ctx: &mut AbilityContext) {
        if !self.ready {
            return;
        }

        let Some(task) = ctx.tasks.resolve(handle) else {
            return;
        };
        let Some(index) = self.slot_index_for_kind(task.owner) else {
            return;
        };
        if self.slots[index].state != AbilityState::Active {
            return;
        }

        let flow = self.slots[index].ability.on_task(ctx, handle, event);
        self.apply_flow(index, flow, ctx);
    }

    /// Доставить все delay tasks, время которых наступило
    pub fn tick_timers(&mut self, ctx: &mut AbilityContext) {
        if !self.ready {
            return;
        }
        for handle in ctx.tasks.due_delays(ctx.now) {
            // handle мог умереть от End предыдущего callback — resolve вернёт None
            self.handle_task_event(handle, TaskEvent::DelayElapsed, ctx);
        }
    }

    /// Принудительно завершить все Active abilities (was_cancelled = true)
    pub fn cancel_all(&mut self, ctx: &mut AbilityContext) {
        for index in 0..self.slots.len() {
            self.end_slot(index, true, ctx);
        }
    }

    fn apply_flow(&mut self, index: usize, flow: AbilityFlow, ctx: &mut AbilityContext) {
        match flow {
            AbilityFlow::Continue => {}
            AbilityFlow::End => self.end_slot(index, false, ctx),
            AbilityFlow::Cancel => self.end_slot(index, true, ctx),
        }
    }

    /// End transition: отмена tasks → ability.end → Inactive
    fn end_slot(&mut self, index: usize, was_cancelled: bool, ctx: &mut AbilityContext) {
        let slot = &mut self.slots[index];
        if slot.state != AbilityState::Active {
            return;
        }

        slot.state = AbilityState::Ending;
        let kind = slot.spec.kind;
        ctx.tasks.cancel_owned_by(kind);
        slot.ability.end(ctx, was_cancelled);
        slot.state = AbilityState::Inactive;

        ctx.notify(kind, LifecycleKind::Ended { was_cancelled });
        crate::logger::log(&format!(
            "✅ ECS: {:?} ended (cancelled: {}, entity: {:?})",
            kind, was_cancelled, ctx.owner
        ));
    }
}
