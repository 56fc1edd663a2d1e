//! Ability tasks: отменяемые отложенные callbacks
//!
//! Каждый task (animation playback, delay, wait-for-release) получает handle.
//! Callback доставляется только пока handle жив: `resolve` отменённого
//! или уже сработавшего handle возвращает None → поздний callback = no-op.

use bevy::prelude::*;

use crate::abilities::{AbilityInput, AbilityKind, AnimationClip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TaskHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Ждём AnimationTaskFinished от animation layer
    PlayAnimation { clip: AnimationClip },
    /// Срабатывает когда CombatClock >= fires_at
    WaitDelay { fires_at: f64 },
    /// Срабатывает на release указанного input
    WaitInputRelease { input: AbilityInput, started_at: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTask {
    pub handle: TaskHandle,
    /// Ability, которой принадлежит task (End отменяет все её tasks)
    pub owner: AbilityKind,
    pub kind: TaskKind,
}

/// Живые tasks одного персонажа
#[derive(Component, Debug, Clone, Default)]
pub struct AbilityTasks {
    next_id: u64,
    pending: Vec<PendingTask>,
}

impl AbilityTasks {
    pub fn schedule(&mut self, owner: AbilityKind, kind: TaskKind) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.push(PendingTask {
            handle,
            owner,
            kind,
        });
        handle
    }

    pub fn is_live(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|task| task.handle == handle)
    }

    pub fn get(&self, handle: TaskHandle) -> Option<&PendingTask> {
        self.pending.iter().find(|task| task.handle == handle)
    }

    /// Отменить task. false если handle уже мёртв.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.handle != handle);
        self.pending.len() != before
    }

    /// Отменить все tasks ability (вызывается до End transition)
    pub fn cancel_owned_by(&mut self, owner: AbilityKind) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| task.owner != owner);
        before - self.pending.len()
    }

    /// Забрать task для доставки callback (handle после этого мёртв)
    pub fn resolve(&mut self, handle: TaskHandle) -> Option<PendingTask> {
        let index = self.pending.iter().position(|task| task.handle == handle)?;
        Some(self.pending.remove(index))
    }

    /// Handles delay tasks, у которых наступило время (в порядке планирования)
    pub fn due_delays(&self, now: f64) -> Vec<TaskHandle> {
        self.pending
            .iter()
            .filter(|task| matches!(task.kind, TaskKind::WaitDelay { fires_at } if now >= fires_at))
            .map(|task| task.handle)
            .collect()
    }

    /// Release waiters ability для input: (handle, время старта ожидания)
    pub fn release_waiters(&self, owner: AbilityKind, input: AbilityInput) -> Vec<(TaskHandle, f64)> {
        self.pending
            .iter()
            .filter(|task| task.owner == owner)
            .filter_map(|task| match task.kind {
                TaskKind::WaitInputRelease {
                    input: waited,
                    started_at,
                } if waited == input => Some((task.handle, started_at)),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
