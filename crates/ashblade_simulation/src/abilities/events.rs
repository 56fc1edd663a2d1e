//! Ability events: вход от input/animation layer и выход для них

use bevy::prelude::*;

use crate::abilities::{AbilityInput, AbilityKind, AnimationClip, StateTag, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Pressed,
    Released,
}

/// Нажатие/отпускание ability input (от input layer)
#[derive(Event, Debug, Clone, Copy)]
pub struct AbilityInputEvent {
    pub entity: Entity,
    pub input: AbilityInput,
    pub action: InputAction,
}

impl AbilityInputEvent {
    pub fn pressed(entity: Entity, input: AbilityInput) -> Self {
        Self {
            entity,
            input,
            action: InputAction::Pressed,
        }
    }

    pub fn released(entity: Entity, input: AbilityInput) -> Self {
        Self {
            entity,
            input,
            action: InputAction::Released,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Interrupted,
}

/// Animation layer сообщает о завершении tracked анимации
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationTaskFinished {
    pub entity: Entity,
    pub task: TaskHandle,
    pub outcome: AnimationOutcome,
}

/// Animation notify "fire buffered input"
#[derive(Event, Debug, Clone, Copy)]
pub struct FireBufferedInput {
    pub entity: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Begin,
    End,
}

/// Animation notify state window: тег стоит пока окно открыто
#[derive(Event, Debug, Clone, Copy)]
pub struct StateWindowEvent {
    pub entity: Entity,
    pub tag: StateTag,
    pub phase: WindowPhase,
}

/// Персонаж получил контроллер → grant abilities из AbilityLoadout
#[derive(Event, Debug, Clone, Copy)]
pub struct CharacterPossessed {
    pub entity: Entity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimationCommand {
    /// task = Some → animation layer обязан ответить AnimationTaskFinished
    Play {
        clip: AnimationClip,
        task: Option<TaskHandle>,
    },
    Stop {
        clip: AnimationClip,
    },
}

/// Запрос к animation layer
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub entity: Entity,
    pub command: AnimationCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    Activated,
    Ended { was_cancelled: bool },
    /// Combo step запущен (index в combo_attacks)
    ComboStep { step: usize },
    /// Input ушёл в буфер
    Buffered { input: AbilityInput },
}

/// Переходы abilities (UI, audio, тесты)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityLifecycleEvent {
    pub entity: Entity,
    pub ability: AbilityKind,
    pub kind: LifecycleKind,
}
