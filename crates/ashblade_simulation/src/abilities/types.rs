//! Идентификаторы abilities: input id, kind, handle, animation clip

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Логический input, на который забинжена ability
///
/// Маппинг с устройства (кнопки/геймпад) живёт во внешнем input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AbilityInput {
    ComboAttack,
    Block,
    Roll,
}

impl AbilityInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityInput::ComboAttack => "Combo_Attack",
            AbilityInput::Block => "Block",
            AbilityInput::Roll => "Roll",
        }
    }
}

impl fmt::Display for AbilityInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Тип ability (одна инстанция каждого типа на персонажа)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AbilityKind {
    ComboAttack,
    BlockParry,
    Roll,
}

impl AbilityKind {
    /// Input, на который ability грантится по умолчанию
    pub fn default_input(&self) -> AbilityInput {
        match self {
            AbilityKind::ComboAttack => AbilityInput::ComboAttack,
            AbilityKind::BlockParry => AbilityInput::Block,
            AbilityKind::Roll => AbilityInput::Roll,
        }
    }
}

/// Handle выданной ability (стабилен до следующего possession)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct AbilityHandle(pub u32);

/// Ссылка на animation asset (проигрывает внешний animation layer)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct AnimationClip(pub String);

impl AnimationClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimationClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
