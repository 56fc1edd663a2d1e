//! Ability loadout: что грантится персонажу при possession

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::abilities::{AbilityKind, AnimationClip};

/// Описание abilities персонажа (data-driven, грузится из RON/JSON)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AbilityLoadout {
    /// Порядок grant = порядок выдачи handles
    pub abilities: Vec<AbilityKind>,
    /// Анимация блока (None → BlockParry недоступен)
    pub guard_clip: Option<AnimationClip>,
    /// Анимация переката (None → Roll недоступен)
    pub roll_clip: Option<AnimationClip>,
    pub initial_health: f32,
    pub initial_stamina: f32,
}

impl Default for AbilityLoadout {
    fn default() -> Self {
        Self {
            abilities: vec![
                AbilityKind::ComboAttack,
                AbilityKind::BlockParry,
                AbilityKind::Roll,
            ],
            guard_clip: None,
            roll_clip: None,
            initial_health: 100.0,
            initial_stamina: 100.0,
        }
    }
}

impl AbilityLoadout {
    pub fn with_clips(guard_clip: AnimationClip, roll_clip: AnimationClip) -> Self {
        Self {
            guard_clip: Some(guard_clip),
            roll_clip: Some(roll_clip),
            ..Default::default()
        }
    }
}
