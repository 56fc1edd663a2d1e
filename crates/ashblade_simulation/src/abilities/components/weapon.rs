//! Main-hand weapon: источник combo последовательности

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::abilities::AnimationClip;

/// Оружие в основной руке
///
/// `combo_attacks` — упорядоченный список анимаций ударов;
/// combo проигрывает `combo_attacks[counter]` и заворачивает counter по длине.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct MainHandWeapon {
    pub combo_attacks: Vec<AnimationClip>,
}

impl MainHandWeapon {
    pub fn new(combo_attacks: impl IntoIterator<Item = AnimationClip>) -> Self {
        Self {
            combo_attacks: combo_attacks.into_iter().collect(),
        }
    }

    pub fn combo_len(&self) -> usize {
        self.combo_attacks.len()
    }

    pub fn has_combo(&self) -> bool {
        !self.combo_attacks.is_empty()
    }

    pub fn combo_step(&self, index: usize) -> Option<&AnimationClip> {
        self.combo_attacks.get(index)
    }
}
