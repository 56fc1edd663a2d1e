//! State tags: разделяемый набор флагов персонажа
//!
//! Lightweight mutual exclusion между abilities. Set идемпотентный (bool per tag),
//! все call sites проверяют `has` перед `add`/`remove`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum StateTag {
    /// Combo step в процессе (новые шаги запрещены)
    ComboLocked,
    /// Блок удерживается
    Blocking,
    /// Parry sub-window (начало блока)
    Parry,
    /// Блок/перекат запрещены (ставится внешними state windows)
    BlockingLocked,
    RollingLocked,
    /// i-frames
    Invincible,
}

impl StateTag {
    pub const ALL: [StateTag; 6] = [
        StateTag::ComboLocked,
        StateTag::Blocking,
        StateTag::Parry,
        StateTag::BlockingLocked,
        StateTag::RollingLocked,
        StateTag::Invincible,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Набор активных StateTag (bitset)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct StateTags {
    bits: u8,
}

impl StateTags {
    /// true если тег был добавлен (не стоял раньше)
    pub fn add(&mut self, tag: StateTag) -> bool {
        let was_set = self.has(tag);
        self.bits |= tag.bit();
        !was_set
    }

    /// true если тег был снят
    pub fn remove(&mut self, tag: StateTag) -> bool {
        let was_set = self.has(tag);
        self.bits &= !tag.bit();
        was_set
    }

    pub fn has(&self, tag: StateTag) -> bool {
        self.bits & tag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = StateTag> + '_ {
        StateTag::ALL.into_iter().filter(|tag| self.has(*tag))
    }
}
