//! Input buffer: один перезаписываемый слот с timestamp

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::abilities::AbilityInput;
use crate::config::INPUT_BUFFER_WINDOW_SECS;

/// Отложенный input (сериализуемый record для replay/debug)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct BufferedInput {
    pub input: AbilityInput,
    /// Время CombatClock в момент нажатия (секунды)
    pub timestamp: f64,
}

/// Буфер намерения игрока на время animation lock
///
/// Инвариант: максимум одна запись, новая перезаписывает старую (не очередь).
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct InputBuffer {
    slot: Option<BufferedInput>,
    /// Окно валидности записи (секунды)
    pub window_secs: f64,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::with_window(INPUT_BUFFER_WINDOW_SECS)
    }
}

impl InputBuffer {
    pub fn with_window(window_secs: f64) -> Self {
        Self {
            slot: None,
            window_secs,
        }
    }

    pub fn buffer(&mut self, input: AbilityInput, now: f64) {
        self.slot = Some(BufferedInput {
            input,
            timestamp: now,
        });
    }

    pub fn has_buffered(&self) -> bool {
        self.slot.is_some()
    }

    pub fn peek(&self) -> Option<&BufferedInput> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Запись ещё в окне (now - timestamp <= window)
    pub fn is_fresh(&self, now: f64) -> bool {
        self.slot
            .is_some_and(|entry| now - entry.timestamp <= self.window_secs)
    }

    /// Забрать запись: Some(input) если она в окне.
    ///
    /// Слот очищается в любом случае, протухший input молча выбрасывается.
    pub fn flush(&mut self, now: f64) -> Option<AbilityInput> {
        let entry = self.slot.take()?;
        (now - entry.timestamp <= self.window_secs).then_some(entry.input)
    }
}
