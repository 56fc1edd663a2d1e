//! Attributes: health/stamina персонажа + health notification bridge
//!
//! Effect pipeline (расчёт урона, модификаторы) — внешний. Он мутирует
//! атрибут и шлёт AttributeMutated; ядро только переиздаёт HealthChanged.

use bevy::prelude::*;

pub mod health;


pub use health::*;

/// Attribute Plugin
///
/// 1. broadcast_health_changes — AttributeMutated(Health) → HealthChanged
/// 2. log_health_changes — встроенный подписчик (debug print)
pub struct AttributePlugin;

impl Plugin for AttributePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterAttributes>()
            .add_event::<AttributeMutated>()
            .add_event::<HealthChanged>();

        app.add_systems(
            FixedUpdate,
            (broadcast_health_changes, log_health_changes).chain(),
        );
    }
}
