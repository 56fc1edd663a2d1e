//! Health/Stamina атрибуты и bridge AttributeMutated → HealthChanged

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum GameplayAttribute {
    Health,
    /// Не-health атрибут: bridge его пропускает, abilities его не читают
    Stamina,
}

/// Атрибуты персонажа (значения после применения эффектов)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CharacterAttributes {
    pub health: f32,
    pub stamina: f32,
}

impl Default for CharacterAttributes {
    fn default() -> Self {
        Self {
            health: 100.0,
            stamina: 100.0,
        }
    }
}

impl CharacterAttributes {
    pub fn initialize(&mut self, health: f32, stamina: f32) {
        self.health = health;
        self.stamina = stamina;
    }

    pub fn get(&self, attribute: GameplayAttribute) -> f32 {
        match attribute {
            GameplayAttribute::Health => self.health,
            GameplayAttribute::Stamina => self.stamina,
        }
    }

    /// Применить delta, вернуть новое значение
    pub fn apply(&mut self, attribute: GameplayAttribute, magnitude: f32) -> f32 {
        let value = match attribute {
            GameplayAttribute::Health => &mut self.health,
            GameplayAttribute::Stamina => &mut self.stamina,
        };
        *value += magnitude;
        *value
    }
}

/// Effect pipeline изменил атрибут (уже применено к CharacterAttributes)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttributeMutated {
    pub entity: Entity,
    pub attribute: GameplayAttribute,
    pub magnitude: f32,
}

/// Health изменился: { magnitude, new_value }
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub magnitude: f32,
    pub new_value: f32,
}

/// Отфильтровать Health мутацию и собрать HealthChanged
///
/// Другие атрибуты → None. new_value читается из атрибутов владельца.
pub fn health_change_from(
    mutation: &AttributeMutated,
    attributes: &CharacterAttributes,
) -> Option<HealthChanged> {
    if mutation.attribute != GameplayAttribute::Health {
        return None;
    }
    Some(HealthChanged {
        entity: mutation.entity,
        magnitude: mutation.magnitude,
        new_value: attributes.health,
    })
}

/// System: AttributeMutated(Health) → HealthChanged
pub fn broadcast_health_changes(
    mut mutations: EventReader<AttributeMutated>,
    attributes: Query<&CharacterAttributes>,
    mut health_changed: EventWriter<HealthChanged>,
) {
    for mutation in mutations.read() {
        let Ok(owner_attributes) = attributes.get(mutation.entity) else {
            continue;
        };

        if let Some(event) = health_change_from(mutation, owner_attributes) {
            health_changed.write(event);
        }
    }
}

/// System: встроенный подписчик HealthChanged (debug print)
pub fn log_health_changes(mut health_changed: EventReader<HealthChanged>) {
    for event in health_changed.read() {
        crate::logger::log_info(&format!(
            "❤️ ECS: Health {:+.1} → {:.1} (entity: {:?})",
            event.magnitude, event.new_value, event.entity
        ));
    }
}
