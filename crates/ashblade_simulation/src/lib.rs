//! Ashblade Simulation Core
//!
//! ECS-ядро боевых abilities на Bevy 0.16 (headless, без рендера)
//!
//! Ядро решает:
//! - какое действие персонаж может выполнить прямо сейчас (StateTags)
//! - combo sequencing, block/parry окна, roll
//! - буфер намерения игрока на время animation lock
//! - lock-on камеры на ближайшую к прицелу цель
//! - health notification bridge
//!
//! Внешний слой (engine): анимации, физика, рендер, сеть, raw input.
//! Общение с ним — только через события (AbilityInputEvent, AnimationRequest, ...).

use bevy::prelude::*;

// Публичные модули
pub mod abilities;
pub mod attributes;
pub mod components;
pub mod config;
pub mod logger;
pub mod targeting;

// Re-export базовых типов для удобства
pub use abilities::{
    AbilityController, AbilityInput, AbilityInputEvent, AbilityKind, AbilityLifecycleEvent,
    AbilityLoadout, AbilityPlugin, AnimationClip, AnimationCommand, AnimationOutcome,
    AnimationRequest, AnimationTaskFinished, CharacterPossessed, CombatClock, FireBufferedInput,
    InputBuffer, LifecycleKind, MainHandWeapon, StateTag, StateTags, StateWindowEvent,
    WindowPhase,
};
pub use attributes::{
    AttributeMutated, AttributePlugin, CharacterAttributes, GameplayAttribute, HealthChanged,
};
pub use components::*;
pub use config::CombatTuning;
pub use logger::{init_logger, set_log_level, set_logger, LogLevel, LogPrinter};
pub use targeting::{LockOn, LockOnChanged, LookInput, TargetingPlugin, ToggleLockOn};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<CombatTuning>()
            .register_type::<CombatTuning>()
            .register_type::<Character>()
            .register_type::<MovementOrientation>()
            .register_type::<ControlRotation>()
            .register_type::<PlayerView>()
            // Подсистемы
            .add_plugins((AbilityPlugin, TargetingPlugin, AttributePlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
