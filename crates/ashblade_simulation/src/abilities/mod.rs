//! Ability core: state tags, input buffer, controller, combo/block/roll
//!
//! ECS ответственность:
//! - какую ability персонаж может выполнить прямо сейчас (StateTags gating)
//! - combo sequencing, parry window, roll lifetime
//! - буфер намерения игрока на время animation lock
//!
//! Animation layer (внешний):
//! - проигрывает AnimationRequest
//! - отвечает AnimationTaskFinished / StateWindowEvent / FireBufferedInput

use bevy::prelude::*;

pub mod ability;
pub mod block;
pub mod clock;
pub mod combo;
pub mod components;
pub mod context;
pub mod controller;
pub mod events;
pub mod roll;
pub mod systems;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod controller_tests;

pub use ability::{Ability, AbilityFlow, TaskEvent};
pub use block::BlockParryAbility;
pub use clock::{advance_combat_clock, CombatClock};
pub use combo::ComboAttackAbility;
pub use components::*;
pub use context::{AbilityContext, AbilityOutput};
pub use controller::{AbilityController, AbilitySlot, AbilitySpec, AbilityState};
pub use events::*;
pub use roll::RollAbility;
pub use types::{AbilityHandle, AbilityInput, AbilityKind, AnimationClip};

/// Ability Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. advance_combat_clock — часы для timestamps и delay tasks
/// 2. grant_abilities_on_possession — CharacterPossessed → grant
/// 3. process_ability_inputs — press/release
/// 4. process_state_windows — теги из animation notifies
/// 5. process_animation_task_events — completed/interrupted
/// 6. process_buffered_input_notifies — flush буфера
/// 7. tick_ability_timers — parry window и прочие delays
pub struct AbilityPlugin;

impl Plugin for AbilityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatClock>()
            .init_resource::<crate::config::CombatTuning>()
            .register_type::<StateTags>()
            .register_type::<InputBuffer>()
            .register_type::<MainHandWeapon>()
            .register_type::<AbilityLoadout>();

        app.add_event::<AbilityInputEvent>()
            .add_event::<AnimationTaskFinished>()
            .add_event::<FireBufferedInput>()
            .add_event::<StateWindowEvent>()
            .add_event::<CharacterPossessed>()
            .add_event::<AnimationRequest>()
            .add_event::<AbilityLifecycleEvent>();

        app.add_systems(
            FixedUpdate,
            (
                advance_combat_clock,
                systems::grant_abilities_on_possession,
                systems::process_ability_inputs,
                systems::process_state_windows,
                systems::process_animation_task_events,
                systems::process_buffered_input_notifies,
                systems::tick_ability_timers,
            )
                .chain(),
        );
    }
}
