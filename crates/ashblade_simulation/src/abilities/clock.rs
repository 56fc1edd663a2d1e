//! CombatClock: монотонное игровое время для ability окон

use bevy::prelude::*;

/// Время мира в секундах (f64, как timestamps буфера)
///
/// Двигается только в FixedUpdate → одинаково на всех машинах.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct CombatClock {
    elapsed: f64,
}

impl CombatClock {
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn advance(&mut self, delta_secs: f64) {
        // время назад не ходит
        self.elapsed += delta_secs.max(0.0);
    }
}

/// System: продвинуть CombatClock на fixed timestep
pub fn advance_combat_clock(time: Res<Time<Fixed>>, mut clock: ResMut<CombatClock>) {
    clock.advance(time.delta_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = CombatClock::default();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.75);
    }
}
