//! Тесты детерминизма
//!
//! Один и тот же скрипт input'ов даёт идентичную последовательность
//! ability переходов и одинаковые часы.

mod common;

use bevy::prelude::*;

use ashblade_simulation::*;
use common::*;

/// Прогоняет скриптованный бой, возвращает (lifecycle переходы, clock)
fn run_scripted_fight(ticks: usize) -> (Vec<(AbilityKind, LifecycleKind)>, f64) {
    let mut app = create_test_app();
    let player = spawn_player(&mut app);
    spawn_enemy(&mut app, Vec3::new(1.0, 0.0, -8.0));
    possess(&mut app, player);

    let mut transitions = Vec::new();
    for tick_index in 0..ticks {
        match tick_index % 40 {
            0 => press(&mut app, player, AbilityInput::ComboAttack),
            5 => press(&mut app, player, AbilityInput::ComboAttack),
            10 => {
                app.world_mut().send_event(StateWindowEvent {
                    entity: player,
                    tag: StateTag::ComboLocked,
                    phase: WindowPhase::End,
                });
                app.world_mut().send_event(FireBufferedInput { entity: player });
            }
            20 => press(&mut app, player, AbilityInput::Block),
            35 => release(&mut app, player, AbilityInput::Block),
            _ => {}
        }

        // Animation layer: завершаем каждую tracked анимацию сразу
        let requests = drain::<AnimationRequest>(&mut app);
        for (_, task) in tracked_plays(&requests) {
            finish_animation(&mut app, player, task, AnimationOutcome::Completed);
        }

        app.update();

        transitions.extend(
            drain::<AbilityLifecycleEvent>(&mut app)
                .into_iter()
                .map(|event| (event.ability, event.kind)),
        );
    }

    let clock = app.world().resource::<CombatClock>().elapsed();
    (transitions, clock)
}

#[test]
fn test_same_script_same_transitions() {
    const TICKS: usize = 200;

    let (transitions1, clock1) = run_scripted_fight(TICKS);
    let (transitions2, clock2) = run_scripted_fight(TICKS);

    assert!(!transitions1.is_empty());
    assert_eq!(
        transitions1, transitions2,
        "Одинаковый скрипт дал разные ability переходы"
    );
    assert_eq!(clock1, clock2);
}

#[test]
fn test_multiple_runs_identical() {
    const TICKS: usize = 120;

    let runs: Vec<_> = (0..3).map(|_| run_scripted_fight(TICKS)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} отличается от прогона 0", i);
    }
}
