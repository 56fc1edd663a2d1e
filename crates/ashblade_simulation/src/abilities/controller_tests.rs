//! Tests for ability controller dispatch.

#[cfg(test)]
mod tests {
    use crate::abilities::test_support::TestOwner;
    use crate::abilities::{
        AbilityController, AbilityInput, AbilityKind, ComboAttackAbility, LifecycleKind,
        StateTag,
    };

    #[test]
    fn test_not_ready_controller_is_noop() {
        let mut owner = TestOwner::new();
        let mut controller = AbilityController::default();
        controller.grant(Box::new(ComboAttackAbility::new()), AbilityInput::ComboAttack);

        owner.with_ctx(0.0, |ctx| controller.press(AbilityInput::ComboAttack, ctx));

        assert!(!controller.is_active(AbilityKind::ComboAttack));
        assert!(!owner.buffer.has_buffered());
        assert!(owner.output.is_empty());
    }

    #[test]
    fn test_grant_one_handle_per_kind() {
        let mut controller = AbilityController::default();
        let first = controller.grant(Box::new(ComboAttackAbility::new()), AbilityInput::ComboAttack);
        let second = controller.grant(Box::new(ComboAttackAbility::new()), AbilityInput::ComboAttack);

        assert_eq!(first, second);
        assert_eq!(controller.specs().count(), 1);
        assert_eq!(
            controller.spec_for_input(AbilityInput::ComboAttack).map(|s| s.kind),
            Some(AbilityKind::ComboAttack)
        );
    }

    #[test]
    fn test_failed_activation_buffers_input() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();
        owner.tags.add(StateTag::ComboLocked);

        owner.with_ctx(2.0, |ctx| controller.press(AbilityInput::ComboAttack, ctx));

        assert!(!controller.is_active(AbilityKind::ComboAttack));
        assert_eq!(owner.buffer.peek().map(|e| e.timestamp), Some(2.0));
        assert!(owner.output.lifecycle.contains(&(
            AbilityKind::ComboAttack,
            LifecycleKind::Buffered {
                input: AbilityInput::ComboAttack
            }
        )));
    }

    #[test]
    fn test_press_clears_pending_buffer() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();
        owner.buffer.buffer(AbilityInput::ComboAttack, 0.0);

        // Roll активируется → буфер пуст
        owner.with_ctx(0.1, |ctx| controller.press(AbilityInput::Roll, ctx));

        assert!(controller.is_active(AbilityKind::Roll));
        assert!(!owner.buffer.has_buffered());
    }

    #[test]
    fn test_flush_inside_window_redispatches() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();
        owner.tags.add(StateTag::ComboLocked);
        owner.with_ctx(1.0, |ctx| controller.press(AbilityInput::ComboAttack, ctx));
        owner.tags.remove(StateTag::ComboLocked);

        let fired = owner.with_ctx(1.2, |ctx| controller.flush_buffered(ctx));

        assert!(fired);
        assert!(controller.is_active(AbilityKind::ComboAttack));
        assert!(!owner.buffer.has_buffered());
        assert_eq!(owner.combo_steps(), vec![0]);
    }

    #[test]
    fn test_flush_outside_window_discards() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();
        owner.tags.add(StateTag::ComboLocked);
        owner.with_ctx(1.0, |ctx| controller.press(AbilityInput::ComboAttack, ctx));
        owner.tags.remove(StateTag::ComboLocked);

        let fired = owner.with_ctx(1.3, |ctx| controller.flush_buffered(ctx));

        assert!(!fired);
        assert!(!controller.is_active(AbilityKind::ComboAttack));
        assert!(!owner.buffer.has_buffered());
    }

    #[test]
    fn test_flush_while_combo_locked_leaves_buffer_empty() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();

        owner.with_ctx(1.0, |ctx| controller.press(AbilityInput::ComboAttack, ctx));
        owner.with_ctx(1.05, |ctx| controller.press(AbilityInput::ComboAttack, ctx));
        assert!(owner.buffer.has_buffered());
        assert!(owner.tags.has(StateTag::ComboLocked));

        // Окно ещё закрыто: re-dispatch снова упирается в ComboLocked
        let fired = owner.with_ctx(1.2, |ctx| controller.flush_buffered(ctx));

        assert!(fired);
        assert!(!owner.buffer.has_buffered());
        assert_eq!(owner.buffer.peek(), None);
        assert_eq!(owner.combo_steps(), vec![0]);

        // Следующий notify уже нечего переотправлять
        let fired_again = owner.with_ctx(1.3, |ctx| controller.flush_buffered(ctx));
        assert!(!fired_again);
        assert_eq!(owner.combo_steps(), vec![0]);
    }

    #[test]
    fn test_release_without_active_ability_is_noop() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();

        owner.with_ctx(0.0, |ctx| controller.release(AbilityInput::Block, ctx));

        assert!(owner.output.is_empty());
    }

    #[test]
    fn test_cancel_all_clears_every_tag() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();

        owner.with_ctx(0.0, |ctx| controller.press(AbilityInput::ComboAttack, ctx));
        owner.with_ctx(0.0, |ctx| controller.press(AbilityInput::Block, ctx));
        assert!(owner.tags.has(StateTag::ComboLocked));
        assert!(owner.tags.has(StateTag::Blocking));

        owner.with_ctx(0.1, |ctx| controller.cancel_all(ctx));

        assert!(owner.tags.is_empty());
        assert!(owner.tasks.is_empty());
        assert!(!controller.is_active(AbilityKind::ComboAttack));
        assert!(!controller.is_active(AbilityKind::BlockParry));
    }
}
