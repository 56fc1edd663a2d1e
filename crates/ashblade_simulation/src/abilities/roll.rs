//! Roll: single-shot ability, живёт ровно одну анимацию

use crate::abilities::{
    Ability, AbilityContext, AbilityFlow, AbilityKind, AnimationClip, StateTag, TaskEvent,
    TaskHandle,
};

#[derive(Debug, Default)]
pub struct RollAbility {
    roll_clip: Option<AnimationClip>,
}

impl RollAbility {
    pub fn new(roll_clip: Option<AnimationClip>) -> Self {
        Self { roll_clip }
    }
}

impl Ability for RollAbility {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Roll
    }

    fn can_activate(&self, ctx: &AbilityContext) -> bool {
        self.roll_clip.is_some() && !ctx.has_tag(StateTag::BlockingLocked)
    }

    fn activate(&mut self, ctx: &mut AbilityContext) -> AbilityFlow {
        let Some(clip) = &self.roll_clip else {
            return AbilityFlow::Cancel;
        };
        ctx.play_animation(AbilityKind::Roll, clip);
        AbilityFlow::Continue
    }

    fn on_task(&mut self, _ctx: &mut AbilityContext, _task: TaskHandle, event: TaskEvent) -> AbilityFlow {
        // прерванный перекат тоже считается нормальным завершением
        match event {
            TaskEvent::AnimationCompleted | TaskEvent::AnimationInterrupted => AbilityFlow::End,
            _ => AbilityFlow::Continue,
        }
    }

    fn end(&mut self, _ctx: &mut AbilityContext, _was_cancelled: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::test_support::TestOwner;
    use crate::abilities::{AbilityInput, AbilityState, AnimationCommand};

    #[test]
    fn test_roll_plays_one_animation_and_ends() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();

        owner.with_ctx(0.0, |ctx| controller.press(AbilityInput::Roll, ctx));
        assert_eq!(controller.state_of(AbilityKind::Roll), Some(AbilityState::Active));

        let (clip, task) = match owner.output.animations.last() {
            Some(AnimationCommand::Play { clip, task: Some(task) }) => (clip.clone(), *task),
            other => panic!("expected tracked roll animation, got {:?}", other),
        };
        assert_eq!(clip.name(), "roll");

        owner.with_ctx(0.4, |ctx| {
            controller.handle_task_event(task, TaskEvent::AnimationInterrupted, ctx)
        });
        assert_eq!(controller.state_of(AbilityKind::Roll), Some(AbilityState::Inactive));
        assert!(owner.tasks.is_empty());
    }

    #[test]
    fn test_roll_gated_by_blocking_locked() {
        let mut owner = TestOwner::new();
        let mut controller = owner.controller_with_defaults();
        owner.tags.add(StateTag::BlockingLocked);

        owner.with_ctx(0.0, |ctx| controller.press(AbilityInput::Roll, ctx));

        assert!(!controller.is_active(AbilityKind::Roll));
        assert_eq!(
            owner.buffer.peek().map(|entry| entry.input),
            Some(AbilityInput::Roll)
        );
    }

    #[test]
    fn test_roll_without_clip_unavailable() {
        let mut owner = TestOwner::new();
        let roll = RollAbility::new(None);
        assert!(!owner.with_ctx(0.0, |ctx| roll.can_activate(ctx)));
    }
}
