//! Block/Parry: Blocking на всё время удержания, Parry только первые 0.5s
//!
//! Idle → Blocking+Parry → Blocking → Idle (release input).

use crate::abilities::{
    Ability, AbilityContext, AbilityFlow, AbilityInput, AbilityKind, AnimationClip, StateTag,
    TaskEvent, TaskHandle,
};

#[derive(Debug, Default)]
pub struct BlockParryAbility {
    guard_clip: Option<AnimationClip>,
    parry_timer: Option<TaskHandle>,
}

impl BlockParryAbility {
    pub fn new(guard_clip: Option<AnimationClip>) -> Self {
        Self {
            guard_clip,
            parry_timer: None,
        }
    }
}

impl Ability for BlockParryAbility {
    fn kind(&self) -> AbilityKind {
        AbilityKind::BlockParry
    }

    fn can_activate(&self, ctx: &AbilityContext) -> bool {
        self.guard_clip.is_some() && !ctx.has_tag(StateTag::BlockingLocked)
    }

    fn activate(&mut self, ctx: &mut AbilityContext) -> AbilityFlow {
        let Some(clip) = self.guard_clip.clone() else {
            return AbilityFlow::Cancel;
        };

        ctx.add_tag(StateTag::Blocking);
        ctx.add_tag(StateTag::Parry);

        ctx.play_untracked(&clip);
        let parry_window = ctx.tuning.parry_window_secs;
        self.parry_timer = Some(ctx.wait_delay(AbilityKind::BlockParry, parry_window));
        ctx.wait_input_release(AbilityKind::BlockParry, AbilityInput::Block);

        crate::logger::log(&format!(
            "🛡️ ECS: Block + Parry window open ({:.2}s) (entity: {:?})",
            parry_window, ctx.owner
        ));

        AbilityFlow::Continue
    }

    fn on_task(&mut self, ctx: &mut AbilityContext, task: TaskHandle, event: TaskEvent) -> AbilityFlow {
        match event {
            TaskEvent::DelayElapsed if self.parry_timer == Some(task) => {
                self.parry_timer = None;
                ctx.remove_tag(StateTag::Parry);
                crate::logger::log(&format!(
                    "🛡️ ECS: Parry window closed at {:.3}s (entity: {:?})",
                    ctx.now, ctx.owner
                ));
                AbilityFlow::Continue
            }
            TaskEvent::InputReleased { time_held } => {
                crate::logger::log(&format!(
                    "🛡️ ECS: Block released after {:.3}s (entity: {:?})",
                    time_held, ctx.owner
                ));
                AbilityFlow::End
            }
            _ => AbilityFlow::Continue,
        }
    }

    fn end(&mut self, ctx: &mut AbilityContext, _was_cancelled: bool) {
        if let Some(clip) = &self.guard_clip {
            ctx.stop_animation(clip);
        }
        self.parry_timer = None;
        ctx.remove_tag(StateTag::Blocking);
        ctx.remove_tag(StateTag::Parry);
    }
}
