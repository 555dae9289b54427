// Standing still: only watches input to leave the node

use super::LocomotionState;
use crate::engine::animator::TransitionParameter;
use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Idle;

impl LocomotionState for Idle {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.animator.set_bool(TransitionParameter::Move, false);
        Ok(())
    }

    fn on_update(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let input = ctx.control.input;

        if input.jump && ctx.control.progress.is_grounded() {
            ctx.animator.set_bool(TransitionParameter::Jump, true);
        }
        ctx.animator
            .set_bool(TransitionParameter::Move, input.horizontal().is_some());
        Ok(())
    }

    fn on_exit(&self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animator::Animator;
    use crate::game::abilities::testing::Rig;
    use crate::game::abilities::StateData;
    use crate::game::characters::blocking::ContactId;

    #[test]
    fn test_move_needs_exactly_one_direction() {
        let mut rig = Rig::new();
        let state: StateData = Idle.into();
        let token = rig.enter(&state);

        rig.control.input.move_right = true;
        rig.update(&state, token);
        assert!(rig.params.get_bool(TransitionParameter::Move));

        rig.control.input.move_left = true;
        rig.update(&state, token);
        assert!(!rig.params.get_bool(TransitionParameter::Move));
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut rig = Rig::new();
        let state: StateData = Idle.into();
        let token = rig.enter(&state);
        rig.control.input.jump = true;

        rig.update(&state, token);
        assert!(!rig.params.get_bool(TransitionParameter::Jump));

        rig.control.progress.touch_ground(ContactId(4));
        rig.update(&state, token);
        assert!(rig.params.get_bool(TransitionParameter::Jump));
    }
}
