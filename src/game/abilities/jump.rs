// Jump: one upward impulse on enter

use glam::Vec3;

use super::LocomotionState;
use crate::engine::animator::TransitionParameter;
use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    /// Force applied for one fixed step
    pub jump_force: f32,
    /// Keep full upward speed after the jump button is released
    pub cancel_pull: bool,
}

impl Default for Jump {
    fn default() -> Self {
        Self {
            jump_force: 300.0,
            cancel_pull: false,
        }
    }
}

impl LocomotionState for Jump {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        log::debug!("Jump with force {}", self.jump_force);
        ctx.bodies
            .add_force(ctx.control.body, Vec3::Y * self.jump_force);
        ctx.control.datasets.set_cancel_pull(self.cancel_pull)?;
        ctx.animator.set_bool(TransitionParameter::Jump, false);
        ctx.animator.set_bool(TransitionParameter::Grounded, false);
        Ok(())
    }

    fn on_update(&self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_exit(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.control.datasets.set_cancel_pull(false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animator::Animator;
    use crate::engine::physics::{presets, BodySet};
    use crate::game::abilities::testing::Rig;
    use crate::game::abilities::StateData;
    use crate::game::characters::settings::{BASE_BOX_CENTER, BASE_BOX_SIZE};

    #[test]
    fn test_jump_pushes_up_and_clears_param() {
        let mut rig = Rig::new();
        rig.world.add_collider(
            presets::character_collider(BASE_BOX_SIZE, BASE_BOX_CENTER),
            rig.control.body,
        );
        rig.world.step();
        rig.params.set_bool(TransitionParameter::Jump, true);
        rig.params.set_bool(TransitionParameter::Grounded, true);

        let state: StateData = Jump {
            jump_force: 200.0,
            cancel_pull: true,
        }
        .into();
        let token = rig.enter(&state);

        assert!(rig.world.velocity(rig.control.body).unwrap().y > 0.0);
        assert!(!rig.params.get_bool(TransitionParameter::Jump));
        assert!(!rig.params.get_bool(TransitionParameter::Grounded));
        assert!(rig.control.datasets.cancel_pull().unwrap());

        rig.exit(&state, token);
        assert!(!rig.control.datasets.cancel_pull().unwrap());
    }
}
