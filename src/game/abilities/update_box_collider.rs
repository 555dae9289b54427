// Box collider resize: hand the controller new targets while the node runs

use glam::Vec3;

use super::LocomotionState;
use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateBoxCollider {
    pub target_size: Vec3,
    pub target_center: Vec3,
    pub size_speed: f32,
    pub center_speed: f32,
    /// Snap to the recorded landing height while resizing
    pub snap_to_landing: bool,
}

impl LocomotionState for UpdateBoxCollider {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let progress = &mut ctx.control.progress;
        progress.target_size = self.target_size;
        progress.target_center = self.target_center;
        progress.size_speed = self.size_speed;
        progress.center_speed = self.center_speed;
        progress.is_landing = self.snap_to_landing;
        Ok(())
    }

    fn on_update(&self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_exit(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.control.progress.is_landing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::abilities::testing::Rig;
    use crate::game::abilities::StateData;

    #[test]
    fn test_targets_written_on_enter() {
        let mut rig = Rig::new();
        let state: StateData = UpdateBoxCollider {
            target_size: Vec3::new(0.5, 1.0, 0.6),
            target_center: Vec3::new(0.0, 0.5, 0.0),
            size_speed: 8.0,
            center_speed: 4.0,
            snap_to_landing: true,
        }
        .into();

        let token = rig.enter(&state);
        let progress = &rig.control.progress;
        assert_eq!(progress.target_size, Vec3::new(0.5, 1.0, 0.6));
        assert_eq!(progress.center_speed, 4.0);
        assert!(progress.is_landing);

        rig.control.tick_fixed_rate(&mut rig.world, 0.1).unwrap();
        assert!(rig.control.progress.updating_spheres);

        rig.exit(&state, token);
        assert!(!rig.control.progress.is_landing);
        rig.control.tick_fixed_rate(&mut rig.world, 0.1).unwrap();
        assert!(!rig.control.progress.updating_spheres);
    }
}
