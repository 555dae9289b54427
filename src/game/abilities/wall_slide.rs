// Wall slide: cap the fall speed while pressed against a wall

use glam::Vec3;

use super::LocomotionState;
use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSlide {
    /// Downward speed the controller clamps to
    pub max_fall_speed: f32,
}

impl Default for WallSlide {
    fn default() -> Self {
        Self {
            max_fall_speed: 1.5,
        }
    }
}

impl LocomotionState for WallSlide {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let datasets = &mut ctx.control.datasets;
        datasets.set_max_fall_velocity(Vec3::new(0.0, -self.max_fall_speed.abs(), 0.0))?;
        datasets.set_air_momentum(0.0)?;
        Ok(())
    }

    fn on_update(&self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_exit(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.control.datasets.set_max_fall_velocity(Vec3::ZERO)?;
        Ok(())
    }
}
