// Horizontal movement ability: momentum, constant and input-controlled modes

use super::{AbilityKind, LocomotionState};
use crate::core::math::lerp;
use crate::core::SpeedCurve;
use crate::engine::animator::TransitionParameter;
use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

/// Momentum decay factor per second while a side is blocked
const MOMENTUM_DECAY: f32 = 1.5;

/// Starting momentum below this is ignored
const MOMENTUM_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub struct MoveForward {
    pub allow_early_turn: bool,
    pub lock_direction: bool,
    pub lock_direction_next_state: bool,
    /// Always advance, regardless of input
    pub constant: bool,
    /// Speed multiplier over normalized time
    pub speed_graph: SpeedCurve,
    pub speed: f32,

    // Window during which the character ignores other characters' boxes
    pub ignore_character_box: bool,
    pub ignore_start_time: f32,
    pub ignore_end_time: f32,

    pub use_momentum: bool,
    pub starting_momentum: f32,
    pub max_momentum: f32,
    pub clear_momentum_on_exit: bool,

    /// Constant mode walks backwards while facing the attacker
    pub move_on_hit: bool,
}

impl Default for MoveForward {
    fn default() -> Self {
        Self {
            allow_early_turn: false,
            lock_direction: false,
            lock_direction_next_state: false,
            constant: false,
            speed_graph: SpeedCurve::constant(1.0),
            speed: 1.0,
            ignore_character_box: false,
            ignore_start_time: 0.0,
            ignore_end_time: 0.0,
            use_momentum: false,
            starting_momentum: 0.0,
            max_momentum: 0.0,
            clear_momentum_on_exit: false,
            move_on_hit: false,
        }
    }
}

impl MoveForward {
    /// Input-controlled walk/run
    pub fn controlled(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Air control driven by stored momentum
    pub fn momentum(speed: f32, max_momentum: f32) -> Self {
        Self {
            speed,
            use_momentum: true,
            max_momentum,
            ..Self::default()
        }
    }

    /// Auto-forward movement
    pub fn constant(speed: f32) -> Self {
        Self {
            speed,
            constant: true,
            ..Self::default()
        }
    }

    fn is_blocked(ctx: &StateContext<'_>) -> bool {
        ctx.control.blocking.front_blocked_count() != 0
    }

    fn update_ignore_time(&self, ctx: &mut StateContext<'_>) {
        let t = ctx.state_info.normalized_time;
        ctx.control.progress.is_ignore_character_time =
            self.ignore_character_box && t > self.ignore_start_time && t < self.ignore_end_time;
    }

    fn update_momentum(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let momentum = ctx.control.datasets.air_momentum()?;
        let step = self.speed_graph.evaluate(ctx.state_info.normalized_time) * self.speed * ctx.dt;

        let right_blocked = ctx.control.blocking.right_side_blocked();
        let left_blocked = ctx.control.blocking.left_side_blocked();
        let input = ctx.control.input;

        let mut next = momentum;
        if !right_blocked && input.move_right {
            next = momentum + step;
        }
        if !left_blocked && input.move_left {
            next = momentum - step;
        }
        if right_blocked || left_blocked {
            next = lerp(momentum, 0.0, ctx.dt * MOMENTUM_DECAY);
        }

        let max = self.max_momentum.abs();
        next = next.clamp(-max, max);
        ctx.control.datasets.set_air_momentum(next)?;

        // Facing and the move read the stored value, so a reversal turns and
        // moves on the same tick
        if next > 0.0 {
            ctx.control.face_forward(ctx.scene, true);
        } else if next < 0.0 {
            ctx.control.face_forward(ctx.scene, false);
        }

        if !Self::is_blocked(ctx) {
            ctx.control
                .move_forward(ctx.bodies, self.speed, next.abs(), ctx.dt);
        }

        Ok(())
    }

    fn constant_move(&self, ctx: &mut StateContext<'_>) {
        if !Self::is_blocked(ctx) {
            let speed = if self.move_on_hit && ctx.control.is_facing_attacker() {
                -self.speed
            } else {
                self.speed
            };
            let curve = self.speed_graph.evaluate(ctx.state_info.normalized_time);
            ctx.control.move_forward(ctx.bodies, speed, curve, ctx.dt);
        }

        ctx.animator.set_bool(
            TransitionParameter::Move,
            ctx.control.input.any_horizontal(),
        );
    }

    fn controlled_move(&self, ctx: &mut StateContext<'_>) {
        // Both or neither held
        let Some(direction) = ctx.control.input.horizontal() else {
            ctx.animator.set_bool(TransitionParameter::Move, false);
            return;
        };

        if !Self::is_blocked(ctx) {
            let curve = self.speed_graph.evaluate(ctx.state_info.normalized_time);
            ctx.control
                .move_forward(ctx.bodies, self.speed, curve, ctx.dt);
        }

        if !self.lock_direction {
            ctx.control.set_facing(direction);
        }
    }
}

impl LocomotionState for MoveForward {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.control.progress.latest_move_forward = Some(ctx.token);

        let progress = &ctx.control.progress;
        if self.allow_early_turn
            && !progress.disallow_early_turn
            && !progress.lock_direction_next_state
        {
            let input = ctx.control.input;
            if input.move_left {
                ctx.control.face_forward(ctx.scene, false);
            }
            if input.move_right {
                ctx.control.face_forward(ctx.scene, true);
            }
        }

        if self.starting_momentum > MOMENTUM_EPSILON {
            let momentum = if ctx.control.is_facing_forward() {
                self.starting_momentum
            } else {
                -self.starting_momentum
            };
            ctx.control.datasets.set_air_momentum(momentum)?;
        }

        ctx.control.progress.disallow_early_turn = false;
        ctx.control.progress.lock_direction_next_state = false;
        Ok(())
    }

    fn on_update(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.control.progress.lock_direction_next_state = self.lock_direction_next_state;

        if !ctx.control.progress.has_authority(ctx.token) {
            log::trace!("MoveForward {:?} lost authority", ctx.token);
            return Ok(());
        }
        if ctx.control.progress.is_running(AbilityKind::WallSlide) {
            return Ok(());
        }

        self.update_ignore_time(ctx);

        if ctx.control.input.jump && ctx.control.progress.is_grounded() {
            ctx.animator.set_bool(TransitionParameter::Jump, true);
        }
        ctx.animator
            .set_bool(TransitionParameter::Turbo, ctx.control.input.turbo);

        if self.use_momentum {
            self.update_momentum(ctx)
        } else if self.constant {
            self.constant_move(ctx);
            Ok(())
        } else {
            self.controlled_move(ctx);
            Ok(())
        }
    }

    fn on_exit(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        if self.clear_momentum_on_exit {
            ctx.control.datasets.set_air_momentum(0.0)?;
        }
        Ok(())
    }
}
