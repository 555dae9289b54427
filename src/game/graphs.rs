// Standard animator graphs

use std::sync::Arc;

use crate::engine::animator::TransitionParameter::{Grounded, Jump as JumpParam, Move};
use crate::game::abilities::{Idle, Jump, MoveForward, UpdateBoxCollider};
use crate::game::characters::animation::{
    AnimatorGraphBuilder, Condition, GraphError, GraphLayout,
};
use crate::game::characters::settings::{BASE_BOX_CENTER, BASE_BOX_SIZE};

/// Ground speed while running
pub const RUN_SPEED: f32 = 4.0;

/// Air control: momentum gained per second of held input, and its cap
pub const AIR_ACCELERATION: f32 = 6.0;
pub const AIR_MAX_MOMENTUM: f32 = 3.0;

/// Blend between ground nodes
const GROUND_BLEND: f32 = 0.1;

fn standing_box(snap_to_landing: bool) -> UpdateBoxCollider {
    UpdateBoxCollider {
        target_size: BASE_BOX_SIZE,
        target_center: BASE_BOX_CENTER,
        size_speed: 10.0,
        center_speed: 10.0,
        snap_to_landing,
    }
}

fn air_control() -> MoveForward {
    MoveForward::momentum(AIR_ACCELERATION, AIR_MAX_MOMENTUM)
}

/// Idle, run, jump, fall and land
pub fn platformer_graph() -> Result<Arc<GraphLayout>, GraphError> {
    let run = MoveForward {
        allow_early_turn: true,
        ..MoveForward::controlled(RUN_SPEED)
    };
    let fall = MoveForward {
        clear_momentum_on_exit: true,
        ..air_control()
    };

    AnimatorGraphBuilder::new()
        .looping("Idle", 1.0, vec![Idle.into(), standing_box(false).into()])
        .looping("Run", 0.8, vec![run.into()])
        .one_shot("Jump", 0.5, vec![Jump::default().into(), air_control().into()])
        .looping("Fall", 1.0, vec![fall.into()])
        .one_shot("Landing", 0.25, vec![standing_box(true).into()])
        .transition(Some("Idle"), "Jump", &[Condition::is(JumpParam)], None, 0.0)
        .transition(Some("Run"), "Jump", &[Condition::is(JumpParam)], None, 0.0)
        .transition(Some("Idle"), "Fall", &[Condition::not(Grounded)], None, 0.0)
        .transition(Some("Run"), "Fall", &[Condition::not(Grounded)], None, 0.0)
        .transition(Some("Idle"), "Run", &[Condition::is(Move)], None, GROUND_BLEND)
        .transition(Some("Run"), "Idle", &[Condition::not(Move)], None, GROUND_BLEND)
        .transition(Some("Jump"), "Fall", &[], Some(1.0), 0.0)
        .transition(Some("Fall"), "Landing", &[Condition::is(Grounded)], None, 0.0)
        .transition(Some("Landing"), "Idle", &[], Some(1.0), GROUND_BLEND)
        .build()
}

/// A character that only walks forward, for crowds and AI stand-ins
pub fn walker_graph(speed: f32) -> Result<Arc<GraphLayout>, GraphError> {
    AnimatorGraphBuilder::new()
        .looping("Walk", 1.0, vec![MoveForward::constant(speed).into()])
        .build()
}
