// Locomotion abilities
//
// Each animator node carries a list of abilities. The dispatcher in
// `characters::state` calls on_enter when the node is entered, on_update every
// frame the node (or a node blending out) is active, and on_exit afterwards.
// Definitions are immutable and shared between characters; all per-character
// state lives in the context.

mod idle;
mod jump;
mod move_forward;
mod send_pathfinding_agent;
mod update_box_collider;
mod wall_slide;

pub use idle::Idle;
pub use jump::Jump;
pub use move_forward::MoveForward;
pub use send_pathfinding_agent::SendPathfindingAgent;
pub use update_box_collider::UpdateBoxCollider;
pub use wall_slide::WallSlide;

use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

/// Discriminant of an ability, used for "is X running" checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    MoveForward,
    SendPathfindingAgent,
    WallSlide,
    UpdateBoxCollider,
    Idle,
    Jump,
}

/// Callbacks an ability receives from the animator
pub trait LocomotionState {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError>;

    fn on_update(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError>;

    fn on_exit(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError>;
}

/// Every ability an animator node can carry
#[derive(Debug, Clone, PartialEq)]
pub enum StateData {
    MoveForward(MoveForward),
    SendPathfindingAgent(SendPathfindingAgent),
    WallSlide(WallSlide),
    UpdateBoxCollider(UpdateBoxCollider),
    Idle(Idle),
    Jump(Jump),
}

impl StateData {
    pub fn kind(&self) -> AbilityKind {
        match self {
            StateData::MoveForward(_) => AbilityKind::MoveForward,
            StateData::SendPathfindingAgent(_) => AbilityKind::SendPathfindingAgent,
            StateData::WallSlide(_) => AbilityKind::WallSlide,
            StateData::UpdateBoxCollider(_) => AbilityKind::UpdateBoxCollider,
            StateData::Idle(_) => AbilityKind::Idle,
            StateData::Jump(_) => AbilityKind::Jump,
        }
    }

    fn state(&self) -> &dyn LocomotionState {
        match self {
            StateData::MoveForward(state) => state,
            StateData::SendPathfindingAgent(state) => state,
            StateData::WallSlide(state) => state,
            StateData::UpdateBoxCollider(state) => state,
            StateData::Idle(state) => state,
            StateData::Jump(state) => state,
        }
    }
}

impl LocomotionState for StateData {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.state().on_enter(ctx)
    }

    fn on_update(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.state().on_update(ctx)
    }

    fn on_exit(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.state().on_exit(ctx)
    }
}

impl From<MoveForward> for StateData {
    fn from(state: MoveForward) -> Self {
        StateData::MoveForward(state)
    }
}

impl From<SendPathfindingAgent> for StateData {
    fn from(state: SendPathfindingAgent) -> Self {
        StateData::SendPathfindingAgent(state)
    }
}

impl From<WallSlide> for StateData {
    fn from(state: WallSlide) -> Self {
        StateData::WallSlide(state)
    }
}

impl From<UpdateBoxCollider> for StateData {
    fn from(state: UpdateBoxCollider) -> Self {
        StateData::UpdateBoxCollider(state)
    }
}

impl From<Idle> for StateData {
    fn from(state: Idle) -> Self {
        StateData::Idle(state)
    }
}

impl From<Jump> for StateData {
    fn from(state: Jump) -> Self {
        StateData::Jump(state)
    }
}
