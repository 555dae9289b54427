// AI hook: park the character's pathfinding agent at the character and send it

use super::LocomotionState;
use crate::game::characters::state::StateContext;
use crate::game::characters::CharacterError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SendPathfindingAgent;

impl LocomotionState for SendPathfindingAgent {
    fn on_enter(&self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let position = ctx.control.position(ctx.bodies).unwrap_or_default();
        let agents = ctx.agents;
        let agent = ctx
            .control
            .ai
            .pathfinding_agent
            .get_or_insert_with(|| {
                log::debug!("Creating pathfinding agent");
                agents.spawn_agent()
            });

        agent.set_enabled(false);
        agent.teleport(position);
        agent.go_to_target();
        Ok(())
    }

    fn on_update(&self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_exit(&self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }
}
