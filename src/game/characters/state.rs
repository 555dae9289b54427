// Ability dispatch
//
// Bridges the animator graph and the abilities: after the graph advances,
// activations that left are exited, the entered node's abilities are entered
// with fresh authority tokens, and every live activation is updated.

use super::animation::{ActiveAbility, AnimatorGraph};
use super::control::CharacterControl;
use super::progress::AuthorityToken;
use super::CharacterError;
use crate::engine::animator::{Animator, StateInfo};
use crate::engine::pathfinding::AgentFactory;
use crate::engine::physics::BodySet;
use crate::engine::scene::SceneQuery;
use crate::game::abilities::LocomotionState;

/// Everything one ability callback may read or write
pub struct StateContext<'a> {
    pub control: &'a mut CharacterControl,
    pub animator: &'a mut dyn Animator,
    pub bodies: &'a mut dyn BodySet,
    pub scene: &'a dyn SceneQuery,
    pub agents: &'a dyn AgentFactory,
    /// Node the ability is attached to
    pub state_info: StateInfo,
    /// This activation's authority token
    pub token: AuthorityToken,
    pub dt: f32,
}

/// Host collaborators for one tick of every character
pub struct TickContext<'a> {
    pub bodies: &'a mut dyn BodySet,
    pub scene: &'a dyn SceneQuery,
    pub agents: &'a dyn AgentFactory,
    pub dt: f32,
}

fn context<'a>(
    control: &'a mut CharacterControl,
    animator: &'a mut AnimatorGraph,
    tick: &'a mut TickContext<'_>,
    state_info: StateInfo,
    token: AuthorityToken,
) -> StateContext<'a> {
    StateContext {
        control,
        animator: &mut animator.params,
        bodies: &mut *tick.bodies,
        scene: tick.scene,
        agents: tick.agents,
        state_info,
        token,
        dt: tick.dt,
    }
}

fn exit_all(
    control: &mut CharacterControl,
    animator: &mut AnimatorGraph,
    tick: &mut TickContext<'_>,
    exited: Vec<(ActiveAbility, StateInfo)>,
) -> Result<(), CharacterError> {
    for (ability, info) in exited {
        let kind = ability.state.kind();
        log::debug!("Exit {:?} ({:?})", kind, ability.token);

        ability
            .state
            .on_exit(&mut context(control, animator, tick, info, ability.token))?;
        control.progress.unmark_running(kind);
    }
    Ok(())
}

/// Advance the graph by `tick.dt` and run every ability callback due
pub fn run_abilities(
    control: &mut CharacterControl,
    animator: &mut AnimatorGraph,
    tick: &mut TickContext<'_>,
) -> Result<(), CharacterError> {
    let step = animator.advance(tick.dt);

    exit_all(control, animator, tick, step.exited)?;

    if let Some(node) = step.entered {
        let abilities = animator
            .layout()
            .node(node)
            .map(|node| node.abilities.clone())
            .unwrap_or_default();
        let info = animator.state_info();

        for state in abilities {
            let token = control.progress.issue_token();
            let kind = state.kind();
            log::debug!("Enter {:?} ({:?})", kind, token);

            control.progress.mark_running(kind);
            state.on_enter(&mut context(control, animator, tick, info, token))?;
            animator.push_active(ActiveAbility { state, token });
        }
    }

    for (ability, info) in animator.updates() {
        ability
            .state
            .on_update(&mut context(control, animator, tick, info, ability.token))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animator::TransitionParameter;
    use crate::engine::pathfinding::DirectAgentFactory;
    use crate::engine::physics::{presets, PhysicsWorld};
    use crate::engine::scene::{ActiveScene, GameScene};
    use crate::game::abilities::{AbilityKind, MoveForward, UpdateBoxCollider};
    use crate::game::characters::animation::{AnimatorGraphBuilder, Condition};
    use crate::game::characters::settings::ControlSettings;
    use approx::assert_relative_eq;
    use glam::Vec3;

    struct Harness {
        world: PhysicsWorld,
        control: CharacterControl,
        graph: AnimatorGraph,
        scene: ActiveScene,
        agents: DirectAgentFactory,
    }

    impl Harness {
        fn new(graph: AnimatorGraph) -> Self {
            let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
            let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
            Self {
                control: CharacterControl::new(body, &ControlSettings::default()).unwrap(),
                world,
                graph,
                scene: ActiveScene(GameScene::Sample),
                agents: DirectAgentFactory {
                    target: Vec3::ZERO,
                    speed: 1.0,
                },
            }
        }

        fn run(&mut self, dt: f32) {
            let mut tick = TickContext {
                bodies: &mut self.world,
                scene: &self.scene,
                agents: &self.agents,
                dt,
            };
            run_abilities(&mut self.control, &mut self.graph, &mut tick).unwrap();
        }

        fn z(&self) -> f32 {
            self.world.position(self.control.body).unwrap().z
        }
    }

    fn walk_then_dash() -> AnimatorGraph {
        let layout = AnimatorGraphBuilder::new()
            .looping("Walk", 1.0, vec![MoveForward::controlled(1.0).into()])
            .looping("Dash", 1.0, vec![MoveForward::controlled(10.0).into()])
            .transition(
                Some("Walk"),
                "Dash",
                &[Condition::is(TransitionParameter::Turbo)],
                None,
                0.5,
            )
            .build()
            .unwrap();
        AnimatorGraph::new(layout)
    }

    #[test]
    fn test_enter_marks_running_and_claims_authority() {
        let mut harness = Harness::new(walk_then_dash());
        harness.run(0.1);

        assert!(harness.control.progress.is_running(AbilityKind::MoveForward));
        assert!(harness.control.progress.latest_move_forward.is_some());
    }

    #[test]
    fn test_blend_keeps_old_mover_updating_without_authority() {
        let mut harness = Harness::new(walk_then_dash());
        harness.control.input.move_right = true;
        harness.control.input.turbo = true;

        // Enter Walk: first update moves 1.0 * 0.1 and raises Turbo
        harness.run(0.1);
        assert_relative_eq!(harness.z(), 0.1, epsilon = 1e-5);

        // Walk -> Dash with a blend; only Dash moves
        harness.run(0.1);
        assert!(harness.graph.is_blending());
        assert_eq!(harness.graph.updates().len(), 2);
        assert_relative_eq!(harness.z(), 1.1, epsilon = 1e-5);

        // Two MoveForward activations are live during the blend
        harness.control.progress.unmark_running(AbilityKind::MoveForward);
        assert!(harness.control.progress.is_running(AbilityKind::MoveForward));
        harness.control.progress.mark_running(AbilityKind::MoveForward);

        for _ in 0..6 {
            harness.run(0.1);
        }
        assert!(!harness.graph.is_blending());
        assert_eq!(harness.graph.updates().len(), 1);
        assert_relative_eq!(harness.z(), 7.1, epsilon = 1e-4);
    }

    #[test]
    fn test_exit_unmarks_running() {
        let layout = AnimatorGraphBuilder::new()
            .looping(
                "Crouch",
                1.0,
                vec![UpdateBoxCollider {
                    target_size: Vec3::new(0.5, 1.0, 0.6),
                    target_center: Vec3::new(0.0, 0.5, 0.0),
                    size_speed: 5.0,
                    center_speed: 5.0,
                    snap_to_landing: true,
                }
                .into()],
            )
            .looping("Stand", 1.0, vec![])
            .transition(Some("Crouch"), "Stand", &[], Some(0.5), 0.0)
            .build()
            .unwrap();
        let mut harness = Harness::new(AnimatorGraph::new(layout));

        harness.run(0.1);
        assert!(harness
            .control
            .progress
            .is_running(AbilityKind::UpdateBoxCollider));
        assert!(harness.control.progress.is_landing);

        for _ in 0..6 {
            harness.run(0.1);
        }
        assert!(harness.graph.is_in("Stand"));
        assert!(!harness
            .control
            .progress
            .is_running(AbilityKind::UpdateBoxCollider));
        assert!(!harness.control.progress.is_landing);
    }
}
