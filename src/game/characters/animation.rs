// Animator graph: named nodes with clips and abilities, and the
// parameter-driven transitions between them

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::progress::AuthorityToken;
use crate::engine::animator::{Animator, AnimatorParams, StateInfo, TransitionParameter};
use crate::game::abilities::StateData;

pub type NodeIndex = usize;

/// Errors raised while building a graph layout
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Graph has no nodes")]
    Empty,

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Clip of node {0} must have a positive duration")]
    InvalidDuration(String),
}

/// One animator node
#[derive(Debug, Clone)]
pub struct AnimatorNode {
    pub name: String,
    /// Length of one clip cycle in seconds
    pub duration: f32,
    pub looping: bool,
    pub abilities: Vec<Arc<StateData>>,
}

impl AnimatorNode {
    /// Normalized time after `time` seconds in this node
    pub fn normalized_time(&self, time: f32) -> f32 {
        let progress = time / self.duration;
        if self.looping {
            progress.fract()
        } else {
            progress.min(1.0)
        }
    }
}

/// A parameter value a transition requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub param: TransitionParameter,
    pub value: bool,
}

impl Condition {
    pub fn is(param: TransitionParameter) -> Self {
        Self { param, value: true }
    }

    pub fn not(param: TransitionParameter) -> Self {
        Self {
            param,
            value: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Source node; `None` means any node
    pub from: Option<NodeIndex>,
    pub to: NodeIndex,
    pub conditions: Vec<Condition>,
    /// Earliest normalized time (unwrapped) the transition may fire at
    pub exit_time: Option<f32>,
    /// Seconds the previous node keeps running after the switch
    pub blend: f32,
}

impl Transition {
    fn is_ready(&self, params: &AnimatorParams, progress: f32) -> bool {
        if let Some(exit_time) = self.exit_time {
            if progress < exit_time {
                return false;
            }
        }
        self.conditions
            .iter()
            .all(|condition| params.get_bool(condition.param) == condition.value)
    }
}

/// Immutable node/transition layout, shared by every character using it
#[derive(Debug, Clone)]
pub struct GraphLayout {
    nodes: Vec<AnimatorNode>,
    transitions: Vec<Transition>,
    entry: NodeIndex,
}

impl GraphLayout {
    pub fn node(&self, index: NodeIndex) -> Option<&AnimatorNode> {
        self.nodes.get(index)
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.iter().position(|node| node.name == name)
    }

    pub fn nodes(&self) -> &[AnimatorNode] {
        &self.nodes
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

struct PendingTransition {
    from: Option<String>,
    to: String,
    conditions: Vec<Condition>,
    exit_time: Option<f32>,
    blend: f32,
}

/// Builds a [`GraphLayout`]; the first node added is the entry node
#[derive(Default)]
pub struct AnimatorGraphBuilder {
    nodes: Vec<AnimatorNode>,
    transitions: Vec<PendingTransition>,
}

impl AnimatorGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node playing a looping clip
    pub fn looping(self, name: &str, duration: f32, abilities: Vec<StateData>) -> Self {
        self.node(name, duration, true, abilities)
    }

    /// Add a node playing a one-shot clip
    pub fn one_shot(self, name: &str, duration: f32, abilities: Vec<StateData>) -> Self {
        self.node(name, duration, false, abilities)
    }

    pub fn node(
        mut self,
        name: &str,
        duration: f32,
        looping: bool,
        abilities: Vec<StateData>,
    ) -> Self {
        self.nodes.push(AnimatorNode {
            name: name.to_string(),
            duration,
            looping,
            abilities: abilities.into_iter().map(Arc::new).collect(),
        });
        self
    }

    /// Add a transition; `from = None` fires from any other node
    pub fn transition(
        mut self,
        from: Option<&str>,
        to: &str,
        conditions: &[Condition],
        exit_time: Option<f32>,
        blend: f32,
    ) -> Self {
        self.transitions.push(PendingTransition {
            from: from.map(str::to_string),
            to: to.to_string(),
            conditions: conditions.to_vec(),
            exit_time,
            blend: blend.max(0.0),
        });
        self
    }

    pub fn build(self) -> Result<Arc<GraphLayout>, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut index = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if node.duration <= 0.0 {
                return Err(GraphError::InvalidDuration(node.name.clone()));
            }
            if index.insert(node.name.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.name.clone()));
            }
        }

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
        };

        let mut transitions = Vec::with_capacity(self.transitions.len());
        for pending in &self.transitions {
            let from = match &pending.from {
                Some(name) => Some(lookup(name)?),
                None => None,
            };
            transitions.push(Transition {
                from,
                to: lookup(&pending.to)?,
                conditions: pending.conditions.clone(),
                exit_time: pending.exit_time,
                blend: pending.blend,
            });
        }

        Ok(Arc::new(GraphLayout {
            nodes: self.nodes,
            transitions,
            entry: 0,
        }))
    }
}

/// One live activation of an ability
#[derive(Debug, Clone)]
pub struct ActiveAbility {
    pub state: Arc<StateData>,
    pub token: AuthorityToken,
}

/// Node being blended out
#[derive(Debug)]
struct Blend {
    node: NodeIndex,
    time: f32,
    remaining: f32,
    abilities: Vec<ActiveAbility>,
}

/// What changed during one [`AnimatorGraph::advance`]
#[derive(Debug, Default)]
pub struct GraphStep {
    /// Activations that must receive on_exit, with the state info of the
    /// node they are leaving
    pub exited: Vec<(ActiveAbility, StateInfo)>,
    /// Node whose abilities must receive on_enter
    pub entered: Option<NodeIndex>,
}

/// Per-character animator runtime over a shared layout
#[derive(Debug)]
pub struct AnimatorGraph {
    layout: Arc<GraphLayout>,
    pub params: AnimatorParams,
    current: Option<NodeIndex>,
    /// Seconds spent in the current node
    time: f32,
    active: Vec<ActiveAbility>,
    blend: Option<Blend>,
}

impl AnimatorGraph {
    pub fn new(layout: Arc<GraphLayout>) -> Self {
        Self {
            layout,
            params: AnimatorParams::new(),
            current: None,
            time: 0.0,
            active: Vec::new(),
            blend: None,
        }
    }

    pub fn layout(&self) -> &Arc<GraphLayout> {
        &self.layout
    }

    pub fn current(&self) -> Option<NodeIndex> {
        self.current
    }

    /// Name of the current node
    pub fn current_name(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.layout.node(index))
            .map(|node| node.name.as_str())
    }

    pub fn is_in(&self, name: &str) -> bool {
        self.current_name() == Some(name)
    }

    pub fn is_blending(&self) -> bool {
        self.blend.is_some()
    }

    /// State info of the current node
    pub fn state_info(&self) -> StateInfo {
        self.node_state_info(self.current, self.time)
    }

    fn node_state_info(&self, node: Option<NodeIndex>, time: f32) -> StateInfo {
        let normalized = node
            .and_then(|index| self.layout.node(index))
            .map(|node| node.normalized_time(time))
            .unwrap_or(0.0);
        StateInfo::at(normalized)
    }

    /// Move time forward and take at most one transition
    pub fn advance(&mut self, dt: f32) -> GraphStep {
        let mut step = GraphStep::default();

        let Some(current) = self.current else {
            // First frame enters the entry node without moving time
            self.current = Some(self.layout.entry);
            self.time = 0.0;
            step.entered = self.current;
            return step;
        };

        self.time += dt;

        let blend_done = match &mut self.blend {
            Some(blend) => {
                blend.time += dt;
                blend.remaining -= dt;
                blend.remaining <= 0.0
            }
            None => false,
        };
        if blend_done {
            if let Some(blend) = self.blend.take() {
                self.exit_blend(blend, &mut step);
            }
        }

        let Some(node) = self.layout.node(current) else {
            return step;
        };
        let progress = self.time / node.duration;

        let next = self
            .layout
            .transitions
            .iter()
            .filter(|t| match t.from {
                Some(from) => from == current,
                None => t.to != current,
            })
            .find(|t| t.is_ready(&self.params, progress))
            .map(|t| (t.to, t.blend));

        if let Some((to, blend)) = next {
            log::debug!(
                "Animator transition {} -> {}",
                node.name,
                self.layout.nodes[to].name
            );

            // A transition interrupts any blend still in progress
            if let Some(previous) = self.blend.take() {
                self.exit_blend(previous, &mut step);
            }

            let abilities = std::mem::take(&mut self.active);
            if blend > 0.0 {
                self.blend = Some(Blend {
                    node: current,
                    time: self.time,
                    remaining: blend,
                    abilities,
                });
            } else {
                let info = self.node_state_info(Some(current), self.time);
                step.exited
                    .extend(abilities.into_iter().map(|ability| (ability, info)));
            }

            self.current = Some(to);
            self.time = 0.0;
            step.entered = Some(to);
        }

        step
    }

    fn exit_blend(&self, blend: Blend, step: &mut GraphStep) {
        let info = self.node_state_info(Some(blend.node), blend.time);
        step.exited
            .extend(blend.abilities.into_iter().map(|ability| (ability, info)));
    }

    /// Record an activation of the current node
    pub(crate) fn push_active(&mut self, ability: ActiveAbility) {
        self.active.push(ability);
    }

    /// Every activation due an update this frame, with its node's state info
    pub(crate) fn updates(&self) -> Vec<(ActiveAbility, StateInfo)> {
        let mut updates = Vec::with_capacity(self.active.len());

        if let Some(blend) = &self.blend {
            let info = self.node_state_info(Some(blend.node), blend.time);
            updates.extend(blend.abilities.iter().cloned().map(|a| (a, info)));
        }

        let info = self.state_info();
        updates.extend(self.active.iter().cloned().map(|a| (a, info)));
        updates
    }
}
