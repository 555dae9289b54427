// Pathfinding agent seam
//
// The navigation algorithm lives outside this crate. Characters only need to
// create an agent, park it at their position and tell it to go.

use glam::Vec3;
use std::fmt::Debug;

/// An agent that walks a path on behalf of an AI character
pub trait PathfindingAgent: Debug + Send {
    /// Toggle the agent's own navigation component
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Place the agent without pathing
    fn teleport(&mut self, position: Vec3);

    fn position(&self) -> Vec3;

    /// Start navigating toward the agent's target
    fn go_to_target(&mut self);
}

/// Creates agents on demand
pub trait AgentFactory {
    fn spawn_agent(&self) -> Box<dyn PathfindingAgent>;
}

/// Straight-line agent: heads directly to a fixed target
#[derive(Debug, Clone, PartialEq)]
pub struct DirectAgent {
    position: Vec3,
    target: Vec3,
    destination: Option<Vec3>,
    enabled: bool,
    speed: f32,
}

impl DirectAgent {
    pub fn new(target: Vec3, speed: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target,
            destination: None,
            enabled: true,
            speed,
        }
    }

    /// Destination of the current path, if one was issued
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Whether the agent reached its destination
    pub fn arrived(&self) -> bool {
        self.destination
            .map(|d| d.distance_squared(self.position) < 1e-4)
            .unwrap_or(false)
    }

    /// Advance along the straight path
    pub fn step(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        let Some(destination) = self.destination else {
            return;
        };

        let to_target = destination - self.position;
        let max_step = self.speed * dt;
        if to_target.length() <= max_step {
            self.position = destination;
        } else {
            self.position += to_target.normalize() * max_step;
        }
    }
}

impl PathfindingAgent for DirectAgent {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn go_to_target(&mut self) {
        self.enabled = true;
        self.destination = Some(self.target);
        log::debug!("Pathfinding agent heading to {:?}", self.target);
    }
}

/// Factory for [`DirectAgent`]s sharing one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectAgentFactory {
    pub target: Vec3,
    pub speed: f32,
}

impl AgentFactory for DirectAgentFactory {
    fn spawn_agent(&self) -> Box<dyn PathfindingAgent> {
        Box::new(DirectAgent::new(self.target, self.speed))
    }
}
