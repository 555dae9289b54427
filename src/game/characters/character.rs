// Character entity and registry

use std::sync::Arc;

use glam::Vec3;
use log::{info, warn};

use super::animation::{AnimatorGraph, GraphLayout};
use super::contact::ContactRouter;
use super::control::CharacterControl;
use super::parts::BodyPart;
use super::settings::ControlSettings;
use super::state::{run_abilities, TickContext};
use super::CharacterError;
use crate::engine::animator::{Animator, TransitionParameter};
use crate::engine::physics::{presets, BodyHandle, BodySet, PhysicsWorld};

/// Unique identifier for a character
pub type CharacterId = u32;

/// Collider radius of one ragdoll part
const RAGDOLL_PART_RADIUS: f32 = 0.1;

/// Ragdoll parts of a humanoid, offsets from the feet in the facing frame
pub const HUMANOID_RAGDOLL: [(&str, Vec3); 6] = [
    ("Head", Vec3::new(0.0, 1.65, 0.0)),
    ("Spine", Vec3::new(0.0, 1.2, 0.0)),
    ("LeftArm", Vec3::new(-0.3, 1.3, 0.0)),
    ("RightArm", Vec3::new(0.3, 1.3, 0.0)),
    ("LeftUpLeg", Vec3::new(-0.15, 0.7, 0.0)),
    ("RightUpLeg", Vec3::new(0.15, 0.7, 0.0)),
];

/// Everything needed to spawn a character
#[derive(Debug, Clone)]
pub struct CharacterSetup {
    pub name: String,
    /// Feet position
    pub position: Vec3,
    pub settings: ControlSettings,
    pub graph: Arc<GraphLayout>,
    pub ragdoll_parts: Vec<(String, Vec3)>,
}

impl CharacterSetup {
    pub fn new(name: &str, position: Vec3, graph: Arc<GraphLayout>) -> Self {
        Self {
            name: name.to_string(),
            position,
            settings: ControlSettings::default(),
            graph,
            ragdoll_parts: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: ControlSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_ragdoll(mut self, parts: &[(&str, Vec3)]) -> Self {
        self.ragdoll_parts = parts
            .iter()
            .map(|(name, offset)| (name.to_string(), *offset))
            .collect();
        self
    }
}

/// A character driven by its animator graph
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for logs)
    pub name: String,
    pub control: CharacterControl,
    pub animator: AnimatorGraph,
}

impl Character {
    /// Variable-rate tick: bookkeeping, then the animator and its abilities
    pub fn update(&mut self, tick: &mut TickContext<'_>) -> Result<(), CharacterError> {
        self.control.tick_variable_rate(tick.bodies);
        self.animator.params.set_bool(
            TransitionParameter::Grounded,
            self.control.progress.is_grounded(),
        );
        run_abilities(&mut self.control, &mut self.animator, tick)
    }

    /// Fixed-rate tick, before the physics step
    pub fn fixed_update(&mut self, bodies: &mut dyn BodySet, dt: f32) -> Result<(), CharacterError> {
        self.control.tick_fixed_rate(bodies, dt)
    }

    pub fn position(&self, bodies: &dyn BodySet) -> Option<Vec3> {
        self.control.position(bodies)
    }

    /// Name of the animator node the character is in
    pub fn current_node(&self) -> Option<&str> {
        self.animator.current_name()
    }

    fn bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        std::iter::once(self.control.body)
            .chain(self.control.ragdoll.body_parts.iter().map(|part| part.body))
    }
}

/// Owns every live character and routes physics contacts to them
#[derive(Debug, Default)]
pub struct CharacterRegistry {
    characters: Vec<Character>,
    router: ContactRouter,
    next_id: CharacterId,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body for `setup` and register a character on it.
    ///
    /// On error nothing is left behind in the world.
    pub fn spawn(
        &mut self,
        setup: CharacterSetup,
        world: &mut PhysicsWorld,
    ) -> Result<CharacterId, CharacterError> {
        let body = world.add_rigid_body(presets::character_body(setup.position));
        self.spawn_on(body, setup, world).inspect_err(|_| {
            world.remove_rigid_body(body);
        })
    }

    /// Register a character on an existing body
    pub fn spawn_on(
        &mut self,
        body: BodyHandle,
        setup: CharacterSetup,
        world: &mut PhysicsWorld,
    ) -> Result<CharacterId, CharacterError> {
        let Some(position) = world.position(body) else {
            warn!("Rejected character {}: body {:?} not found", setup.name, body);
            return Err(CharacterError::MissingBody(body));
        };

        let mut control = CharacterControl::new(body, &setup.settings).inspect_err(|err| {
            warn!("Rejected character {}: {}", setup.name, err);
        })?;

        let facing = control.facing();
        let collider = presets::character_collider(
            control.box_collider.size,
            facing.to_world(control.box_collider.center),
        );
        control.box_collider.handle = Some(world.add_collider(collider, body));

        let sensors = control.spheres.attach_sensors(world, body, facing);

        for (name, offset) in &setup.ragdoll_parts {
            let part = world.add_rigid_body(presets::ragdoll_part_body(
                position + facing.to_world(*offset),
            ));
            world.add_collider(presets::ragdoll_part_collider(RAGDOLL_PART_RADIUS), part);
            control.ragdoll.body_parts.push(BodyPart {
                name: name.clone(),
                body: part,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.router.register(id, sensors);

        info!(
            "Spawned character {} '{}' at ({}, {})",
            id, setup.name, position.z, position.y
        );
        self.characters.push(Character {
            id,
            name: setup.name,
            control,
            animator: AnimatorGraph::new(setup.graph),
        });
        Ok(id)
    }

    /// Remove a character and its bodies from the world
    pub fn despawn(&mut self, id: CharacterId, world: &mut PhysicsWorld) -> Option<Character> {
        let index = self.characters.iter().position(|c| c.id == id)?;
        let character = self.characters.remove(index);

        self.router.unregister(id);
        for body in character.bodies() {
            world.remove_rigid_body(body);
        }

        info!("Despawned character {} '{}'", id, character.name);
        Some(character)
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.characters.iter().map(|c| c.id)
    }

    /// Variable-rate tick of every character
    pub fn update(&mut self, tick: &mut TickContext<'_>) -> Result<(), CharacterError> {
        for character in &mut self.characters {
            character.update(tick)?;
        }
        Ok(())
    }

    /// Fixed-rate tick of every character; call before stepping the world
    pub fn fixed_update(&mut self, bodies: &mut dyn BodySet, dt: f32) -> Result<(), CharacterError> {
        for character in &mut self.characters {
            character.fixed_update(bodies, dt)?;
        }
        Ok(())
    }

    /// Route the last step's sensor events; call after every world step
    pub fn process_collisions(&mut self, world: &PhysicsWorld) {
        for event in world.get_collision_events() {
            for contact in self.router.resolve(&event) {
                let Some(character) = self
                    .characters
                    .iter_mut()
                    .find(|c| c.id == contact.character)
                else {
                    continue;
                };
                self.router.apply(&contact, &mut character.control, world);
            }
        }
    }
}
