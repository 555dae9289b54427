use glam::Vec3;
use rapier2d::prelude::*;

use super::body::{BodyHandle, BodySet, SensorHandle};
use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};
use super::{from_plane, to_plane};

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector on the plane (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -9.81, 0.0))
    }

    /// Create a new physics world with custom world-space gravity
    pub fn with_gravity(gravity: Vec3) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity: to_plane(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> BodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(&mut self, collider: Collider, parent_handle: BodyHandle) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: BodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Number of rigid bodies in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    #[cfg(test)]
    pub(crate) fn push_collision_event(&self, event: GameCollisionEvent) {
        self.collision_event_queue.push(event);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl BodySet for PhysicsWorld {
    fn velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(body)
            .map(|body| from_plane(body.linvel()))
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(body) {
            body.set_linvel(to_plane(velocity), true);
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(body)
            .map(|body| from_plane(body.translation()))
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(body) {
            body.set_translation(to_plane(position), true);
        }
    }

    fn move_position(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(body) {
            if body.is_kinematic() {
                body.set_next_kinematic_translation(to_plane(position));
            } else {
                body.set_translation(to_plane(position), true);
            }
        }
    }

    fn add_force(&mut self, body: BodyHandle, force: Vec3) {
        let dt = self.integration_parameters.dt;
        if let Some(body) = self.rigid_body_set.get_mut(body) {
            body.apply_impulse(to_plane(force) * dt, true);
        }
    }

    fn set_sensor_offset(&mut self, sensor: SensorHandle, offset: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(sensor) {
            let offset = to_plane(offset);
            collider.set_position_wrt_parent(Isometry::translation(offset.x, offset.y));
        }
    }

    fn resize_box(&mut self, collider: ColliderHandle, size: Vec3, center: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(collider) {
            collider.set_shape(SharedShape::cuboid(size.z / 2.0, size.y / 2.0));
            let center = to_plane(center);
            collider.set_position_wrt_parent(Isometry::translation(center.x, center.y));
        }
    }

    fn collider_parent(&self, collider: ColliderHandle) -> Option<BodyHandle> {
        self.collider_set.get(collider).and_then(|c| c.parent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::{presets, BodyBuilder};

    #[test]
    fn test_velocity_round_trip_in_world_space() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));

        world.set_velocity(body, Vec3::new(0.0, -3.0, 2.0));
        assert_eq!(world.velocity(body), Some(Vec3::new(0.0, -3.0, 2.0)));
    }

    #[test]
    fn test_world_x_is_dropped() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));

        world.set_position(body, Vec3::new(7.0, 1.0, 2.0));
        assert_eq!(world.position(body), Some(Vec3::new(0.0, 1.0, 2.0)));
    }

    #[test]
    fn test_add_force_is_one_step_impulse() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
        world.add_collider(
            presets::character_collider(Vec3::ONE, Vec3::ZERO),
            body,
        );
        // Mass properties are computed during the first step
        world.step();

        world.add_force(body, Vec3::new(0.0, 60.0, 0.0));
        let velocity = world.velocity(body).unwrap();
        assert!(velocity.y > 0.0);
    }

    #[test]
    fn test_collider_parent() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
        let sensor = world.add_collider(presets::sphere_sensor(0.1, Vec3::ZERO), body);

        assert_eq!(world.collider_parent(sensor), Some(body));
        world.remove_rigid_body(body);
        assert_eq!(world.collider_parent(sensor), None);
        assert!(!world.contains_body(body));
    }

    #[test]
    fn test_resize_box() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
        let collider = world.add_collider(
            presets::character_collider(Vec3::ONE, Vec3::ZERO),
            body,
        );

        world.resize_box(collider, Vec3::new(1.0, 4.0, 2.0), Vec3::new(0.0, 2.0, 0.0));
        let cuboid = world
            .get_collider(collider)
            .and_then(|c| c.shape().as_cuboid())
            .map(|c| c.half_extents)
            .unwrap();
        assert_eq!((cuboid.x, cuboid.y), (1.0, 2.0));
    }

    #[test]
    fn test_move_position_kinematic_lands_after_step() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(
            BodyBuilder::new_kinematic_position_based()
                .position(Vec3::ZERO)
                .build(),
        );

        world.move_position(body, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(world.position(body), Some(Vec3::ZERO));
        world.step();
        assert_eq!(world.position(body), Some(Vec3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_missing_body_reads_none() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
        world.remove_rigid_body(body);

        assert_eq!(world.velocity(body), None);
        world.set_velocity(body, Vec3::ONE);
    }
}
