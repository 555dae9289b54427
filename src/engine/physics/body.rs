use super::collision::CollisionGroups;
use glam::Vec3;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Handle of a body a character or ragdoll part owns
pub type BodyHandle = RigidBodyHandle;

/// Handle of a collision-sphere sensor
pub type SensorHandle = ColliderHandle;

/// Narrow view of the physics bodies the locomotion code drives.
///
/// Vectors are world-space: Z is the horizontal axis of the platformer plane,
/// Y is up, X is unused. Reads return `None` for handles that are gone.
pub trait BodySet {
    fn velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3);

    fn position(&self, body: BodyHandle) -> Option<Vec3>;

    /// Teleport without interpolation
    fn set_position(&mut self, body: BodyHandle, position: Vec3);

    /// Move the body to `position` for the next step
    fn move_position(&mut self, body: BodyHandle, position: Vec3);

    /// Apply `force` for the duration of one fixed step
    fn add_force(&mut self, body: BodyHandle, force: Vec3);

    /// Place a sensor relative to its parent body
    fn set_sensor_offset(&mut self, sensor: SensorHandle, offset: Vec3);

    /// Reshape a box collider and move it relative to its parent
    fn resize_box(&mut self, collider: ColliderHandle, size: Vec3, center: Vec3);

    /// Body a collider is attached to
    fn collider_parent(&self, collider: ColliderHandle) -> Option<BodyHandle>;

    fn contains_body(&self, body: BodyHandle) -> bool {
        self.position(body).is_some()
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new kinematic position-based body (not affected by forces)
    pub fn new_kinematic_position_based() -> Self {
        Self {
            body_type: RigidBodyType::KinematicPositionBased,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position from a world-space point on the platformer plane
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Isometry::translation(position.z, position.y);
        self
    }

    /// Set the initial world-space velocity
    pub fn linvel(mut self, velocity: Vec3) -> Self {
        self.linvel = super::to_plane(velocity);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters turn by facing, never by torque)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        let mut body = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build();

        if self.body_type == RigidBodyType::Dynamic {
            body.set_angular_damping(1.0);
        }

        body
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    offset: Vector<Real>,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Real,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            offset: Vector::zeros(),
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Box collider from a world-space size (Z is width, Y is height)
    pub fn box_shape(size: Vec3) -> Self {
        Self::with_shape(SharedShape::cuboid(size.z / 2.0, size.y / 2.0))
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Offset from the parent body, world-space
    pub fn offset(mut self, offset: Vec3) -> Self {
        self.offset = super::to_plane(offset);
        self
    }

    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects overlaps but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .translation(self.offset)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(self.active_events)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Character body (dynamic, rotation locked, never sleeps)
    pub fn character_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position)
            .lock_rotation()
            .gravity_scale(1.0)
            .can_sleep(false)
            .build()
    }

    /// Character box collider
    pub fn character_collider(size: Vec3, center: Vec3) -> Collider {
        ColliderBuilder2D::box_shape(size)
            .offset(center)
            .collision_groups(CollisionGroups::Character)
            .friction(0.0)
            .density(1.0)
            .build()
    }

    /// One collision sphere; massless so it never changes the body's inertia
    pub fn sphere_sensor(radius: Real, offset: Vec3) -> Collider {
        ColliderBuilder2D::circle(radius)
            .offset(offset)
            .collision_groups(CollisionGroups::Sensor)
            .sensor(true)
            .density(0.0)
            .build()
    }

    /// Platform or wall body (fixed)
    pub fn platform_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_fixed().position(position).build()
    }

    /// Platform or wall collider
    pub fn platform_collider(size: Vec3) -> Collider {
        ColliderBuilder2D::box_shape(size)
            .collision_groups(CollisionGroups::Terrain)
            .friction(0.3)
            .build()
    }

    /// Ragdoll part body; floats in place until something hits it
    pub fn ragdoll_part_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position)
            .gravity_scale(0.0)
            .can_sleep(false)
            .build()
    }

    /// Ragdoll part collider
    pub fn ragdoll_part_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Ragdoll)
            .density(1.0)
            .build()
    }
}
