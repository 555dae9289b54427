// Collision spheres around the character's box collider
//
// Four groups of small sensors trace the box outline. Their overlaps are what
// the contact router turns into blocking and ground contacts, so they have to
// follow the box whenever it is resized.

use glam::Vec3;

use super::control::{BoxCollider, Facing};
use crate::engine::physics::{presets, BodyHandle, BodySet, PhysicsWorld, SensorHandle};

const BOTTOM_SPHERES: usize = 5;
const UP_SPHERES: usize = 5;
const FRONT_SPHERES: usize = 10;
const BACK_SPHERES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SphereGroup {
    Bottom,
    Up,
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionSphere {
    /// Position in the facing frame (+Z is front)
    pub local: Vec3,
    pub sensor: Option<SensorHandle>,
}

#[derive(Debug, Clone)]
pub struct CollisionSpheres {
    pub radius: f32,
    bottom: Vec<CollisionSphere>,
    up: Vec<CollisionSphere>,
    front: Vec<CollisionSphere>,
    back: Vec<CollisionSphere>,
    synced_facing: Option<Facing>,
}

/// `count` evenly spaced values from `start` to `end`
fn spread(start: f32, end: f32, count: usize) -> impl Iterator<Item = f32> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f32
    } else {
        0.0
    };
    (0..count).map(move |i| start + step * i as f32)
}

fn empty_group(count: usize) -> Vec<CollisionSphere> {
    vec![
        CollisionSphere {
            local: Vec3::ZERO,
            sensor: None,
        };
        count
    ]
}

impl CollisionSpheres {
    pub fn new(radius: f32, collider: &BoxCollider) -> Self {
        let mut spheres = Self {
            radius,
            bottom: empty_group(BOTTOM_SPHERES),
            up: empty_group(UP_SPHERES),
            front: empty_group(FRONT_SPHERES),
            back: empty_group(BACK_SPHERES),
            synced_facing: None,
        };
        spheres.reposition_all(collider);
        spheres
    }

    pub fn group(&self, group: SphereGroup) -> &[CollisionSphere] {
        match group {
            SphereGroup::Bottom => &self.bottom,
            SphereGroup::Up => &self.up,
            SphereGroup::Front => &self.front,
            SphereGroup::Back => &self.back,
        }
    }

    fn group_mut(&mut self, group: SphereGroup) -> &mut Vec<CollisionSphere> {
        match group {
            SphereGroup::Bottom => &mut self.bottom,
            SphereGroup::Up => &mut self.up,
            SphereGroup::Front => &mut self.front,
            SphereGroup::Back => &mut self.back,
        }
    }

    /// Rows stop short of the corners so ground and walls never share a sphere
    fn inset(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn reposition_bottom(&mut self, collider: &BoxCollider) {
        let (min, max) = collider.local_bounds();
        let inset = self.inset();
        for (sphere, z) in self
            .bottom
            .iter_mut()
            .zip(spread(min.z + inset, max.z - inset, BOTTOM_SPHERES))
        {
            sphere.local = Vec3::new(0.0, min.y, z);
        }
    }

    pub fn reposition_up(&mut self, collider: &BoxCollider) {
        let (min, max) = collider.local_bounds();
        let inset = self.inset();
        for (sphere, z) in self
            .up
            .iter_mut()
            .zip(spread(min.z + inset, max.z - inset, UP_SPHERES))
        {
            sphere.local = Vec3::new(0.0, max.y, z);
        }
    }

    pub fn reposition_front(&mut self, collider: &BoxCollider) {
        let (min, max) = collider.local_bounds();
        let inset = self.inset();
        for (sphere, y) in self
            .front
            .iter_mut()
            .zip(spread(min.y + inset, max.y - inset, FRONT_SPHERES))
        {
            sphere.local = Vec3::new(0.0, y, max.z);
        }
    }

    pub fn reposition_back(&mut self, collider: &BoxCollider) {
        let (min, max) = collider.local_bounds();
        let inset = self.inset();
        for (sphere, y) in self
            .back
            .iter_mut()
            .zip(spread(min.y + inset, max.y - inset, BACK_SPHERES))
        {
            sphere.local = Vec3::new(0.0, y, min.z);
        }
    }

    pub fn reposition_all(&mut self, collider: &BoxCollider) {
        self.reposition_front(collider);
        self.reposition_bottom(collider);
        self.reposition_back(collider);
        self.reposition_up(collider);
    }

    /// Create one sensor per sphere on `body`
    pub fn attach_sensors(
        &mut self,
        world: &mut PhysicsWorld,
        body: BodyHandle,
        facing: Facing,
    ) -> Vec<(SensorHandle, SphereGroup)> {
        let radius = self.radius;
        let mut attached = Vec::new();

        for group in [
            SphereGroup::Bottom,
            SphereGroup::Up,
            SphereGroup::Front,
            SphereGroup::Back,
        ] {
            for sphere in self.group_mut(group) {
                let offset = facing.to_world(sphere.local);
                let handle = world.add_collider(presets::sphere_sensor(radius, offset), body);
                sphere.sensor = Some(handle);
                attached.push((handle, group));
            }
        }

        self.synced_facing = Some(facing);
        attached
    }

    /// Whether sensors still reflect `facing`
    pub fn needs_sync(&self, facing: Facing) -> bool {
        self.synced_facing != Some(facing)
    }

    /// Push current sphere positions to the physics sensors
    pub fn sync_sensors(&mut self, bodies: &mut dyn BodySet, facing: Facing) {
        for group in [&self.bottom, &self.up, &self.front, &self.back] {
            for sphere in group.iter() {
                if let Some(sensor) = sphere.sensor {
                    bodies.set_sensor_offset(sensor, facing.to_world(sphere.local));
                }
            }
        }
        self.synced_facing = Some(facing);
    }
}
