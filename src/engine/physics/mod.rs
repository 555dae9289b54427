// Physics system using rapier2d
//
// The platformer plays out on the world Z/Y plane. Rapier works in 2D, so
// world Z maps to rapier x and world Y to rapier y; world X is always 0.

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyHandle, BodySet, ColliderHandle, SensorHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::PhysicsWorld;

use glam::Vec3;
use rapier2d::prelude::{Real, Vector};

/// World-space vector to rapier's plane
pub fn to_plane(v: Vec3) -> Vector<Real> {
    Vector::new(v.z, v.y)
}

/// Rapier plane vector to world space
pub fn from_plane(v: &Vector<Real>) -> Vec3 {
    Vec3::new(0.0, v.y, v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_mapping() {
        let v = to_plane(Vec3::new(3.0, 2.0, 1.0));
        assert_eq!((v.x, v.y), (1.0, 2.0));
        assert_eq!(from_plane(&v), Vec3::new(0.0, 2.0, 1.0));
    }
}
