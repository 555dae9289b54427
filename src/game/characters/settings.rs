// Character setup settings
//
// Every character is built from the same baseline; differences come from the
// abilities wired into its animator graph, not from these numbers.

use glam::Vec3;

use super::control::Facing;
use super::dataset::DatasetKind;
use super::parts::AttackParts;

/// Box collider size of a standing character (X unused, Y height, Z width)
pub const BASE_BOX_SIZE: Vec3 = Vec3::new(0.5, 1.8, 0.6);

/// Box collider center, feet at the origin
pub const BASE_BOX_CENTER: Vec3 = Vec3::new(0.0, 0.9, 0.0);

/// Collision sphere radius
pub const BASE_SPHERE_RADIUS: f32 = 0.05;

/// Datasets every character carries
pub const BASE_DATASETS: [DatasetKind; 2] = [DatasetKind::AirControl, DatasetKind::Scratch];

/// Settings a controller is built from
#[derive(Debug, Clone)]
pub struct ControlSettings {
    pub box_size: Vec3,
    pub box_center: Vec3,
    pub sphere_radius: f32,
    /// Datasets to initialize; must include [`DatasetKind::AirControl`]
    pub datasets: Vec<DatasetKind>,
    pub attack_parts: AttackParts,
    pub facing: Facing,
    /// Visual skeleton on; facing changes are ignored while off
    pub skeleton_enabled: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            box_size: BASE_BOX_SIZE,
            box_center: BASE_BOX_CENTER,
            sphere_radius: BASE_SPHERE_RADIUS,
            datasets: BASE_DATASETS.to_vec(),
            attack_parts: AttackParts::humanoid(),
            facing: Facing::Forward,
            skeleton_enabled: true,
        }
    }
}

impl ControlSettings {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_datasets(mut self, datasets: &[DatasetKind]) -> Self {
        self.datasets = datasets.to_vec();
        self
    }
}
