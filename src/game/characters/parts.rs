// Body parts, attack attach points and damage records

use glam::Vec3;

use super::character::CharacterId;
use super::control::Facing;
use crate::engine::physics::BodyHandle;

/// Named point on the character's skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct AttachPoint {
    pub name: String,
    /// Offset from the character origin, in the facing frame
    pub local_offset: Vec3,
}

impl AttachPoint {
    pub fn new(name: &str, local_offset: Vec3) -> Self {
        Self {
            name: name.to_string(),
            local_offset,
        }
    }
}

/// Which limb (or weapon) an attack hits with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackPartType {
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
    MeleeWeapon,
}

/// Limb attach points used as attack triggers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackParts {
    pub left_hand: Option<AttachPoint>,
    pub right_hand: Option<AttachPoint>,
    pub left_foot: Option<AttachPoint>,
    pub right_foot: Option<AttachPoint>,
}

impl AttackParts {
    /// Hands and feet at typical humanoid offsets
    pub fn humanoid() -> Self {
        Self {
            left_hand: Some(AttachPoint::new("LeftHand_Attack", Vec3::new(-0.3, 1.2, 0.2))),
            right_hand: Some(AttachPoint::new("RightHand_Attack", Vec3::new(0.3, 1.2, 0.2))),
            left_foot: Some(AttachPoint::new("LeftFoot_Attack", Vec3::new(-0.15, 0.1, 0.1))),
            right_foot: Some(AttachPoint::new("RightFoot_Attack", Vec3::new(0.15, 0.1, 0.1))),
        }
    }
}

/// A weapon the character is holding
#[derive(Debug, Clone, PartialEq)]
pub struct MeleeWeapon {
    pub name: String,
    pub trigger: AttachPoint,
}

/// One ragdoll part with its own body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPart {
    pub name: String,
    pub body: BodyHandle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RagdollData {
    pub body_parts: Vec<BodyPart>,
}

impl RagdollData {
    /// First part whose name contains `name`
    pub fn find(&self, name: &str) -> Option<&BodyPart> {
        self.body_parts.iter().find(|part| part.name.contains(name))
    }
}

/// Force coefficients of an attack, in the attacker's local axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttackInfo {
    pub forward_force: f32,
    pub right_force: f32,
    pub up_force: f32,
}

impl AttackInfo {
    /// World-space force for an attacker facing `facing`
    pub fn force(&self, facing: Facing) -> Vec3 {
        facing.forward() * self.forward_force
            + facing.right() * self.right_force
            + Vec3::Y * self.up_force
    }
}

/// The last hit this character took
#[derive(Debug, Clone, PartialEq)]
pub struct DamageRecord {
    pub attacker: CharacterId,
    pub attacker_position: Vec3,
    pub attacker_facing: Facing,
    pub attack: AttackInfo,
    /// Ragdoll part that was struck
    pub damaged_part: BodyHandle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageDetector {
    damaged: Option<DamageRecord>,
}

impl DamageDetector {
    /// Record a hit reported by the collision system
    pub fn register_hit(&mut self, record: DamageRecord) {
        log::debug!(
            "Hit registered from character {} ({:?})",
            record.attacker,
            record.attack
        );
        self.damaged = Some(record);
    }

    pub fn damaged(&self) -> Option<&DamageRecord> {
        self.damaged.as_ref()
    }

    pub fn clear(&mut self) {
        self.damaged = None;
    }
}
