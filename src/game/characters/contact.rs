// Contact routing: physics sensor events to blocking counts and ground contact
//
// Every collision sphere is a sensor collider registered here with its owner
// and group. Front/back tags depend on facing at the moment of contact, so the
// tags emitted on enter are remembered and exactly those are removed on exit.

use std::collections::HashMap;

use super::blocking::{BlockingSide, ContactId};
use super::character::CharacterId;
use super::control::{CharacterControl, Facing};
use super::spheres::SphereGroup;
use crate::engine::physics::{BodySet, ColliderHandle, CollisionEvent, SensorHandle};

/// A sensor event resolved to the character it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorContact {
    pub character: CharacterId,
    pub group: SphereGroup,
    pub sensor: SensorHandle,
    pub other: ColliderHandle,
    pub contact: ContactId,
    pub started: bool,
}

#[derive(Debug, Clone, Copy)]
struct SensorOwner {
    character: CharacterId,
    group: SphereGroup,
}

#[derive(Debug, Default)]
pub struct ContactRouter {
    sensors: HashMap<SensorHandle, SensorOwner>,
    /// Sides tagged per live contact, keyed by contact then owner
    tagged: HashMap<ContactId, (CharacterId, Vec<BlockingSide>)>,
}

/// Contact id of a (sensor, other collider) pair
pub fn contact_id(sensor: SensorHandle, other: ColliderHandle) -> ContactId {
    let (sensor_index, _) = sensor.into_raw_parts();
    let (other_index, _) = other.into_raw_parts();
    ContactId(((sensor_index as u64) << 32) | other_index as u64)
}

/// World sides a sphere group blocks for a character facing `facing`
fn blocking_sides(group: SphereGroup, facing: Facing) -> Vec<BlockingSide> {
    let (ahead, behind) = match facing {
        Facing::Forward => (BlockingSide::Right, BlockingSide::Left),
        Facing::Backward => (BlockingSide::Left, BlockingSide::Right),
    };
    match group {
        SphereGroup::Front => vec![BlockingSide::Front, ahead],
        SphereGroup::Back => vec![BlockingSide::Back, behind],
        SphereGroup::Up => vec![BlockingSide::Up],
        SphereGroup::Bottom => Vec::new(),
    }
}

impl ContactRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        character: CharacterId,
        sensors: impl IntoIterator<Item = (SensorHandle, SphereGroup)>,
    ) {
        for (sensor, group) in sensors {
            self.sensors.insert(sensor, SensorOwner { character, group });
        }
    }

    /// Forget every sensor and live contact of `character`
    pub fn unregister(&mut self, character: CharacterId) {
        self.sensors.retain(|_, owner| owner.character != character);
        self.tagged.retain(|_, (owner, _)| *owner != character);
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn live_contacts(&self) -> usize {
        self.tagged.len()
    }

    /// Resolve a physics event to zero, one or two sensor contacts
    pub fn resolve(&self, event: &CollisionEvent) -> Vec<SensorContact> {
        let (a, b) = event.colliders();
        let started = event.is_started();

        [(a, b), (b, a)]
            .into_iter()
            .filter_map(|(sensor, other)| {
                let owner = self.sensors.get(&sensor)?;
                Some(SensorContact {
                    character: owner.character,
                    group: owner.group,
                    sensor,
                    other,
                    contact: contact_id(sensor, other),
                    started,
                })
            })
            .collect()
    }

    /// Apply one resolved contact to its character
    pub fn apply(
        &mut self,
        contact: &SensorContact,
        control: &mut CharacterControl,
        bodies: &dyn BodySet,
    ) {
        // A character's own colliders never block it
        if bodies.collider_parent(contact.other) == Some(control.body) {
            return;
        }

        if contact.group == SphereGroup::Bottom {
            if contact.started {
                if control.progress.touch_ground(contact.contact) {
                    log::trace!("Character {} grounded", contact.character);
                }
                if let Some(position) = bodies.position(control.body) {
                    control.progress.landing_position = position;
                }
            } else if control.progress.leave_ground(contact.contact) {
                log::trace!("Character {} airborne", contact.character);
            }
            return;
        }

        if contact.started {
            let sides = blocking_sides(contact.group, control.facing());
            for side in &sides {
                control.blocking.enter(*side, contact.contact);
            }
            self.tagged
                .insert(contact.contact, (contact.character, sides));
        } else if let Some((_, sides)) = self.tagged.remove(&contact.contact) {
            for side in sides {
                control.blocking.exit(side, contact.contact);
            }
        }
    }
}
