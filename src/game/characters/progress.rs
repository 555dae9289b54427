// Animation progress: per-character scratch state shared by abilities
// and the controller across frames

use glam::Vec3;
use std::collections::{HashMap, HashSet};

use super::blocking::ContactId;
use super::parts::MeleeWeapon;
use crate::game::abilities::AbilityKind;

/// Identifies one activation of an ability on one character.
///
/// Tokens increase monotonically per character, so comparing the stored
/// token with an activation's own token answers "am I still the driver".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorityToken(pub u64);

#[derive(Debug, Clone)]
pub struct AnimationProgress {
    /// Activation currently allowed to drive movement
    pub latest_move_forward: Option<AuthorityToken>,
    next_token: u64,

    /// Live bottom-sphere contacts; empty while airborne
    ground: HashSet<ContactId>,
    pub is_landing: bool,
    pub landing_position: Vec3,

    // Box collider targets
    pub target_size: Vec3,
    pub target_center: Vec3,
    pub size_speed: f32,
    pub center_speed: f32,

    pub disallow_early_turn: bool,
    pub lock_direction_next_state: bool,
    pub is_ignore_character_time: bool,
    pub updating_spheres: bool,
    /// Derived each frame from the damage record
    pub facing_attacker: bool,

    pub holding_weapon: Option<MeleeWeapon>,

    running: HashMap<AbilityKind, u32>,
}

impl AnimationProgress {
    pub fn new(box_size: Vec3, box_center: Vec3) -> Self {
        Self {
            latest_move_forward: None,
            next_token: 0,
            ground: HashSet::new(),
            is_landing: false,
            landing_position: Vec3::ZERO,
            target_size: box_size,
            target_center: box_center,
            size_speed: 0.0,
            center_speed: 0.0,
            disallow_early_turn: false,
            lock_direction_next_state: false,
            is_ignore_character_time: false,
            updating_spheres: false,
            facing_attacker: false,
            holding_weapon: None,
            running: HashMap::new(),
        }
    }

    /// Hand out the token for a new ability activation
    pub fn issue_token(&mut self) -> AuthorityToken {
        self.next_token += 1;
        AuthorityToken(self.next_token)
    }

    /// Whether `token` is the current movement driver
    pub fn has_authority(&self, token: AuthorityToken) -> bool {
        self.latest_move_forward == Some(token)
    }

    pub fn is_grounded(&self) -> bool {
        !self.ground.is_empty()
    }

    /// Record a bottom contact; true if this lands an airborne character
    pub fn touch_ground(&mut self, contact: ContactId) -> bool {
        let was_airborne = self.ground.is_empty();
        self.ground.insert(contact);
        was_airborne
    }

    /// Drop a bottom contact; true if it was the last one
    pub fn leave_ground(&mut self, contact: ContactId) -> bool {
        self.ground.remove(&contact) && self.ground.is_empty()
    }

    /// Whether at least one activation of `kind` is live
    pub fn is_running(&self, kind: AbilityKind) -> bool {
        self.running.get(&kind).copied().unwrap_or(0) > 0
    }

    pub(crate) fn mark_running(&mut self, kind: AbilityKind) {
        *self.running.entry(kind).or_insert(0) += 1;
    }

    pub(crate) fn unmark_running(&mut self, kind: AbilityKind) {
        if let Some(count) = self.running.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.running.remove(&kind);
            }
        }
    }
}
