// Character controller: per-tick physics bookkeeping and the movement
// primitives abilities call

use glam::Vec3;

use super::blocking::BlockingData;
use super::dataset::DatasetStore;
use super::parts::{
    AttachPoint, AttackPartType, AttackParts, BodyPart, DamageDetector, RagdollData,
};
use super::progress::AnimationProgress;
use super::settings::ControlSettings;
use super::spheres::CollisionSpheres;
use super::CharacterError;
use crate::core::math::lerp_vec3;
use crate::engine::pathfinding::PathfindingAgent;
use crate::engine::physics::{BodyHandle, BodySet, ColliderHandle};
use crate::engine::scene::{GameScene, SceneQuery};
use crate::game::abilities::AbilityKind;
use crate::game::characters::dataset::DatasetKind;

/// Upward velocity removed per fixed tick once jump is released
const PULL_DAMPING: f32 = 0.1;

/// Squared distance under which the box counts as resized
const BOX_TOLERANCE: f32 = 0.00001;

/// Which way the character looks along the Z axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Yaw 0°, looking down +Z
    Forward,
    /// Yaw 180°, looking down -Z
    Backward,
}

impl Facing {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Facing::Forward
        } else {
            Facing::Backward
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Forward => 1.0,
            Facing::Backward => -1.0,
        }
    }

    /// Yaw about the vertical axis, in degrees
    pub fn yaw_degrees(self) -> f32 {
        match self {
            Facing::Forward => 0.0,
            Facing::Backward => 180.0,
        }
    }

    /// Local forward axis in world space
    pub fn forward(self) -> Vec3 {
        Vec3::Z * self.sign()
    }

    /// Local right axis in world space
    pub fn right(self) -> Vec3 {
        Vec3::X * self.sign()
    }

    /// Rotate a point from the facing frame into world space
    pub fn to_world(self, local: Vec3) -> Vec3 {
        Vec3::new(local.x * self.sign(), local.y, local.z * self.sign())
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Forward => Facing::Backward,
            Facing::Backward => Facing::Forward,
        }
    }
}

/// Input flags written by the host (player input or AI) every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFlags {
    pub turbo: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub move_right: bool,
    pub move_left: bool,
    pub jump: bool,
    pub attack: bool,
    pub block: bool,
}

impl InputFlags {
    /// Exactly one horizontal direction held
    pub fn horizontal(&self) -> Option<Facing> {
        match (self.move_left, self.move_right) {
            (false, true) => Some(Facing::Forward),
            (true, false) => Some(Facing::Backward),
            _ => None,
        }
    }

    pub fn any_horizontal(&self) -> bool {
        self.move_left || self.move_right
    }
}

/// The character's box collider
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCollider {
    pub size: Vec3,
    pub center: Vec3,
    pub handle: Option<ColliderHandle>,
}

impl BoxCollider {
    pub fn new(size: Vec3, center: Vec3) -> Self {
        Self {
            size,
            center,
            handle: None,
        }
    }

    /// Min and max corners in the facing frame
    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        let half = self.size / 2.0;
        (self.center - half, self.center + half)
    }
}

/// AI-only state
#[derive(Debug, Default)]
pub struct AiProgress {
    pub pathfinding_agent: Option<Box<dyn PathfindingAgent>>,
}

/// Boolean questions abilities and hosts ask about a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterQuery {
    Grounded,
    FacingForward,
    FrontBlocked,
    RightSideBlocked,
    LeftSideBlocked,
    IgnoringCharacterBox,
    FacingAttacker,
    Landing,
}

/// Per-character controller
#[derive(Debug)]
pub struct CharacterControl {
    pub body: BodyHandle,
    pub box_collider: BoxCollider,
    pub spheres: CollisionSpheres,

    pub datasets: DatasetStore,
    pub progress: AnimationProgress,
    pub ai: AiProgress,
    pub blocking: BlockingData,
    pub damage: DamageDetector,
    pub ragdoll: RagdollData,
    pub attack_parts: AttackParts,
    pub child_objects: Vec<AttachPoint>,

    pub input: InputFlags,
    facing: Facing,
    pub skeleton_enabled: bool,
}

impl CharacterControl {
    /// Build a controller around an existing body
    pub fn new(body: BodyHandle, settings: &ControlSettings) -> Result<Self, CharacterError> {
        if !settings.datasets.contains(&DatasetKind::AirControl) {
            return Err(CharacterError::MissingDataset(DatasetKind::AirControl));
        }
        if settings.box_size.y <= 0.0 || settings.box_size.z <= 0.0 {
            return Err(CharacterError::InvalidBox(settings.box_size));
        }
        if settings.sphere_radius <= 0.0 {
            return Err(CharacterError::InvalidSphereRadius(settings.sphere_radius));
        }

        let box_collider = BoxCollider::new(settings.box_size, settings.box_center);
        let spheres = CollisionSpheres::new(settings.sphere_radius, &box_collider);

        Ok(Self {
            body,
            spheres,
            datasets: DatasetStore::new(&settings.datasets),
            progress: AnimationProgress::new(settings.box_size, settings.box_center),
            ai: AiProgress::default(),
            blocking: BlockingData::new(),
            damage: DamageDetector::default(),
            ragdoll: RagdollData::default(),
            attack_parts: settings.attack_parts.clone(),
            child_objects: Vec::new(),
            input: InputFlags::default(),
            facing: settings.facing,
            skeleton_enabled: settings.skeleton_enabled,
            box_collider,
        })
    }

    /// Variable-rate bookkeeping that doesn't need fixed-step guarantees
    pub fn tick_variable_rate(&mut self, bodies: &mut dyn BodySet) {
        self.progress.facing_attacker = self.compute_facing_attacker(bodies);

        if self.spheres.needs_sync(self.facing) {
            self.spheres.sync_sensors(bodies, self.facing);
            self.sync_box(bodies);
        }
    }

    /// Fixed-rate pass: pull damping, box resize, sphere reposition, fall clamp
    pub fn tick_fixed_rate(
        &mut self,
        bodies: &mut dyn BodySet,
        dt: f32,
    ) -> Result<(), CharacterError> {
        if !self.datasets.cancel_pull()? {
            if let Some(velocity) = bodies.velocity(self.body) {
                if velocity.y > 0.0 && !self.input.jump {
                    bodies.set_velocity(self.body, velocity - Vec3::Y * velocity.y * PULL_DAMPING);
                }
            }
        }

        self.progress.updating_spheres = false;
        self.update_box_collider_size(dt);
        self.update_box_collider_center(dt);

        if self.progress.updating_spheres {
            self.spheres.reposition_front(&self.box_collider);
            self.spheres.reposition_bottom(&self.box_collider);
            self.spheres.reposition_back(&self.box_collider);
            self.spheres.reposition_up(&self.box_collider);
        }

        // A turn since the last pass moves front and back sensors too
        if self.progress.updating_spheres || self.spheres.needs_sync(self.facing) {
            self.spheres.sync_sensors(bodies, self.facing);
            self.sync_box(bodies);
        }

        if self.progress.updating_spheres && self.progress.is_landing {
            if let Some(position) = bodies.position(self.body) {
                log::trace!("Snapping to landing height {}", self.progress.landing_position.y);
                bodies.move_position(
                    self.body,
                    Vec3::new(0.0, self.progress.landing_position.y, position.z),
                );
            }
        }

        // Terminal velocity / wall slide
        let max_fall_velocity = self.datasets.max_fall_velocity()?;
        if max_fall_velocity.y != 0.0 {
            if let Some(velocity) = bodies.velocity(self.body) {
                if velocity.y <= max_fall_velocity.y {
                    bodies.set_velocity(self.body, max_fall_velocity);
                }
            }
        }

        Ok(())
    }

    fn update_box_collider_size(&mut self, dt: f32) {
        if !self.progress.is_running(AbilityKind::UpdateBoxCollider) {
            return;
        }

        if (self.box_collider.size - self.progress.target_size).length_squared() > BOX_TOLERANCE {
            self.box_collider.size = lerp_vec3(
                self.box_collider.size,
                self.progress.target_size,
                dt * self.progress.size_speed,
            );
            self.progress.updating_spheres = true;
        }
    }

    fn update_box_collider_center(&mut self, dt: f32) {
        if !self.progress.is_running(AbilityKind::UpdateBoxCollider) {
            return;
        }

        if (self.box_collider.center - self.progress.target_center).length_squared()
            > BOX_TOLERANCE
        {
            self.box_collider.center = lerp_vec3(
                self.box_collider.center,
                self.progress.target_center,
                dt * self.progress.center_speed,
            );
            self.progress.updating_spheres = true;
        }
    }

    fn sync_box(&self, bodies: &mut dyn BodySet) {
        if let Some(handle) = self.box_collider.handle {
            bodies.resize_box(
                handle,
                self.box_collider.size,
                self.facing.to_world(self.box_collider.center),
            );
        }
    }

    /// Translate along the facing axis by `speed * curve_value * dt`
    pub fn move_forward(&self, bodies: &mut dyn BodySet, speed: f32, curve_value: f32, dt: f32) {
        let Some(position) = bodies.position(self.body) else {
            return;
        };
        let offset = self.facing.forward() * speed * curve_value * dt;
        bodies.set_position(self.body, position + offset);
    }

    /// Turn to face +Z (`true`) or -Z (`false`).
    ///
    /// Ignored on the character select screen and while the skeleton is off,
    /// so display-only characters never change facing.
    pub fn face_forward(&mut self, scene: &dyn SceneQuery, forward: bool) {
        if scene.is_active_scene(GameScene::CharacterSelect) {
            return;
        }
        if !self.skeleton_enabled {
            return;
        }
        self.set_facing(Facing::from_forward(forward));
    }

    /// Turn without the scene/skeleton guard
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_facing_forward(&self) -> bool {
        self.facing.forward().z > 0.0
    }

    pub fn position(&self, bodies: &dyn BodySet) -> Option<Vec3> {
        bodies.position(self.body)
    }

    /// Ragdoll part whose name contains `name`
    pub fn body_part(&self, name: &str) -> Option<&BodyPart> {
        self.ragdoll.find(name)
    }

    /// Attach point used by an attack
    pub fn attacking_part(&self, part: AttackPartType) -> Option<&AttachPoint> {
        match part {
            AttackPartType::LeftHand => self.attack_parts.left_hand.as_ref(),
            AttackPartType::RightHand => self.attack_parts.right_hand.as_ref(),
            AttackPartType::LeftFoot => self.attack_parts.left_foot.as_ref(),
            AttackPartType::RightFoot => self.attack_parts.right_foot.as_ref(),
            AttackPartType::MeleeWeapon => self
                .progress
                .holding_weapon
                .as_ref()
                .map(|weapon| &weapon.trigger),
        }
    }

    /// Child attach point by exact name
    pub fn child_object(&self, name: &str) -> Option<&AttachPoint> {
        self.child_objects.iter().find(|child| child.name == name)
    }

    /// Push the struck ragdoll part along the attacker's axes
    pub fn add_force_to_damaged_part(&self, bodies: &mut dyn BodySet, zero_velocity: bool) {
        let Some(record) = self.damage.damaged() else {
            return;
        };

        // Zero first, or the impulse is partly cancelled
        if zero_velocity {
            for part in &self.ragdoll.body_parts {
                bodies.set_velocity(part.body, Vec3::ZERO);
            }
        }

        let force = record.attack.force(record.attacker_facing);
        bodies.add_force(record.damaged_part, force);
    }

    fn compute_facing_attacker(&self, bodies: &dyn BodySet) -> bool {
        let Some(record) = self.damage.damaged() else {
            return false;
        };
        let Some(position) = bodies.position(self.body) else {
            return false;
        };

        let to_attacker = record.attacker_position.z - position.z;
        if to_attacker == 0.0 {
            return false;
        }
        (to_attacker > 0.0) == self.is_facing_forward()
    }

    pub fn is_facing_attacker(&self) -> bool {
        self.progress.facing_attacker
    }

    pub fn query(&self, query: CharacterQuery) -> bool {
        match query {
            CharacterQuery::Grounded => self.progress.is_grounded(),
            CharacterQuery::FacingForward => self.is_facing_forward(),
            CharacterQuery::FrontBlocked => self.blocking.front_blocked_count() != 0,
            CharacterQuery::RightSideBlocked => self.blocking.right_side_blocked(),
            CharacterQuery::LeftSideBlocked => self.blocking.left_side_blocked(),
            CharacterQuery::IgnoringCharacterBox => self.progress.is_ignore_character_time,
            CharacterQuery::FacingAttacker => self.progress.facing_attacker,
            CharacterQuery::Landing => self.progress.is_landing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{presets, PhysicsWorld};
    use crate::engine::scene::ActiveScene;
    use crate::game::characters::blocking::{BlockingSide, ContactId};
    use crate::game::characters::parts::{AttackInfo, DamageRecord, MeleeWeapon};
    use crate::game::characters::spheres::SphereGroup;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (PhysicsWorld, CharacterControl) {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
        let control = CharacterControl::new(body, &ControlSettings::default()).unwrap();
        (world, control)
    }

    fn gameplay() -> ActiveScene {
        ActiveScene(GameScene::Sample)
    }

    #[test]
    fn test_missing_air_control_is_rejected() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_rigid_body(presets::character_body(Vec3::ZERO));
        let settings = ControlSettings::default().with_datasets(&[DatasetKind::Scratch]);

        let err = CharacterControl::new(body, &settings).unwrap_err();
        assert!(matches!(
            err,
            CharacterError::MissingDataset(DatasetKind::AirControl)
        ));
    }

    #[test]
    fn test_face_forward_round_trip() {
        let (_, mut control) = setup();
        let scene = gameplay();

        control.face_forward(&scene, true);
        assert!(control.is_facing_forward());
        control.face_forward(&scene, false);
        assert!(!control.is_facing_forward());
        assert_eq!(control.facing().yaw_degrees(), 180.0);
    }

    #[test]
    fn test_face_forward_ignored_on_character_select() {
        let (_, mut control) = setup();
        control.face_forward(&ActiveScene(GameScene::CharacterSelect), false);
        assert!(control.is_facing_forward());
    }

    #[test]
    fn test_face_forward_ignored_without_skeleton() {
        let (_, mut control) = setup();
        control.skeleton_enabled = false;
        control.face_forward(&gameplay(), false);
        assert!(control.is_facing_forward());

        // The unguarded turn still works
        control.set_facing(Facing::Backward);
        assert!(!control.is_facing_forward());
    }

    #[test]
    fn test_move_forward_follows_facing() {
        let (mut world, mut control) = setup();
        control.move_forward(&mut world, 2.0, 0.5, 1.0);
        assert_relative_eq!(world.position(control.body).unwrap().z, 1.0);

        control.set_facing(Facing::Backward);
        control.move_forward(&mut world, 2.0, 1.0, 0.5);
        assert_relative_eq!(world.position(control.body).unwrap().z, 0.0);
    }

    #[test]
    fn test_pull_damping_without_jump() {
        let (mut world, mut control) = setup();
        world.set_velocity(control.body, Vec3::new(0.0, 10.0, 1.0));

        control.tick_fixed_rate(&mut world, DT).unwrap();
        let velocity = world.velocity(control.body).unwrap();
        assert_relative_eq!(velocity.y, 9.0);
        assert_relative_eq!(velocity.z, 1.0);
    }

    #[test]
    fn test_no_pull_damping_while_jump_held_or_cancelled() {
        let (mut world, mut control) = setup();
        world.set_velocity(control.body, Vec3::new(0.0, 10.0, 0.0));

        control.input.jump = true;
        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert_relative_eq!(world.velocity(control.body).unwrap().y, 10.0);

        control.input.jump = false;
        control.datasets.set_cancel_pull(true).unwrap();
        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert_relative_eq!(world.velocity(control.body).unwrap().y, 10.0);
    }

    #[test]
    fn test_fall_velocity_clamped_to_exact_vector() {
        let (mut world, mut control) = setup();
        let max = Vec3::new(0.0, -10.0, 0.5);
        control.datasets.set_max_fall_velocity(max).unwrap();
        world.set_velocity(control.body, Vec3::new(0.0, -20.0, 3.0));

        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert_eq!(world.velocity(control.body), Some(max));
    }

    #[test]
    fn test_fall_clamp_inactive_when_zero_or_slower() {
        let (mut world, mut control) = setup();
        world.set_velocity(control.body, Vec3::new(0.0, -20.0, 0.0));
        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert_eq!(world.velocity(control.body), Some(Vec3::new(0.0, -20.0, 0.0)));

        control
            .datasets
            .set_max_fall_velocity(Vec3::new(0.0, -10.0, 0.0))
            .unwrap();
        world.set_velocity(control.body, Vec3::new(0.0, -5.0, 0.0));
        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert_eq!(world.velocity(control.body), Some(Vec3::new(0.0, -5.0, 0.0)));
    }

    #[test]
    fn test_box_converges_monotonically_then_stays_put() {
        let (mut world, mut control) = setup();
        control.progress.mark_running(AbilityKind::UpdateBoxCollider);
        control.progress.target_size = Vec3::new(0.5, 1.0, 0.6);
        control.progress.target_center = Vec3::new(0.0, 0.5, 0.0);
        control.progress.size_speed = 5.0;
        control.progress.center_speed = 5.0;

        let mut last = (control.box_collider.size - control.progress.target_size).length_squared();
        let mut converged_at = None;
        for tick in 0..600 {
            control.tick_fixed_rate(&mut world, DT).unwrap();
            let distance =
                (control.box_collider.size - control.progress.target_size).length_squared();
            assert!(distance <= last);
            last = distance;

            if !control.progress.updating_spheres {
                converged_at = Some(tick);
                break;
            }
        }

        assert!(converged_at.is_some());
        assert!(last <= BOX_TOLERANCE);

        let size = control.box_collider.size;
        let center = control.box_collider.center;
        for _ in 0..10 {
            control.tick_fixed_rate(&mut world, DT).unwrap();
            assert!(!control.progress.updating_spheres);
            assert_eq!(control.box_collider.size, size);
            assert_eq!(control.box_collider.center, center);
        }
    }

    #[test]
    fn test_box_not_resized_without_update_ability() {
        let (mut world, mut control) = setup();
        control.progress.target_size = Vec3::ONE * 3.0;
        control.progress.size_speed = 5.0;

        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert!(!control.progress.updating_spheres);
        assert_eq!(control.box_collider.size, ControlSettings::default().box_size);
    }

    #[test]
    fn test_landing_snaps_height_only() {
        let (mut world, mut control) = setup();
        world.set_position(control.body, Vec3::new(0.0, 3.0, 4.0));
        control.progress.mark_running(AbilityKind::UpdateBoxCollider);
        control.progress.target_size = Vec3::new(0.5, 1.0, 0.6);
        control.progress.size_speed = 1.0;
        control.progress.is_landing = true;
        control.progress.landing_position = Vec3::new(0.0, 1.25, 99.0);

        control.tick_fixed_rate(&mut world, DT).unwrap();
        assert_eq!(world.position(control.body), Some(Vec3::new(0.0, 1.25, 4.0)));
    }

    #[test]
    fn test_fixed_pass_resyncs_sensors_after_turn() {
        let (mut world, mut control) = setup();
        let body = control.body;
        let facing = control.facing();
        control.spheres.attach_sensors(&mut world, body, facing);
        let front = control.spheres.group(SphereGroup::Front)[0].sensor.unwrap();
        let front_x = |world: &PhysicsWorld| {
            world
                .get_collider(front)
                .unwrap()
                .position_wrt_parent()
                .unwrap()
                .translation
                .x
        };
        assert!(front_x(&world) > 0.0);

        control.set_facing(Facing::Backward);
        control.tick_fixed_rate(&mut world, DT).unwrap();

        assert!(front_x(&world) < 0.0);
        assert!(!control.spheres.needs_sync(Facing::Backward));
    }

    #[test]
    fn test_body_part_lookup_miss_is_none() {
        let (_, control) = setup();
        assert!(control.body_part("Head").is_none());
        assert!(control.child_object("Weapon").is_none());
    }

    #[test]
    fn test_attacking_part() {
        let (_, mut control) = setup();
        assert_eq!(
            control
                .attacking_part(AttackPartType::RightFoot)
                .map(|p| p.name.as_str()),
            Some("RightFoot_Attack")
        );
        assert!(control.attacking_part(AttackPartType::MeleeWeapon).is_none());

        control.progress.holding_weapon = Some(MeleeWeapon {
            name: "Axe".to_string(),
            trigger: AttachPoint::new("Axe_Trigger", Vec3::ZERO),
        });
        assert_eq!(
            control
                .attacking_part(AttackPartType::MeleeWeapon)
                .map(|p| p.name.as_str()),
            Some("Axe_Trigger")
        );
    }

    fn ragdoll_setup(world: &mut PhysicsWorld, control: &mut CharacterControl) -> BodyHandle {
        let mut parts = Vec::new();
        for name in ["Hips", "Head"] {
            let body = world.add_rigid_body(presets::ragdoll_part_body(Vec3::ZERO));
            world.add_collider(presets::ragdoll_part_collider(0.1), body);
            parts.push(BodyPart {
                name: name.to_string(),
                body,
            });
        }
        let head = parts[1].body;
        control.ragdoll.body_parts = parts;
        head
    }

    #[test]
    fn test_add_force_zeroes_parts_first() {
        let (mut world, mut control) = setup();
        let head = ragdoll_setup(&mut world, &mut control);
        let hips = control.body_part("Hips").unwrap().body;
        world.step();

        world.set_velocity(hips, Vec3::new(0.0, 0.0, 5.0));
        world.set_velocity(head, Vec3::new(0.0, 0.0, -50.0));
        control.damage.register_hit(DamageRecord {
            attacker: 1,
            attacker_position: Vec3::new(0.0, 0.0, -1.0),
            attacker_facing: Facing::Forward,
            attack: AttackInfo {
                forward_force: 100.0,
                right_force: 0.0,
                up_force: 50.0,
            },
            damaged_part: head,
        });

        control.add_force_to_damaged_part(&mut world, true);
        assert_eq!(world.velocity(hips), Some(Vec3::ZERO));
        let head_velocity = world.velocity(head).unwrap();
        assert!(head_velocity.z > 0.0);
        assert!(head_velocity.y > 0.0);
    }

    #[test]
    fn test_add_force_without_damage_is_noop() {
        let (mut world, mut control) = setup();
        let head = ragdoll_setup(&mut world, &mut control);
        world.set_velocity(head, Vec3::new(0.0, 1.0, 0.0));

        control.add_force_to_damaged_part(&mut world, true);
        assert_eq!(world.velocity(head), Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_facing_attacker_derived_each_frame() {
        let (mut world, mut control) = setup();
        control.damage.register_hit(DamageRecord {
            attacker: 1,
            attacker_position: Vec3::new(0.0, 0.0, 2.0),
            attacker_facing: Facing::Backward,
            attack: AttackInfo::default(),
            damaged_part: control.body,
        });

        control.tick_variable_rate(&mut world);
        assert!(control.is_facing_attacker());

        control.set_facing(Facing::Backward);
        control.tick_variable_rate(&mut world);
        assert!(!control.query(CharacterQuery::FacingAttacker));
    }

    #[test]
    fn test_query_reads_blocking_and_ground() {
        let (_, mut control) = setup();
        assert!(!control.query(CharacterQuery::Grounded));
        assert!(!control.query(CharacterQuery::FrontBlocked));

        control.progress.touch_ground(ContactId(1));
        control.blocking.enter(BlockingSide::Front, ContactId(2));
        control.blocking.enter(BlockingSide::Left, ContactId(2));

        assert!(control.query(CharacterQuery::Grounded));
        assert!(control.query(CharacterQuery::FrontBlocked));
        assert!(control.query(CharacterQuery::LeftSideBlocked));
        assert!(!control.query(CharacterQuery::RightSideBlocked));
        assert!(control.query(CharacterQuery::FacingForward));
    }

    #[test]
    fn test_input_horizontal() {
        let mut input = InputFlags::default();
        assert_eq!(input.horizontal(), None);
        input.move_left = true;
        assert_eq!(input.horizontal(), Some(Facing::Backward));
        input.move_right = true;
        assert_eq!(input.horizontal(), None);
        assert!(input.any_horizontal());
    }
}
