// Character system
//
// This module contains everything related to playable and AI characters:
// - Character data and the registry that owns live characters
// - The controller and the per-character data it drives
// - Contact routing from physics sensors to blocking/ground state
// - The animator graph and ability dispatch

pub mod animation;
pub mod blocking;
pub mod character;
pub mod contact;
pub mod control;
pub mod dataset;
pub mod parts;
pub mod progress;
pub mod settings;
pub mod spheres;
pub mod state;

use glam::Vec3;
use thiserror::Error;

use crate::engine::physics::BodyHandle;
use dataset::{DatasetError, DatasetKind};

// Re-export commonly used types
pub use animation::{
    AnimatorGraph, AnimatorGraphBuilder, Condition, GraphError, GraphLayout, Transition,
};
pub use blocking::{BlockingData, BlockingSide, ContactId};
pub use character::{
    Character, CharacterId, CharacterRegistry, CharacterSetup, HUMANOID_RAGDOLL,
};
pub use control::{CharacterControl, CharacterQuery, Facing, InputFlags};
pub use dataset::DatasetStore;
pub use progress::{AnimationProgress, AuthorityToken};
pub use settings::ControlSettings;
pub use state::{StateContext, TickContext};

/// Errors raised while setting up or ticking a character
#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("Character setup is missing the {0:?} dataset")]
    MissingDataset(DatasetKind),

    #[error("Body {0:?} does not exist in the physics world")]
    MissingBody(BodyHandle),

    #[error("Box collider size must be positive, got {0}")]
    InvalidBox(Vec3),

    #[error("Collision sphere radius must be positive, got {0}")]
    InvalidSphereRadius(f32),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
