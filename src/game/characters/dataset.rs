// Per-character dataset store
//
// Abilities share small pieces of state (air momentum, fall clamp, ...)
// through typed slots grouped into datasets. Which datasets a character
// carries is fixed at setup; which slots a dataset has is fixed by its kind.

use glam::Vec3;
use std::collections::HashMap;

/// Closed set of dataset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Air control: pull cancelling, momentum, fall clamp
    AirControl,
    /// General-purpose slots for abilities that keep per-character scratch values
    Scratch,
}

/// Slot type inside a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    Bool,
    Float,
    Vector3,
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SlotType::Bool => "bool",
            SlotType::Float => "float",
            SlotType::Vector3 => "vector3",
        };
        f.write_str(name)
    }
}

/// Number of slots per type a dataset kind declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub bools: usize,
    pub floats: usize,
    pub vectors: usize,
}

impl DatasetKind {
    pub fn layout(self) -> SlotLayout {
        match self {
            DatasetKind::AirControl => SlotLayout {
                bools: AirControlBool::COUNT,
                floats: AirControlFloat::COUNT,
                vectors: AirControlVector3::COUNT,
            },
            DatasetKind::Scratch => SlotLayout {
                bools: 4,
                floats: 4,
                vectors: 4,
            },
        }
    }
}

/// Bool slots of [`DatasetKind::AirControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirControlBool {
    /// Keep upward velocity when jump is released
    CancelPull,
}

impl AirControlBool {
    pub const COUNT: usize = 1;
}

/// Float slots of [`DatasetKind::AirControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirControlFloat {
    /// Signed lateral momentum; positive is +Z
    AirMomentum,
}

impl AirControlFloat {
    pub const COUNT: usize = 1;
}

/// Vector slots of [`DatasetKind::AirControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirControlVector3 {
    /// Terminal velocity; ignored while its y is 0
    MaxFallVelocity,
}

impl AirControlVector3 {
    pub const COUNT: usize = 1;
}

/// Dataset access errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset not initialized for this character: {0:?}")]
    UnknownDataset(DatasetKind),

    #[error("{slot} slot {index} out of range for {kind:?} ({len} slots)")]
    IndexOutOfRange {
        kind: DatasetKind,
        slot: SlotType,
        index: usize,
        len: usize,
    },
}

/// Slot storage for one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    kind: DatasetKind,
    bools: Vec<bool>,
    floats: Vec<f32>,
    vectors: Vec<Vec3>,
}

impl Dataset {
    pub fn new(kind: DatasetKind) -> Self {
        let layout = kind.layout();
        Self {
            kind,
            bools: vec![false; layout.bools],
            floats: vec![0.0; layout.floats],
            vectors: vec![Vec3::ZERO; layout.vectors],
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    fn out_of_range(&self, slot: SlotType, index: usize, len: usize) -> DatasetError {
        DatasetError::IndexOutOfRange {
            kind: self.kind,
            slot,
            index,
            len,
        }
    }

    pub fn get_bool(&self, index: usize) -> Result<bool, DatasetError> {
        self.bools
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(SlotType::Bool, index, self.bools.len()))
    }

    pub fn get_float(&self, index: usize) -> Result<f32, DatasetError> {
        self.floats
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(SlotType::Float, index, self.floats.len()))
    }

    pub fn get_vector3(&self, index: usize) -> Result<Vec3, DatasetError> {
        self.vectors
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(SlotType::Vector3, index, self.vectors.len()))
    }

    pub fn set_bool(&mut self, index: usize, value: bool) -> Result<(), DatasetError> {
        let len = self.bools.len();
        match self.bools.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.out_of_range(SlotType::Bool, index, len)),
        }
    }

    pub fn set_float(&mut self, index: usize, value: f32) -> Result<(), DatasetError> {
        let len = self.floats.len();
        match self.floats.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.out_of_range(SlotType::Float, index, len)),
        }
    }

    pub fn set_vector3(&mut self, index: usize, value: Vec3) -> Result<(), DatasetError> {
        let len = self.vectors.len();
        match self.vectors.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.out_of_range(SlotType::Vector3, index, len)),
        }
    }
}

/// All datasets one character carries
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: HashMap<DatasetKind, Dataset>,
}

impl DatasetStore {
    /// Initialize the store with exactly the given kinds
    pub fn new(kinds: &[DatasetKind]) -> Self {
        let datasets = kinds
            .iter()
            .map(|&kind| (kind, Dataset::new(kind)))
            .collect();
        Self { datasets }
    }

    pub fn contains(&self, kind: DatasetKind) -> bool {
        self.datasets.contains_key(&kind)
    }

    pub fn dataset(&self, kind: DatasetKind) -> Result<&Dataset, DatasetError> {
        self.datasets
            .get(&kind)
            .ok_or(DatasetError::UnknownDataset(kind))
    }

    pub fn dataset_mut(&mut self, kind: DatasetKind) -> Result<&mut Dataset, DatasetError> {
        self.datasets
            .get_mut(&kind)
            .ok_or(DatasetError::UnknownDataset(kind))
    }

    pub fn get_bool(&self, kind: DatasetKind, index: usize) -> Result<bool, DatasetError> {
        self.dataset(kind)?.get_bool(index)
    }

    pub fn get_float(&self, kind: DatasetKind, index: usize) -> Result<f32, DatasetError> {
        self.dataset(kind)?.get_float(index)
    }

    pub fn get_vector3(&self, kind: DatasetKind, index: usize) -> Result<Vec3, DatasetError> {
        self.dataset(kind)?.get_vector3(index)
    }

    pub fn set_bool(
        &mut self,
        kind: DatasetKind,
        index: usize,
        value: bool,
    ) -> Result<(), DatasetError> {
        self.dataset_mut(kind)?.set_bool(index, value)
    }

    pub fn set_float(
        &mut self,
        kind: DatasetKind,
        index: usize,
        value: f32,
    ) -> Result<(), DatasetError> {
        self.dataset_mut(kind)?.set_float(index, value)
    }

    pub fn set_vector3(
        &mut self,
        kind: DatasetKind,
        index: usize,
        value: Vec3,
    ) -> Result<(), DatasetError> {
        self.dataset_mut(kind)?.set_vector3(index, value)
    }

    // Air control shorthands

    pub fn cancel_pull(&self) -> Result<bool, DatasetError> {
        self.get_bool(DatasetKind::AirControl, AirControlBool::CancelPull as usize)
    }

    pub fn set_cancel_pull(&mut self, value: bool) -> Result<(), DatasetError> {
        self.set_bool(
            DatasetKind::AirControl,
            AirControlBool::CancelPull as usize,
            value,
        )
    }

    pub fn air_momentum(&self) -> Result<f32, DatasetError> {
        self.get_float(DatasetKind::AirControl, AirControlFloat::AirMomentum as usize)
    }

    pub fn set_air_momentum(&mut self, value: f32) -> Result<(), DatasetError> {
        self.set_float(
            DatasetKind::AirControl,
            AirControlFloat::AirMomentum as usize,
            value,
        )
    }

    pub fn max_fall_velocity(&self) -> Result<Vec3, DatasetError> {
        self.get_vector3(
            DatasetKind::AirControl,
            AirControlVector3::MaxFallVelocity as usize,
        )
    }

    pub fn set_max_fall_velocity(&mut self, value: Vec3) -> Result<(), DatasetError> {
        self.set_vector3(
            DatasetKind::AirControl,
            AirControlVector3::MaxFallVelocity as usize,
            value,
        )
    }
}
