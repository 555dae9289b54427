// Core utilities shared by engine and game code

pub mod curve;
pub mod math;

pub use curve::SpeedCurve;
