// Animation-driven locomotion for 2.5D platformer characters

pub mod core;
pub mod engine;
pub mod game;
