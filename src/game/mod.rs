// Game logic: characters, their abilities and the graphs wiring them

pub mod abilities;
pub mod characters;
pub mod graphs;
