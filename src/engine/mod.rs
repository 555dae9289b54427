// Engine modules: physics, tick clock, and the collaborator seams the
// character code talks to (animator params, scene state, pathfinding)

pub mod animator;
pub mod game_loop;
pub mod pathfinding;
pub mod physics;
pub mod scene;
