// Game module - ties the player, level and input together and drives ticks
//
// This module contains:
// - world.rs: GameWorld struct, one tick of game logic and the draw list
// - systems.rs: event source/frame limiter collaborators and the main loop

pub mod systems;
pub mod world;

pub use systems::{run, EventSource, FrameLimiter};
pub use world::{GameWorld, TickReport};
