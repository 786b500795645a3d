//! skyhop: a small 2D platformer testbed
//!
//! One player character runs, jumps, air jumps and lands on static platforms
//! inside a fixed-size window. The interesting part is the per-frame physics
//! core:
//!
//! - [`player`]: velocity, gravity, jump state machine and frame selection
//! - [`collision`]: axis-separated resolution against static surfaces
//! - [`level`] / [`surface`]: the static world the player moves through
//!
//! Around it sit thin collaborators: [`input`] turns key events into player
//! commands, [`game`] drives one tick per frame, [`render`] produces a draw
//! list, and (with the `sdl` feature) [`frontend`] puts it all in a window.

pub mod animation;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod player;
pub mod rect;
pub mod render;
pub mod surface;

#[cfg(feature = "sdl")]
pub mod frontend;

pub use config::GameConfig;
pub use error::{AssetError, ConfigError, GameError};
pub use game::GameWorld;
pub use level::Level;
pub use player::Player;
