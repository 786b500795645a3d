//! SDL2 frontend
//!
//! Everything that touches SDL lives here: translating SDL events into
//! [`InputEvent`](crate::input::InputEvent)s and painting draw lists onto a
//! window canvas. The core modules never import SDL types.

pub mod canvas;
pub mod events;

pub use canvas::CanvasSink;
pub use events::{map_keycode, SdlInput};
