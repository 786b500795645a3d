use crate::error::GameError;
use crate::game::EventSource;
use crate::input::{InputEvent, Key};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

/// Maps an SDL key to a game key. Unhandled keys map to `None`.
pub fn map_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        Keycode::Up => Some(Key::Up),
        _ => None,
    }
}

/// Polls SDL and produces game input events.
///
/// Auto-repeat key presses are dropped: holding a key is one key-down and one
/// key-up, which is what the short-hop timing and the air jump expect.
pub struct SdlInput {
    event_pump: EventPump,
}

impl SdlInput {
    pub fn new(event_pump: EventPump) -> Self {
        SdlInput { event_pump }
    }

    fn translate(event: Event) -> Option<InputEvent> {
        match event {
            Event::Quit { .. } => Some(InputEvent::Quit),
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => map_keycode(keycode).map(InputEvent::KeyDown),
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => map_keycode(keycode).map(InputEvent::KeyUp),
            _ => None,
        }
    }
}

impl EventSource for SdlInput {
    type Error = GameError;

    fn poll(&mut self) -> Result<Vec<InputEvent>, GameError> {
        Ok(self.event_pump.poll_iter().filter_map(Self::translate).collect())
    }
}
