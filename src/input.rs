/// Keyboard input handling
///
/// Raw frontend events are reduced to a handful of [`InputEvent`]s, and
/// [`InputState`] turns each one into exactly one player command. The
/// frontend only translates key codes; all game-facing rules live here so
/// they can be tested without a window.
///
/// # Event mapping
///
/// | Event           | Command                                             |
/// |-----------------|-----------------------------------------------------|
/// | KeyDown(Left)   | `go_left()`                                         |
/// | KeyDown(Right)  | `go_right()`                                        |
/// | KeyDown(Up)     | `air_jump()` if airborne, else `jump()`             |
/// | KeyUp(Left)     | `stop()` if still moving left                       |
/// | KeyUp(Right)    | `stop()` if still moving right                      |
/// | KeyUp(Up)       | `stop_rising()` if released within the short-hop window |
/// | Quit            | none, signals the loop to exit                      |
///
/// The sign check on key-up stops a stale release (left let go after right
/// was pressed) from zeroing the newer movement.
use crate::config::InputConfig;
use crate::level::Level;
use crate::player::Player;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
}

/// Discrete input event, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Quit,
}

/// Whether the game loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Quit,
}

/// Directional keys currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// Net horizontal direction the player is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalIntent {
    Left,
    Right,
    Neutral,
}

impl HorizontalIntent {
    /// Both or neither direction held resolves to neutral.
    pub fn resolve(held: &HeldKeys) -> Self {
        match (held.left, held.right) {
            (true, false) => HorizontalIntent::Left,
            (false, true) => HorizontalIntent::Right,
            _ => HorizontalIntent::Neutral,
        }
    }
}

/// Input state carried across ticks.
#[derive(Debug, Clone)]
pub struct InputState {
    config: InputConfig,
    held: HeldKeys,
    /// Frames since jump was pressed; 0 when not counting
    jump_frames: u32,
}

impl InputState {
    pub fn new(config: InputConfig) -> Self {
        InputState {
            config,
            held: HeldKeys::default(),
            jump_frames: 0,
        }
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    pub fn jump_frames(&self) -> u32 {
        self.jump_frames
    }

    pub fn intent(&self) -> HorizontalIntent {
        HorizontalIntent::resolve(&self.held)
    }

    /// Applies one event to the player.
    pub fn apply<F: Clone>(
        &mut self,
        event: InputEvent,
        player: &mut Player<F>,
        level: &Level,
    ) -> Signal {
        match event {
            InputEvent::Quit => return Signal::Quit,
            InputEvent::KeyDown(Key::Left) => {
                self.held.left = true;
                self.on_direction_pressed(Key::Left, player);
            }
            InputEvent::KeyDown(Key::Right) => {
                self.held.right = true;
                self.on_direction_pressed(Key::Right, player);
            }
            InputEvent::KeyDown(Key::Up) => {
                self.jump_frames += 1;
                if player.is_airborne() {
                    player.air_jump();
                } else {
                    player.jump(level);
                }
            }
            InputEvent::KeyUp(Key::Left) => {
                self.held.left = false;
                self.on_direction_released(Key::Left, player);
            }
            InputEvent::KeyUp(Key::Right) => {
                self.held.right = false;
                self.on_direction_released(Key::Right, player);
            }
            InputEvent::KeyUp(Key::Up) => {
                if self.jump_frames <= self.config.short_hop_window {
                    player.stop_rising();
                    tracing::debug!(frames = self.jump_frames, "short hop");
                }
                self.jump_frames = 0;
            }
        }
        Signal::Continue
    }

    /// Advances the short-hop counter. Call once per tick after the update.
    pub fn end_frame(&mut self) {
        if self.jump_frames > 0 {
            self.jump_frames = self.jump_frames.saturating_add(1);
        }
    }

    fn on_direction_pressed<F: Clone>(&self, key: Key, player: &mut Player<F>) {
        if self.config.resolve_opposing_keys {
            self.steer(player);
            return;
        }

        // Last key pressed wins
        match key {
            Key::Left => player.go_left(),
            Key::Right => player.go_right(),
            Key::Up => {}
        }
    }

    fn on_direction_released<F: Clone>(&self, key: Key, player: &mut Player<F>) {
        let (delta_x, _) = player.velocity();
        let still_moving_that_way = match key {
            Key::Left => delta_x < 0.0,
            Key::Right => delta_x > 0.0,
            Key::Up => false,
        };

        if self.config.resolve_opposing_keys && self.intent() != HorizontalIntent::Neutral {
            // The other direction is still held: resume it
            self.steer(player);
        } else if still_moving_that_way {
            player.stop();
        }
    }

    fn steer<F: Clone>(&self, player: &mut Player<F>) {
        match self.intent() {
            HorizontalIntent::Left => player.go_left(),
            HorizontalIntent::Right => player.go_right(),
            HorizontalIntent::Neutral => player.stop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::tests::grounded_player;

    fn default_input() -> InputState {
        InputState::new(InputConfig::default())
    }

    fn opposing_input() -> InputState {
        InputState::new(InputConfig {
            resolve_opposing_keys: true,
            ..InputConfig::default()
        })
    }

    #[test]
    fn test_intent_resolution() {
        let mut held = HeldKeys::default();
        assert_eq!(HorizontalIntent::resolve(&held), HorizontalIntent::Neutral);

        held.left = true;
        assert_eq!(HorizontalIntent::resolve(&held), HorizontalIntent::Left);

        held.right = true;
        assert_eq!(HorizontalIntent::resolve(&held), HorizontalIntent::Neutral);

        held.left = false;
        assert_eq!(HorizontalIntent::resolve(&held), HorizontalIntent::Right);
    }

    #[test]
    fn test_quit_signal() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        assert_eq!(input.apply(InputEvent::Quit, &mut player, &level), Signal::Quit);
        assert_eq!(
            input.apply(InputEvent::KeyDown(Key::Left), &mut player, &level),
            Signal::Continue
        );
    }

    #[test]
    fn test_key_down_moves_and_tracks_held() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        input.apply(InputEvent::KeyDown(Key::Left), &mut player, &level);

        assert_eq!(player.velocity().0, -6.0);
        assert!(input.held().left);
        assert_eq!(input.intent(), HorizontalIntent::Left);
    }

    #[test]
    fn test_stale_key_up_does_not_stop_newer_direction() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        input.apply(InputEvent::KeyDown(Key::Left), &mut player, &level);
        input.apply(InputEvent::KeyDown(Key::Right), &mut player, &level);
        input.apply(InputEvent::KeyUp(Key::Left), &mut player, &level);

        assert_eq!(player.velocity().0, 6.0);

        input.apply(InputEvent::KeyUp(Key::Right), &mut player, &level);
        assert_eq!(player.velocity().0, 0.0);
    }

    #[test]
    fn test_default_mode_last_key_wins() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        input.apply(InputEvent::KeyDown(Key::Right), &mut player, &level);
        input.apply(InputEvent::KeyDown(Key::Left), &mut player, &level);

        assert_eq!(player.velocity().0, -6.0);
    }

    #[test]
    fn test_opposing_keys_cancel_and_resume() {
        let (mut player, level) = grounded_player();
        let mut input = opposing_input();

        input.apply(InputEvent::KeyDown(Key::Right), &mut player, &level);
        assert_eq!(player.velocity().0, 6.0);

        input.apply(InputEvent::KeyDown(Key::Left), &mut player, &level);
        assert_eq!(player.velocity().0, 0.0);

        input.apply(InputEvent::KeyUp(Key::Right), &mut player, &level);
        assert_eq!(player.velocity().0, -6.0);

        input.apply(InputEvent::KeyUp(Key::Left), &mut player, &level);
        assert_eq!(player.velocity().0, 0.0);
    }

    #[test]
    fn test_up_jumps_on_ground_then_air_jumps() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        input.apply(InputEvent::KeyDown(Key::Up), &mut player, &level);
        assert!(player.is_airborne());
        assert!(!player.has_air_jumped());

        input.apply(InputEvent::KeyDown(Key::Up), &mut player, &level);
        assert!(player.has_air_jumped());
    }

    #[test]
    fn test_quick_release_is_short_hop() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        input.apply(InputEvent::KeyDown(Key::Up), &mut player, &level);
        for _ in 0..3 {
            player.update(&level);
            input.end_frame();
        }
        let before = player.velocity().1;
        input.apply(InputEvent::KeyUp(Key::Up), &mut player, &level);

        assert_eq!(player.velocity().1, before + 5.0);
        assert_eq!(input.jump_frames(), 0);
    }

    #[test]
    fn test_long_hold_is_full_jump() {
        let (mut player, level) = grounded_player();
        let mut input = default_input();

        input.apply(InputEvent::KeyDown(Key::Up), &mut player, &level);
        for _ in 0..10 {
            player.update(&level);
            input.end_frame();
        }
        assert_eq!(input.jump_frames(), 11);
        let before = player.velocity().1;
        input.apply(InputEvent::KeyUp(Key::Up), &mut player, &level);

        assert_eq!(player.velocity().1, before);
        assert_eq!(input.jump_frames(), 0);
    }

    #[test]
    fn test_counter_idle_until_jump_pressed() {
        let mut input = default_input();

        input.end_frame();
        input.end_frame();

        assert_eq!(input.jump_frames(), 0);
    }
}
