use crate::animation::{
    override_frame, running_frame_index, AnimationFrame, AnimationFrames, AnimationTuning, Facing,
    FrameProvider, FrameSet,
};
use crate::collision::{self, Body, Contact};
use crate::config::{GameConfig, PhysicsConfig};
use crate::error::AssetError;
use crate::level::Level;
use crate::rect::Rect;

/// Result of one [`Player::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateReport {
    pub horizontal: Contact,
    pub vertical: Contact,
}

/// The player character.
///
/// Commands (`go_left`, `jump`, ...) are called in response to input events
/// and only change velocity and state. Position changes only in
/// [`Player::update`], once per tick.
///
/// # State
///
/// - `airborne` is set by a ground jump and cleared by `land()`. Walking off
///   a ledge does not set it.
/// - `air_jumped` can only become true while airborne and is cleared by
///   `land()`, so there is at most one air jump per airborne period.
/// - `movement_speed` is the run speed on the ground and the slower air steer
///   speed after a ground jump.
pub struct Player<F> {
    rect: Rect,
    delta_x: f32,
    delta_y: f32,
    physics: PhysicsConfig,
    tuning: AnimationTuning,
    screen_width: f32,
    screen_height: f32,
    movement_speed: f32,
    direction: Facing,
    airborne: bool,
    air_jumped: bool,
    frames: AnimationFrames<F>,
    current_frame: AnimationFrame,
}

impl<F: Clone> Player<F> {
    /// Spawns a player at the configured spawn point.
    ///
    /// A fresh player starts airborne, facing right, and falls until it lands
    /// on something.
    pub fn new(config: &GameConfig, frames: AnimationFrames<F>) -> Self {
        let spawn = &config.player;
        Player {
            rect: Rect::new(spawn.spawn_x, spawn.spawn_y, spawn.width, spawn.height),
            delta_x: 0.0,
            delta_y: 0.0,
            physics: config.physics.clone(),
            tuning: config.animation.clone(),
            screen_width: config.screen.width as f32,
            screen_height: config.screen.height as f32,
            movement_speed: config.physics.run_speed,
            direction: Facing::Right,
            airborne: true,
            air_jumped: false,
            frames,
            current_frame: AnimationFrame::new(FrameSet::Idle, Facing::Right, 0),
        }
    }

    /// Fetches the animation frames from `provider`, then spawns the player.
    pub fn from_provider<P>(config: &GameConfig, provider: &P) -> Result<Self, AssetError>
    where
        P: FrameProvider<Frame = F>,
    {
        let frames = AnimationFrames::load(provider)?;
        Ok(Self::new(config, frames))
    }

    /// Moves the player to `(x, y)` without touching velocity or state.
    pub fn place_at(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    // -------- Commands --------

    pub fn go_left(&mut self) {
        self.delta_x = -self.movement_speed;
        if !self.airborne {
            self.direction = Facing::Left;
        }
    }

    pub fn go_right(&mut self) {
        self.delta_x = self.movement_speed;
        if !self.airborne {
            self.direction = Facing::Right;
        }
    }

    pub fn stop(&mut self) {
        self.delta_x = 0.0;
    }

    /// Ground jump. Does nothing unless something is right under the player
    /// (or the player is at the bottom of the screen).
    pub fn jump(&mut self, level: &Level) {
        let grounded = collision::is_grounded_at(
            &self.rect,
            level.surfaces(),
            self.physics.jump_probe_depth,
            self.screen_height,
        );

        if grounded {
            self.delta_y = self.physics.jump_force;
            self.airborne = true;
            self.movement_speed = self.physics.air_steer_speed;
            tracing::debug!(x = self.rect.x, y = self.rect.y, "jump");
        }
    }

    /// Mid-air jump, allowed once per airborne period.
    pub fn air_jump(&mut self) {
        if self.airborne && !self.air_jumped {
            self.air_jumped = true;
            self.delta_y = self.physics.air_jump_force;
            tracing::debug!(x = self.rect.x, y = self.rect.y, "air jump");
        }
    }

    /// Cancels half of the ground jump impulse. Used for short hops (jump
    /// released early) and when the player's head hits a surface.
    pub fn stop_rising(&mut self) {
        self.delta_y += -0.5 * self.physics.jump_force;
    }

    /// Ends vertical movement and resets the jump state.
    ///
    /// Horizontal intent survives the landing: the direction of `delta_x` is
    /// kept but its magnitude snaps back to the run speed.
    pub fn land(&mut self) {
        if self.airborne {
            tracing::debug!(x = self.rect.x, y = self.rect.y, "landed");
        }

        self.delta_y = 0.0;
        self.airborne = false;
        self.air_jumped = false;
        self.movement_speed = self.physics.run_speed;

        if self.delta_x < 0.0 {
            self.delta_x = -self.movement_speed;
            self.direction = Facing::Left;
        }
        if self.delta_x > 0.0 {
            self.delta_x = self.movement_speed;
            self.direction = Facing::Right;
        }
    }

    // -------- Per-tick update --------

    /// Applies gravity.
    ///
    /// A velocity of exactly zero is seeded with 1 so a grounded player keeps
    /// probing the surface below every tick. There is no terminal velocity.
    fn apply_gravity(&mut self) {
        if self.delta_y == 0.0 {
            self.delta_y = 1.0;
        } else {
            self.delta_y += self.physics.gravity_force;
        }
    }

    /// Advances the player by one tick. Order matters:
    /// gravity, move x, running frame, resolve x, move y, resolve y, animation.
    pub fn update(&mut self, level: &Level) -> UpdateReport {
        self.apply_gravity();

        self.rect.x += self.delta_x;

        // Position-locked running cycle, overwritten below unless the player
        // is grounded and moving
        let index = running_frame_index(
            self.rect.x,
            level.world_shift(),
            self.tuning.phase_width,
            self.frames.count(FrameSet::Running),
        );
        let running = AnimationFrame::new(FrameSet::Running, self.direction, index);

        let rule = self.physics.horizontal_snap_rule;
        let horizontal = collision::resolve_horizontal(self, level.surfaces(), rule);

        self.rect.y += self.delta_y;

        let vertical = collision::resolve_vertical(self, level.surfaces());

        self.current_frame = override_frame(
            running,
            self.direction,
            self.delta_x,
            self.delta_y,
            self.airborne,
            &self.tuning,
        );

        if horizontal.hits > 0 || vertical.hits > 0 {
            tracing::trace!(?horizontal, ?vertical, "player contacts");
        }

        UpdateReport {
            horizontal,
            vertical,
        }
    }

    /// Clamps the player horizontally to the screen.
    pub fn keep_in_bounds(&mut self) {
        if self.rect.right() > self.screen_width {
            self.rect.set_right(self.screen_width);
        }
        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }
    }

    // -------- Accessors --------

    pub fn bounds(&self) -> &Rect {
        &self.rect
    }

    pub fn position(&self) -> (f32, f32) {
        (self.rect.x, self.rect.y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn has_air_jumped(&self) -> bool {
        self.air_jumped
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn current_frame(&self) -> AnimationFrame {
        self.current_frame
    }

    /// Image for the current frame.
    pub fn image(&self) -> Option<&F> {
        self.frames.get(self.current_frame)
    }
}

impl<F: Clone> Body for Player<F> {
    fn bounds(&self) -> &Rect {
        &self.rect
    }

    fn bounds_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn velocity(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    fn land(&mut self) {
        Player::land(self);
    }

    fn stop_rising(&mut self) {
        Player::stop_rising(self);
    }
}
