// GameWorld struct and per-tick logic
//
// GameWorld owns the player, the current level and the input state. One call
// to `tick` is one frame of game logic: events, update, screen clamp.

use crate::animation::{AnimationFrames, FrameProvider};
use crate::config::{GameConfig, Rgb};
use crate::error::GameError;
use crate::input::{InputEvent, InputState, Signal};
use crate::level::{Level, LevelData};
use crate::player::{Player, UpdateReport};
use crate::render::{build_draw_list, DrawCommand};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub events: usize,
    pub update: UpdateReport,
}

pub struct GameWorld<F> {
    pub player: Player<F>,
    pub level: Level,
    input: InputState,
    background: Rgb,
    quit: bool,
    ticks: u64,
}

impl<F: Clone> GameWorld<F> {
    pub fn new(config: &GameConfig, level: Level, frames: AnimationFrames<F>) -> Self {
        GameWorld {
            player: Player::new(config, frames),
            level,
            input: InputState::new(config.input.clone()),
            background: config.screen.background,
            quit: false,
            ticks: 0,
        }
    }

    /// Builds the level named by the config and loads every player frame.
    ///
    /// Any missing frame or unreadable level file fails here, before the
    /// first tick.
    pub fn from_config<P>(config: &GameConfig, provider: &P) -> Result<Self, GameError>
    where
        P: FrameProvider<Frame = F>,
    {
        let level = match &config.level_file {
            Some(path) => Level::from_data(LevelData::load_from_file(path)?),
            None => Level::from_stage(config.stage, &config.screen),
        };
        let frames = AnimationFrames::load(provider)?;
        Ok(Self::new(config, level, frames))
    }

    /// Runs one frame of game logic.
    ///
    /// Every event is applied in order, then the player updates exactly once.
    /// A quit event only raises the quit flag; the tick still completes.
    pub fn tick(&mut self, events: &[InputEvent]) -> TickReport {
        for event in events {
            if self.input.apply(*event, &mut self.player, &self.level) == Signal::Quit {
                tracing::info!(tick = self.ticks, "quit requested");
                self.quit = true;
            }
        }

        let update = self.player.update(&self.level);
        self.player.keep_in_bounds();
        self.input.end_frame();
        self.ticks += 1;

        TickReport {
            tick: self.ticks,
            events: events.len(),
            update,
        }
    }

    pub fn draw_list(&self) -> Vec<DrawCommand<F>> {
        build_draw_list(&self.level, &self.player)
    }

    pub fn clear_color(&self) -> Rgb {
        self.background
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
