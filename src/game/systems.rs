// Frame loop collaborators
//
// The loop is single-threaded and frame-stepped:
//   poll events -> tick (update + collisions) -> clear + paint -> wait
// The only blocking point is the frame limiter between ticks. The quit flag
// is checked once per iteration, after the frame was drawn.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::GameError;
use crate::input::InputEvent;
use crate::render::RenderSink;

use super::GameWorld;

/// Delivers the input events that arrived since the last poll, in order.
pub trait EventSource {
    type Error;

    fn poll(&mut self) -> Result<Vec<InputEvent>, Self::Error>;
}

/// Keeps ticks at least `interval` apart by sleeping the thread.
pub struct FrameLimiter {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(interval: Duration) -> Self {
        FrameLimiter {
            interval,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next tick may start.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) => self.interval.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Sleeps out the rest of the current frame and starts the next one.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_frame = Some(Instant::now());
    }
}

/// Runs the game until a quit event arrives. Returns the number of ticks run.
pub fn run<F, E, S>(
    world: &mut GameWorld<F>,
    events: &mut E,
    sink: &mut S,
    limiter: &mut FrameLimiter,
) -> Result<u64, GameError>
where
    F: Clone,
    E: EventSource,
    E::Error: Into<GameError>,
    S: RenderSink<F>,
    S::Error: Into<GameError>,
{
    tracing::info!(
        level = world.level.name(),
        interval_ms = limiter.interval().as_millis() as u64,
        "game loop starting"
    );

    while !world.should_quit() {
        let pending = events.poll().map_err(Into::<GameError>::into)?;
        world.tick(&pending);

        sink.clear(world.clear_color()).map_err(Into::<GameError>::into)?;
        sink.paint(&world.draw_list()).map_err(Into::<GameError>::into)?;

        limiter.wait();
    }

    tracing::info!(ticks = world.ticks(), "game loop finished");
    Ok(world.ticks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{SpriteFrame, SpriteLayout};
    use crate::config::{GameConfig, Rgb, ScreenConfig};
    use crate::input::Key;
    use crate::render::DrawCommand;
    use std::collections::VecDeque;

    struct Scripted {
        frames: VecDeque<Vec<InputEvent>>,
    }

    impl EventSource for Scripted {
        type Error = GameError;

        fn poll(&mut self) -> Result<Vec<InputEvent>, GameError> {
            Ok(self.frames.pop_front().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct Recorder {
        clears: Vec<Rgb>,
        frames: Vec<usize>,
    }

    impl RenderSink<SpriteFrame> for Recorder {
        type Error = GameError;

        fn clear(&mut self, color: Rgb) -> Result<(), GameError> {
            self.clears.push(color);
            Ok(())
        }

        fn paint(&mut self, commands: &[DrawCommand<SpriteFrame>]) -> Result<(), GameError> {
            self.frames.push(commands.len());
            Ok(())
        }
    }

    struct FailingSink;

    impl RenderSink<SpriteFrame> for FailingSink {
        type Error = GameError;

        fn clear(&mut self, _color: Rgb) -> Result<(), GameError> {
            Err(GameError::Sdl("canvas lost".to_string()))
        }

        fn paint(&mut self, _commands: &[DrawCommand<SpriteFrame>]) -> Result<(), GameError> {
            Ok(())
        }
    }

    fn test_world() -> GameWorld<SpriteFrame> {
        GameWorld::from_config(&GameConfig::default(), &SpriteLayout::default()).unwrap()
    }

    #[test]
    fn test_run_until_quit() {
        let mut world = test_world();
        let mut events = Scripted {
            frames: VecDeque::from(vec![
                vec![InputEvent::KeyDown(Key::Right)],
                vec![],
                vec![InputEvent::Quit],
            ]),
        };
        let mut sink = Recorder::default();
        let mut limiter = FrameLimiter::new(Duration::ZERO);

        let ticks = run(&mut world, &mut events, &mut sink, &mut limiter).unwrap();

        assert_eq!(ticks, 3);
        // Every tick, including the quitting one, is drawn
        assert_eq!(sink.clears, vec![Rgb::BLACK; 3]);
        assert_eq!(sink.frames, vec![4; 3]);
    }

    #[test]
    fn test_run_propagates_sink_errors() {
        let mut world = test_world();
        let mut events = Scripted {
            frames: VecDeque::new(),
        };
        let mut limiter = FrameLimiter::new(Duration::ZERO);

        let result = run(&mut world, &mut events, &mut FailingSink, &mut limiter);

        assert!(matches!(result, Err(GameError::Sdl(_))));
        assert_eq!(world.ticks(), 1);
    }

    #[test]
    fn test_limiter_first_frame_has_no_wait() {
        let limiter = FrameLimiter::new(ScreenConfig::default().frame_interval());
        assert_eq!(limiter.remaining(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_limiter_remaining_after_frame() {
        let mut limiter = FrameLimiter::new(Duration::from_secs(3600));
        limiter.wait();

        let remaining = limiter.remaining(Instant::now());
        assert!(remaining > Duration::from_secs(3500));
        assert!(remaining <= Duration::from_secs(3600));
    }
}
