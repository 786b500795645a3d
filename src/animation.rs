//! Animation frame selection for the player
//!
//! The player never decodes images. At construction it asks a
//! [`FrameProvider`] for every frame it could ever show and keeps them in an
//! [`AnimationFrames`] table. Each tick it only picks an [`AnimationFrame`]
//! (set, facing, index) and looks the image up in that table.
//!
//! # Frame selection
//!
//! - Running frames are position-locked, not time-locked: the index comes from
//!   the world-space x coordinate (`(x + world_shift) / phase_width`), so the
//!   legs cycle with translation rather than elapsed frames.
//! - Jumping frame 0 is the ascent pose, frames 1-3 are descent poses picked
//!   by how fast the player is falling.
//! - Idle has a single frame.

use crate::error::{AssetError, ConfigError};
use crate::rect::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which way the character sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Logical frame sets on the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSet {
    Idle,
    Running,
    Jumping,
}

impl FrameSet {
    /// Fewest frames a set needs for the selection rules to stay in range.
    pub fn required_frames(&self) -> usize {
        match self {
            FrameSet::Idle => 1,
            FrameSet::Running => 1,
            // Ascent pose plus three descent poses
            FrameSet::Jumping => 4,
        }
    }
}

/// The frame currently selected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    pub set: FrameSet,
    pub facing: Facing,
    pub index: usize,
}

impl AnimationFrame {
    pub fn new(set: FrameSet, facing: Facing, index: usize) -> Self {
        AnimationFrame { set, facing, index }
    }
}

/// Animation asset provider.
///
/// Implementations hand out image handles by logical name and index. The
/// handle type is whatever the renderer needs to paint the frame.
pub trait FrameProvider {
    type Frame: Clone;

    /// Number of frames available in `set` (same for both facings).
    fn frame_count(&self, set: FrameSet) -> usize;

    fn frame(&self, set: FrameSet, facing: Facing, index: usize)
        -> Result<Self::Frame, AssetError>;
}

/// Every frame the player can show, fetched up front.
#[derive(Debug, Clone)]
pub struct AnimationFrames<F> {
    idle: [Vec<F>; 2],
    running: [Vec<F>; 2],
    jumping: [Vec<F>; 2],
}

fn facing_slot(facing: Facing) -> usize {
    match facing {
        Facing::Left => 0,
        Facing::Right => 1,
    }
}

impl<F: Clone> AnimationFrames<F> {
    /// Fetches all frames from `provider`.
    ///
    /// Fails fast if a set is too short or any single frame can't be resolved;
    /// the player can't run with a partial animation set.
    pub fn load<P>(provider: &P) -> Result<Self, AssetError>
    where
        P: FrameProvider<Frame = F>,
    {
        let fetch = |set: FrameSet| -> Result<[Vec<F>; 2], AssetError> {
            let count = provider.frame_count(set);
            if count < set.required_frames() {
                return Err(AssetError::TooFewFrames {
                    set,
                    required: set.required_frames(),
                    found: count,
                });
            }

            let mut left = Vec::with_capacity(count);
            let mut right = Vec::with_capacity(count);
            for index in 0..count {
                left.push(provider.frame(set, Facing::Left, index)?);
                right.push(provider.frame(set, Facing::Right, index)?);
            }
            Ok([left, right])
        };

        let frames = AnimationFrames {
            idle: fetch(FrameSet::Idle)?,
            running: fetch(FrameSet::Running)?,
            jumping: fetch(FrameSet::Jumping)?,
        };
        tracing::debug!(
            idle = frames.count(FrameSet::Idle),
            running = frames.count(FrameSet::Running),
            jumping = frames.count(FrameSet::Jumping),
            "animation frames loaded"
        );
        Ok(frames)
    }

    fn set(&self, set: FrameSet) -> &[Vec<F>; 2] {
        match set {
            FrameSet::Idle => &self.idle,
            FrameSet::Running => &self.running,
            FrameSet::Jumping => &self.jumping,
        }
    }

    pub fn count(&self, set: FrameSet) -> usize {
        self.set(set)[facing_slot(Facing::Right)].len()
    }

    pub fn get(&self, frame: AnimationFrame) -> Option<&F> {
        self.set(frame.set)[facing_slot(frame.facing)].get(frame.index)
    }
}

/// Numbers that drive frame selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    /// World-space distance covered by one running frame
    pub phase_width: f32,
    /// Falling slower than this shows descent frame 1
    pub slow_fall_below: f32,
    /// Falling slower than this (but not slow) shows descent frame 2; faster shows 3
    pub medium_fall_below: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        AnimationTuning {
            phase_width: 30.0,
            slow_fall_below: 1.6,
            medium_fall_below: 3.3,
        }
    }
}

/// Running frame index for a world-space x position.
///
/// Floor division then Euclidean modulo, so positions left of the origin
/// still map into `0..count`.
pub fn running_frame_index(x: f32, world_shift: f32, phase_width: f32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let phase = ((x + world_shift) / phase_width).floor() as i64;
    phase.rem_euclid(count as i64) as usize
}

/// Descent frame (1, 2 or 3 of the jumping set) for a falling speed.
pub fn fall_frame_index(delta_y: f32, tuning: &AnimationTuning) -> usize {
    if delta_y < tuning.slow_fall_below {
        1
    } else if delta_y < tuning.medium_fall_below {
        2
    } else {
        3
    }
}

/// Applies the rising/falling/idle overrides on top of the running frame.
///
/// Each rule is an unconditional assignment evaluated in order, so when more
/// than one matches the last one wins. That only happens for a player who
/// walked off a ledge without jumping (falling but never marked airborne)
/// and has no horizontal input: they show the idle pose.
pub fn override_frame(
    running: AnimationFrame,
    facing: Facing,
    delta_x: f32,
    delta_y: f32,
    airborne: bool,
    tuning: &AnimationTuning,
) -> AnimationFrame {
    let mut frame = running;

    if delta_y < 0.0 {
        frame = AnimationFrame::new(FrameSet::Jumping, facing, 0);
    }

    if delta_y > 0.0 {
        frame = AnimationFrame::new(FrameSet::Jumping, facing, fall_frame_index(delta_y, tuning));
    }

    if !airborne && delta_x == 0.0 {
        frame = AnimationFrame::new(FrameSet::Idle, facing, 0);
    }

    frame
}

/// Position and size of one frame set on the sprite sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetStrip {
    pub origin_x: i32,
    pub origin_y: i32,
    pub count: usize,
}

/// A frame handle for sprite-sheet based rendering.
///
/// Left-facing frames reuse the right-facing pixels mirrored horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    pub src: Rect,
    pub flip_horizontal: bool,
}

/// Sprite sheet layout, loaded from JSON.
///
/// Frames in a strip sit side by side, `frame_width` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteLayout {
    pub image_path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub idle: SheetStrip,
    pub running: SheetStrip,
    pub jumping: SheetStrip,
}

impl Default for SpriteLayout {
    fn default() -> Self {
        SpriteLayout {
            image_path: "img/nov2015_spritesheet_2.png".to_string(),
            frame_width: 120,
            frame_height: 114,
            idle: SheetStrip {
                origin_x: 0,
                origin_y: 0,
                count: 1,
            },
            running: SheetStrip {
                origin_x: 240,
                origin_y: 0,
                count: 6,
            },
            // Jumping frames continue right after the running strip
            jumping: SheetStrip {
                origin_x: 960,
                origin_y: 0,
                count: 4,
            },
        }
    }
}

impl SpriteLayout {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layout: SpriteLayout = serde_json::from_str(&content)?;
        Ok(layout)
    }

    fn strip(&self, set: FrameSet) -> &SheetStrip {
        match set {
            FrameSet::Idle => &self.idle,
            FrameSet::Running => &self.running,
            FrameSet::Jumping => &self.jumping,
        }
    }
}

impl FrameProvider for SpriteLayout {
    type Frame = SpriteFrame;

    fn frame_count(&self, set: FrameSet) -> usize {
        self.strip(set).count
    }

    fn frame(&self, set: FrameSet, facing: Facing, index: usize) -> Result<SpriteFrame, AssetError> {
        let strip = self.strip(set);
        if index >= strip.count {
            return Err(AssetError::MissingFrame { set, facing, index });
        }

        let x = strip.origin_x + (index as i32) * self.frame_width as i32;
        Ok(SpriteFrame {
            src: Rect::new(
                x as f32,
                strip.origin_y as f32,
                self.frame_width as f32,
                self.frame_height as f32,
            ),
            flip_horizontal: facing == Facing::Left,
        })
    }
}
