use crate::animation::{Facing, FrameSet};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the animation asset provider.
///
/// These only happen while building a player's frame lists. Once a player
/// exists, every frame it can select is already resolved.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    /// The provider has no frame for this set/facing/index
    #[error("missing {facing:?} {set:?} frame {index}")]
    MissingFrame {
        set: FrameSet,
        facing: Facing,
        index: usize,
    },

    /// A frame set is declared with too few frames to animate
    #[error("frame set {set:?} needs at least {required} frames, found {found}")]
    TooFewFrames {
        set: FrameSet,
        required: usize,
        found: usize,
    },
}

/// Errors while loading configuration or level data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Top-level startup error.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// SDL reports errors as plain strings
    #[error("SDL error: {0}")]
    Sdl(String),
}

impl From<GameError> for String {
    fn from(error: GameError) -> Self {
        error.to_string()
    }
}
