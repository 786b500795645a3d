//! Levels: an ordered set of surfaces plus a horizontal world shift
//!
//! A level is built once per stage and only read afterwards. The player
//! borrows it every tick for collision and animation; the level never owns
//! or references the player.

use crate::config::ScreenConfig;
use crate::error::ConfigError;
use crate::surface::{PlatformData, Surface};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_LEVEL_LIMIT: f32 = -1000.0;

fn default_level_limit() -> f32 {
    DEFAULT_LEVEL_LIMIT
}

/// Built-in stage layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// A single floor spanning the window
    FlatFloor,
    /// Floor plus two elevated platforms to jump on
    #[default]
    RaisedPlatforms,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::FlatFloor => "flat floor",
            Stage::RaisedPlatforms => "raised platforms",
        }
    }

    /// Platform layout for this stage, sized to the screen.
    pub fn data(&self, screen: &ScreenConfig) -> LevelData {
        let width = screen.width as f32;
        let height = screen.height as f32;
        let floor = PlatformData {
            width,
            height: 15.0,
            x: 0.0,
            y: height - 30.0,
        };

        let platforms = match self {
            Stage::FlatFloor => vec![floor],
            Stage::RaisedPlatforms => vec![
                floor,
                PlatformData {
                    width: 80.0,
                    height: 15.0,
                    x: 140.0,
                    y: height - 200.0,
                },
                PlatformData {
                    width: 80.0,
                    height: 15.0,
                    x: width - 240.0,
                    y: height - 150.0,
                },
            ],
        };

        LevelData {
            name: self.name().to_string(),
            platforms,
            world_shift: 0.0,
            level_limit: DEFAULT_LEVEL_LIMIT,
        }
    }
}

/// Serializable level description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub platforms: Vec<PlatformData>,
    #[serde(default)]
    pub world_shift: f32,
    /// How far the world may scroll before the stage ends
    #[serde(default = "default_level_limit")]
    pub level_limit: f32,
}

impl LevelData {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data: LevelData = serde_json::from_str(&content)?;
        if data.platforms.iter().any(|p| p.width <= 0.0 || p.height <= 0.0) {
            return Err(ConfigError::Invalid {
                field: format!("{}: platforms", path.display()),
                reason: "platform width and height must be positive".to_string(),
            });
        }
        Ok(data)
    }
}

pub struct Level {
    name: String,
    surfaces: Vec<Surface>,
    world_shift: f32,
    level_limit: f32,
}

impl Level {
    pub fn new(name: impl Into<String>, surfaces: Vec<Surface>) -> Self {
        Level {
            name: name.into(),
            surfaces,
            world_shift: 0.0,
            level_limit: DEFAULT_LEVEL_LIMIT,
        }
    }

    pub fn with_world_shift(mut self, world_shift: f32) -> Self {
        self.world_shift = world_shift;
        self
    }

    pub fn from_data(data: LevelData) -> Self {
        let surfaces: Vec<Surface> = data.platforms.into_iter().map(Surface::from).collect();
        tracing::info!(level = %data.name, surfaces = surfaces.len(), "level built");
        Level {
            name: data.name,
            surfaces,
            world_shift: data.world_shift,
            level_limit: data.level_limit,
        }
    }

    pub fn from_stage(stage: Stage, screen: &ScreenConfig) -> Self {
        Self::from_data(stage.data(screen))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Surfaces in collision order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn world_shift(&self) -> f32 {
        self.world_shift
    }

    pub fn level_limit(&self) -> f32 {
        self.level_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;

    #[test]
    fn test_flat_floor_spans_screen() {
        let level = Level::from_stage(Stage::FlatFloor, &ScreenConfig::default());

        assert_eq!(level.surfaces().len(), 1);
        assert_eq!(
            *level.surfaces()[0].bounds(),
            Rect::new(0.0, 570.0, 800.0, 15.0)
        );
        assert_eq!(level.world_shift(), 0.0);
        assert_eq!(level.level_limit(), -1000.0);
    }

    #[test]
    fn test_raised_platforms_layout() {
        let level = Level::from_stage(Stage::RaisedPlatforms, &ScreenConfig::default());
        let bounds: Vec<Rect> = level.surfaces().iter().map(|s| *s.bounds()).collect();

        assert_eq!(
            bounds,
            vec![
                Rect::new(0.0, 570.0, 800.0, 15.0),
                Rect::new(140.0, 400.0, 80.0, 15.0),
                Rect::new(560.0, 450.0, 80.0, 15.0),
            ]
        );
    }

    #[test]
    fn test_stage_scales_with_screen() {
        let screen = ScreenConfig {
            width: 1024,
            height: 768,
            ..ScreenConfig::default()
        };
        let level = Level::from_stage(Stage::FlatFloor, &screen);

        assert_eq!(level.surfaces()[0].bounds().width, 1024.0);
        assert_eq!(level.surfaces()[0].bounds().top(), 738.0);
    }

    #[test]
    fn test_level_data_json_defaults() {
        let data: LevelData = serde_json::from_str(
            r#"{ "name": "test", "platforms": [ { "width": 10, "height": 5, "x": 1, "y": 2 } ] }"#,
        )
        .unwrap();

        assert_eq!(data.world_shift, 0.0);
        assert_eq!(data.level_limit, -1000.0);

        let level = Level::from_data(data);
        assert_eq!(level.name(), "test");
        assert_eq!(*level.surfaces()[0].bounds(), Rect::new(1.0, 2.0, 10.0, 5.0));
    }

    #[test]
    fn test_world_shift_builder() {
        let level = Level::new("shifted", Vec::new()).with_world_shift(-45.0);
        assert_eq!(level.world_shift(), -45.0);
        assert!(level.surfaces().is_empty());
    }
}
