//! Game configuration
//!
//! Every tunable the physics core reads is passed in through these structs at
//! construction time. Nothing inside the player or level reaches for a global.
//!
//! Configuration is plain JSON (like the sprite layout files), and every
//! section falls back to the defaults below, so a config file only needs the
//! values it wants to change:
//!
//! ```json
//! { "physics": { "gravity_force": 0.5 }, "stage": "flat_floor" }
//! ```

use crate::animation::AnimationTuning;
use crate::collision::HorizontalSnapRule;
use crate::error::ConfigError;
use crate::level::Stage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SKYHOP_CONFIG";

/// Config file shipped next to the binary's assets.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";

/// Simple RGB color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const PURPLE: Rgb = Rgb(255, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
}

/// Window size, frame rate and caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    pub caption: String,
    pub background: Rgb,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            width: 800,
            height: 600,
            target_fps: 60,
            caption: "Nov 2015 Platformer Test".to_string(),
            background: Rgb::BLACK,
        }
    }
}

impl ScreenConfig {
    /// Minimum time between two ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

/// Player movement tuning.
///
/// Forces follow screen coordinates: a negative jump force pushes upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Horizontal speed while standing on a surface
    pub run_speed: f32,
    /// Horizontal speed during a jump or fall
    pub air_steer_speed: f32,
    pub jump_force: f32,
    pub air_jump_force: f32,
    /// Added to the vertical velocity every tick (no terminal velocity)
    pub gravity_force: f32,
    /// How far below the player `jump()` looks for a surface
    pub jump_probe_depth: f32,
    pub horizontal_snap_rule: HorizontalSnapRule,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            run_speed: 6.0,
            air_steer_speed: 3.0,
            jump_force: -10.0,
            air_jump_force: -10.0,
            gravity_force: 0.35,
            jump_probe_depth: 2.0,
            horizontal_snap_rule: HorizontalSnapRule::default(),
        }
    }
}

/// Player spawn point and collision box size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        // The collision box is the sprite frame size (120x114)
        PlayerConfig {
            spawn_x: 10.0,
            spawn_y: 10.0,
            width: 120.0,
            height: 114.0,
        }
    }
}

/// Keyboard handling options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Releasing jump within this many frames of pressing it cuts the jump short
    pub short_hop_window: u32,
    /// Holding left and right together cancels horizontal movement.
    /// Off by default: the last key pressed wins.
    pub resolve_opposing_keys: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            short_hop_window: 10,
            resolve_opposing_keys: false,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub animation: AnimationTuning,
    pub input: InputConfig,
    pub stage: Stage,
    /// Optional JSON level file; overrides `stage` when set
    pub level_file: Option<PathBuf>,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate config files, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(explicit));
        }
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("skyhop").join("config.json"));
        }
        paths.push(PathBuf::from(DEFAULT_CONFIG_PATH));
        paths
    }

    /// Loads the first config file that exists, or the defaults.
    ///
    /// A file that exists but fails to parse is an error, not a silent fallback.
    pub fn discover() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
            tracing::debug!(path = %path.display(), "no config file here");
        }
        tracing::warn!("no config file found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| {
            Err(ConfigError::Invalid {
                field: field.to_string(),
                reason: reason.to_string(),
            })
        };

        if self.screen.width == 0 || self.screen.height == 0 {
            return invalid("screen", "width and height must be non-zero");
        }
        if self.screen.target_fps == 0 {
            return invalid("screen.target_fps", "must be at least 1");
        }
        if self.physics.run_speed <= 0.0 {
            return invalid("physics.run_speed", "must be positive");
        }
        if self.physics.air_steer_speed <= 0.0 {
            return invalid("physics.air_steer_speed", "must be positive");
        }
        if self.physics.jump_force >= 0.0 {
            return invalid("physics.jump_force", "must be negative (upward)");
        }
        if self.physics.air_jump_force >= 0.0 {
            return invalid("physics.air_jump_force", "must be negative (upward)");
        }
        if self.physics.jump_probe_depth <= 0.0 {
            return invalid("physics.jump_probe_depth", "must be positive");
        }
        if self.player.width <= 0.0 || self.player.height <= 0.0 {
            return invalid("player", "width and height must be positive");
        }
        if self.animation.phase_width <= 0.0 {
            return invalid("animation.phase_width", "must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_values() {
        let config = GameConfig::default();

        assert_eq!(config.screen.width, 800);
        assert_eq!(config.screen.height, 600);
        assert_eq!(config.screen.target_fps, 60);
        assert_eq!(config.physics.run_speed, 6.0);
        assert_eq!(config.physics.air_steer_speed, 3.0);
        assert_eq!(config.physics.jump_force, -10.0);
        assert_eq!(config.physics.air_jump_force, -10.0);
        assert_eq!(config.physics.gravity_force, 0.35);
        assert_eq!(config.physics.jump_probe_depth, 2.0);
        assert_eq!(config.input.short_hop_window, 10);
        assert!(!config.input.resolve_opposing_keys);
        assert_eq!(config.stage, Stage::RaisedPlatforms);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json(
            r#"{ "physics": { "gravity_force": 0.5 }, "stage": "flat_floor" }"#,
        )
        .unwrap();

        assert_eq!(config.physics.gravity_force, 0.5);
        assert_eq!(config.physics.run_speed, 6.0);
        assert_eq!(config.stage, Stage::FlatFloor);
        assert_eq!(config.screen, ScreenConfig::default());
    }

    #[test]
    fn test_snap_rule_from_json() {
        let config = GameConfig::from_json(
            r#"{ "physics": { "horizontal_snap_rule": "horizontal_velocity" } }"#,
        )
        .unwrap();

        assert_eq!(
            config.physics.horizontal_snap_rule,
            HorizontalSnapRule::HorizontalVelocity
        );
    }

    #[test]
    fn test_rejects_upward_gravity_sign_on_jump() {
        let result = GameConfig::from_json(r#"{ "physics": { "jump_force": 10.0 } }"#);

        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "physics.jump_force"),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_fps() {
        let result = GameConfig::from_json(r#"{ "screen": { "target_fps": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = GameConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::load_from_file("definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_frame_interval() {
        let screen = ScreenConfig::default();
        let interval = screen.frame_interval();

        assert!(interval > Duration::from_millis(16));
        assert!(interval < Duration::from_millis(17));
    }

    #[test]
    fn test_search_paths_end_with_bundled_config() {
        let paths = GameConfig::search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(DEFAULT_CONFIG_PATH)));
    }
}
