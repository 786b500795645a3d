use std::path::Path;

use sdl2::image::LoadTexture;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skyhop::animation::SpriteLayout;
use skyhop::config::GameConfig;
use skyhop::error::GameError;
use skyhop::frontend::{CanvasSink, SdlInput};
use skyhop::game::{run, FrameLimiter, GameWorld};

const SPRITE_LAYOUT_PATH: &str = "assets/config/player_sprites.json";

/// Loads the sprite sheet layout, falling back to the built-in one.
fn load_sprite_layout() -> Result<SpriteLayout, GameError> {
    if Path::new(SPRITE_LAYOUT_PATH).exists() {
        Ok(SpriteLayout::load_from_file(SPRITE_LAYOUT_PATH)?)
    } else {
        tracing::warn!(path = SPRITE_LAYOUT_PATH, "no sprite layout file, using built-in layout");
        Ok(SpriteLayout::default())
    }
}

fn main() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skyhop=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "skyhop starting");

    let config = GameConfig::discover().map_err(GameError::from)?;
    let layout = load_sprite_layout()?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window(&config.screen.caption, config.screen.width, config.screen.height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;
    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();

    // Fail before the first frame if the sheet or any frame is missing
    let sprite_sheet = texture_creator
        .load_texture(&layout.image_path)
        .map_err(|e| format!("Failed to load {}: {}", layout.image_path, e))?;
    let mut world = GameWorld::from_config(&config, &layout)?;

    tracing::info!("controls: LEFT/RIGHT run, UP jump (again in the air to air jump)");

    let mut input = SdlInput::new(sdl_context.event_pump()?);
    let mut sink = CanvasSink::new(canvas, sprite_sheet);
    let mut limiter = FrameLimiter::new(config.screen.frame_interval());

    run(&mut world, &mut input, &mut sink, &mut limiter)?;
    Ok(())
}
