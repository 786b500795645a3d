use crate::animation::SpriteFrame;
use crate::config::Rgb;
use crate::error::GameError;
use crate::rect::Rect;
use crate::render::{DrawCommand, Paint, RenderSink};
use sdl2::pixels::Color;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Converts a world rectangle to whole SDL pixels.
pub fn to_sdl_rect(rect: &Rect) -> sdl2::rect::Rect {
    sdl2::rect::Rect::new(
        rect.x.floor() as i32,
        rect.y.floor() as i32,
        rect.width.max(0.0).round() as u32,
        rect.height.max(0.0).round() as u32,
    )
}

fn to_sdl_color(color: Rgb) -> Color {
    Color::RGB(color.0, color.1, color.2)
}

/// Paints draw lists onto a window, taking player frames from one sprite sheet.
pub struct CanvasSink<'a> {
    canvas: Canvas<Window>,
    sprite_sheet: Texture<'a>,
}

impl<'a> CanvasSink<'a> {
    pub fn new(canvas: Canvas<Window>, sprite_sheet: Texture<'a>) -> Self {
        CanvasSink {
            canvas,
            sprite_sheet,
        }
    }
}

impl RenderSink<SpriteFrame> for CanvasSink<'_> {
    type Error = GameError;

    fn clear(&mut self, color: Rgb) -> Result<(), GameError> {
        self.canvas.set_draw_color(to_sdl_color(color));
        self.canvas.clear();
        Ok(())
    }

    fn paint(&mut self, commands: &[DrawCommand<SpriteFrame>]) -> Result<(), GameError> {
        for command in commands {
            let dest = to_sdl_rect(&command.rect);
            match &command.paint {
                Paint::Color(color) => {
                    self.canvas.set_draw_color(to_sdl_color(*color));
                    self.canvas.fill_rect(dest).map_err(GameError::Sdl)?;
                }
                Paint::Image(frame) => {
                    self.canvas
                        .copy_ex(
                            &self.sprite_sheet,
                            Some(to_sdl_rect(&frame.src)),
                            Some(dest),
                            0.0,
                            None,
                            frame.flip_horizontal,
                            false,
                        )
                        .map_err(GameError::Sdl)?;
                }
            }
        }

        self.canvas.present();
        Ok(())
    }
}
