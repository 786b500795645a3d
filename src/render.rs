/// Draw list construction
///
/// The core never talks to a graphics API. Each frame it produces a flat list
/// of [`DrawCommand`]s (a color or an image, plus where to put it) and hands
/// it to a [`RenderSink`], after asking the sink to clear the screen.
///
/// Painting order is list order: level surfaces first, player last, so the
/// player is always drawn on top.
use crate::config::Rgb;
use crate::level::Level;
use crate::player::Player;
use crate::rect::Rect;

/// What to paint into a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint<F> {
    Color(Rgb),
    Image(F),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand<F> {
    pub paint: Paint<F>,
    pub rect: Rect,
}

/// Rendering backend.
pub trait RenderSink<F> {
    type Error;

    /// Fills the whole surface. Called once per frame before `paint`.
    fn clear(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Paints commands in order, then presents the frame.
    fn paint(&mut self, commands: &[DrawCommand<F>]) -> Result<(), Self::Error>;
}

/// Color used when the player's current frame has no image.
pub const PLAYER_FALLBACK_COLOR: Rgb = Rgb::RED;

/// Builds the draw list for one frame.
pub fn build_draw_list<F: Clone>(level: &Level, player: &Player<F>) -> Vec<DrawCommand<F>> {
    let mut commands = Vec::with_capacity(level.surfaces().len() + 1);

    for surface in level.surfaces() {
        commands.push(DrawCommand {
            paint: Paint::Color(surface.color()),
            rect: *surface.bounds(),
        });
    }

    let paint = match player.image() {
        Some(image) => Paint::Image(image.clone()),
        None => Paint::Color(PLAYER_FALLBACK_COLOR),
    };
    commands.push(DrawCommand {
        paint,
        rect: *player.bounds(),
    });

    commands
}
